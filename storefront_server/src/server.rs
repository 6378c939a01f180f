use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use storefront_engine::{AddressApi, CartApi, CatalogApi, OrderFlowApi, PaymentApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::razorpay::RazorpayApi,
    routes::{
        health,
        razorpay_create_order,
        razorpay_verify,
        AddToCartRoute,
        AddressByIdRoute,
        AddressesForUserRoute,
        CancelOrderRoute,
        CartForUserRoute,
        CartTotalRoute,
        CategoriesForStoreRoute,
        ClearCartRoute,
        CreateAddressRoute,
        CreateCategoryRoute,
        CreateOrderRoute,
        CreatePaymentRoute,
        CreateProductRoute,
        CreateStoreRoute,
        DeleteAddressRoute,
        DeleteProductRoute,
        OrderByIdRoute,
        OrdersForStoreRoute,
        OrdersForUserRoute,
        PaymentByIdRoute,
        PaymentForOrderRoute,
        ProductByIdRoute,
        ProductsForStoreRoute,
        RemoveCartItemRoute,
        StoreByIdRoute,
        UpdateAddressRoute,
        UpdateCartQuantityRoute,
        UpdatePaymentStatusRoute,
        UpdateProductRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone());
        let cart_api = CartApi::new(db.clone());
        let payments_api = PaymentApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let address_api = AddressApi::new(db.clone());
        let razorpay_api = RazorpayApi::new(config.razorpay.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("stf::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(cart_api))
            .app_data(web::Data::new(payments_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(address_api))
            .app_data(web::Data::new(razorpay_api))
            .service(health)
            .service(CreateOrderRoute::<SqliteDatabase>::new())
            .service(OrdersForUserRoute::<SqliteDatabase>::new())
            .service(OrdersForStoreRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(CancelOrderRoute::<SqliteDatabase>::new())
            .service(AddToCartRoute::<SqliteDatabase>::new())
            .service(CartTotalRoute::<SqliteDatabase>::new())
            .service(CartForUserRoute::<SqliteDatabase>::new())
            .service(UpdateCartQuantityRoute::<SqliteDatabase>::new())
            // Clear must be registered ahead of the single-item delete so that /cart/clear/{user_id} wins
            .service(ClearCartRoute::<SqliteDatabase>::new())
            .service(RemoveCartItemRoute::<SqliteDatabase>::new())
            .service(razorpay_create_order)
            .service(razorpay_verify)
            .service(CreatePaymentRoute::<SqliteDatabase>::new())
            .service(PaymentForOrderRoute::<SqliteDatabase>::new())
            .service(PaymentByIdRoute::<SqliteDatabase>::new())
            .service(UpdatePaymentStatusRoute::<SqliteDatabase>::new())
            .service(CreateStoreRoute::<SqliteDatabase>::new())
            .service(StoreByIdRoute::<SqliteDatabase>::new())
            .service(CreateCategoryRoute::<SqliteDatabase>::new())
            .service(CategoriesForStoreRoute::<SqliteDatabase>::new())
            .service(CreateProductRoute::<SqliteDatabase>::new())
            .service(ProductsForStoreRoute::<SqliteDatabase>::new())
            .service(ProductByIdRoute::<SqliteDatabase>::new())
            .service(UpdateProductRoute::<SqliteDatabase>::new())
            .service(DeleteProductRoute::<SqliteDatabase>::new())
            .service(CreateAddressRoute::<SqliteDatabase>::new())
            .service(AddressesForUserRoute::<SqliteDatabase>::new())
            .service(AddressByIdRoute::<SqliteDatabase>::new())
            .service(UpdateAddressRoute::<SqliteDatabase>::new())
            .service(DeleteAddressRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
