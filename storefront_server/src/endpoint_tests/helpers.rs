//! Endpoint tests run against a throwaway SQLite database rather than mocks, so that the transactional
//! behaviour of checkout and cancellation is exercised through the full HTTP stack.

use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest};
use serde::Serialize;
use sf_common::{Money, Secret};
use storefront_engine::{
    db_types::{NewCategory, NewProduct, NewStore},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    CatalogManagement,
    SqliteDatabase,
};

use crate::{config::RazorpayConfig, integrations::razorpay::RazorpayApi};

pub const TEST_RZP_SECRET: &str = "rzp_test_secret";

pub async fn test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating test database")
}

/// Seeds one store with one category and `prices.len()` products, returning the product ids.
pub async fn seed_products(db: &SqliteDatabase, prices: &[i64], stock: i64) -> (i64, Vec<i64>) {
    let store = db.insert_store(NewStore::new("Endpoint Test Store", "merchant-1")).await.unwrap();
    let category = db.insert_category(NewCategory::new(store.id, "General")).await.unwrap();
    let mut ids = Vec::with_capacity(prices.len());
    for (n, price) in prices.iter().enumerate() {
        let product = db
            .insert_product(NewProduct::new(store.id, category.id, format!("Product {n}"), Money::from(*price), stock))
            .await
            .unwrap();
        ids.push(product.id);
    }
    (store.id, ids)
}

pub(crate) fn test_razorpay_api() -> RazorpayApi {
    RazorpayApi::new(RazorpayConfig {
        key_id: "rzp_test_key".into(),
        key_secret: Secret::new(TEST_RZP_SECRET.into()),
        currency: "INR".into(),
    })
}

/// Builds a test service with the full route tree over a real database.
macro_rules! test_app {
    ($db:expr) => {{
        use storefront_engine::SqliteDatabase as Db;

        use $crate::routes::*;
        let db = $db.clone();
        let app = actix_web::App::new()
            .app_data(actix_web::web::Data::new(storefront_engine::OrderFlowApi::new(db.clone())))
            .app_data(actix_web::web::Data::new(storefront_engine::CartApi::new(db.clone())))
            .app_data(actix_web::web::Data::new(storefront_engine::PaymentApi::new(db.clone())))
            .app_data(actix_web::web::Data::new(storefront_engine::CatalogApi::new(db.clone())))
            .app_data(actix_web::web::Data::new(storefront_engine::AddressApi::new(db.clone())))
            .app_data(actix_web::web::Data::new($crate::endpoint_tests::helpers::test_razorpay_api()))
            .service(health)
            .service(CreateOrderRoute::<Db>::new())
            .service(OrdersForUserRoute::<Db>::new())
            .service(OrdersForStoreRoute::<Db>::new())
            .service(OrderByIdRoute::<Db>::new())
            .service(CancelOrderRoute::<Db>::new())
            .service(AddToCartRoute::<Db>::new())
            .service(CartTotalRoute::<Db>::new())
            .service(CartForUserRoute::<Db>::new())
            .service(UpdateCartQuantityRoute::<Db>::new())
            .service(ClearCartRoute::<Db>::new())
            .service(RemoveCartItemRoute::<Db>::new())
            .service(razorpay_create_order)
            .service(razorpay_verify)
            .service(CreatePaymentRoute::<Db>::new())
            .service(PaymentForOrderRoute::<Db>::new())
            .service(PaymentByIdRoute::<Db>::new())
            .service(UpdatePaymentStatusRoute::<Db>::new())
            .service(CreateStoreRoute::<Db>::new())
            .service(StoreByIdRoute::<Db>::new())
            .service(CreateCategoryRoute::<Db>::new())
            .service(CategoriesForStoreRoute::<Db>::new())
            .service(CreateProductRoute::<Db>::new())
            .service(ProductsForStoreRoute::<Db>::new())
            .service(ProductByIdRoute::<Db>::new())
            .service(UpdateProductRoute::<Db>::new())
            .service(DeleteProductRoute::<Db>::new())
            .service(CreateAddressRoute::<Db>::new())
            .service(AddressesForUserRoute::<Db>::new())
            .service(AddressByIdRoute::<Db>::new())
            .service(UpdateAddressRoute::<Db>::new())
            .service(DeleteAddressRoute::<Db>::new());
        actix_web::test::init_service(app).await
    }};
}
pub(crate) use test_app;

pub async fn send<S, B>(service: &S, req: TestRequest) -> (StatusCode, String)
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: MessageBody,
{
    let res = test::call_service(service, req.to_request()).await;
    let status = res.status();
    let body = res.into_body().try_into_bytes().map(|b| String::from_utf8_lossy(&b).into_owned()).unwrap_or_default();
    (status, body)
}

pub fn get(path: &str) -> TestRequest {
    TestRequest::get().uri(path)
}

pub fn delete(path: &str) -> TestRequest {
    TestRequest::delete().uri(path)
}

pub fn post_json<T: Serialize>(path: &str, body: &T) -> TestRequest {
    TestRequest::post().uri(path).set_json(body)
}

pub fn patch_json<T: Serialize>(path: &str, body: &T) -> TestRequest {
    TestRequest::patch().uri(path).set_json(body)
}
