//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. For this reason, any long, non-cpu-bound operation (e.g. I/O,
//! database operations, etc.) should be expressed as futures or asynchronous functions. Async handlers get executed
//! concurrently by worker threads and thus don’t block execution.

use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use storefront_engine::{
    db_types::{NewAddress, NewCategory, NewOrder, NewPayment, NewProduct, NewStore},
    objects::{AddressUpdate, OrderQueryFilter, ProductUpdate},
    traits::{AddressBook, CartManagement, CatalogManagement, OrderFlow, PaymentManagement},
    AddressApi,
    CartApi,
    CatalogApi,
    OrderFlowApi,
    PaymentApi,
};

use crate::{
    data_objects::{
        AddToCartRequest,
        CreateCategoryRequest,
        CreateOrderRequest,
        CreatePaymentRequest,
        CreateProductRequest,
        JsonResponse,
        RazorpayOrderRequest,
        RazorpayVerifyRequest,
        UpdatePaymentStatusRequest,
        UpdateQuantityRequest,
    },
    errors::ServerError,
    integrations::razorpay::RazorpayApi,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/order" impl OrderFlow);
/// Route handler for the checkout endpoint.
///
/// The body carries the buyer, the store and the order lines. Prices are not part of the body; the server resolves
/// each line against the buyer's cart snapshot or the live product price. If any line cannot be filled, nothing is
/// reserved and a 400 is returned.
pub async fn create_order<B: OrderFlow>(
    body: web::Json<CreateOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST order for {} at store {}", req.user_id, req.store_id);
    let mut order = NewOrder::new(req.user_id, req.store_id, req.items);
    if let Some(address_id) = req.address_id {
        order = order.with_address(address_id);
    }
    let result = api.checkout(order).await?;
    Ok(HttpResponse::Created().json(result))
}

route!(order_by_id => Get "/order/{id}" impl OrderFlow);
pub async fn order_by_id<B: OrderFlow>(
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    debug!("💻️ GET order {order_id}");
    let order = api
        .order_with_items(order_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Order {order_id} not found")))?;
    Ok(HttpResponse::Ok().json(order))
}

route!(orders_for_user => Get "/order/user/{user_id}" impl OrderFlow);
pub async fn orders_for_user<B: OrderFlow>(
    path: web::Path<String>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = path.into_inner();
    debug!("💻️ GET orders for user {user_id}");
    let orders = api.search_orders(OrderQueryFilter::default().with_user_id(user_id)).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(orders_for_store => Get "/order/store/{store_id}" impl OrderFlow);
pub async fn orders_for_store<B: OrderFlow>(
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let store_id = path.into_inner();
    debug!("💻️ GET orders for store {store_id}");
    let orders = api.search_orders(OrderQueryFilter::default().with_store_id(store_id)).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(cancel_order => Delete "/order/{id}" impl OrderFlow);
/// Route handler for order cancellation.
///
/// The order row is retained with a `CANCELLED` status, stock is restored and any payment record is marked
/// `REFUNDED`. Cancelling an already-cancelled order is a 400.
pub async fn cancel_order<B: OrderFlow>(
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    debug!("💻️ DELETE order {order_id}");
    let cancelled = api.cancel_order(order_id).await?;
    Ok(HttpResponse::Ok().json(cancelled))
}

//----------------------------------------------   Cart  ----------------------------------------------------
route!(add_to_cart => Post "/cart/add" impl CartManagement);
/// Route handler for adding a product to a cart.
///
/// Quantity defaults to 1. Adding a product that is already in the cart merges quantities; the original price
/// snapshot on the row is kept.
pub async fn add_to_cart<B: CartManagement>(
    body: web::Json<AddToCartRequest>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST cart add {} × product {} for {}", req.quantity, req.product_id, req.user_id);
    let item = api.add_item(&req.user_id, req.product_id, req.quantity).await?;
    Ok(HttpResponse::Created().json(item))
}

route!(cart_for_user => Get "/cart/{user_id}" impl CartManagement);
pub async fn cart_for_user<B: CartManagement>(
    path: web::Path<String>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = path.into_inner();
    debug!("💻️ GET cart for {user_id}");
    let items = api.cart_items(&user_id).await?;
    Ok(HttpResponse::Ok().json(items))
}

route!(cart_total => Get "/cart/{user_id}/total" impl CartManagement);
pub async fn cart_total<B: CartManagement>(
    path: web::Path<String>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = path.into_inner();
    debug!("💻️ GET cart total for {user_id}");
    let total = api.cart_total(&user_id).await?;
    Ok(HttpResponse::Ok().json(total))
}

route!(update_cart_quantity => Patch "/cart/{cart_item_id}" impl CartManagement);
pub async fn update_cart_quantity<B: CartManagement>(
    path: web::Path<i64>,
    body: web::Json<UpdateQuantityRequest>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let cart_item_id = path.into_inner();
    debug!("💻️ PATCH cart item {cart_item_id}");
    let item = api.update_quantity(cart_item_id, body.quantity).await?;
    Ok(HttpResponse::Ok().json(item))
}

route!(clear_cart => Delete "/cart/clear/{user_id}" impl CartManagement);
pub async fn clear_cart<B: CartManagement>(
    path: web::Path<String>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = path.into_inner();
    debug!("💻️ DELETE cart for {user_id}");
    let cleared = api.clear_cart(&user_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Removed {cleared} item(s) from the cart"))))
}

route!(remove_cart_item => Delete "/cart/{cart_item_id}" impl CartManagement);
pub async fn remove_cart_item<B: CartManagement>(
    path: web::Path<i64>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let cart_item_id = path.into_inner();
    debug!("💻️ DELETE cart item {cart_item_id}");
    api.remove_item(cart_item_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Item removed from cart")))
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(create_payment => Post "/payment" impl PaymentManagement);
/// Route handler for recording a payment against an order.
///
/// Each order carries at most one payment record; a second POST for the same order is a 400.
pub async fn create_payment<B: PaymentManagement>(
    body: web::Json<CreatePaymentRequest>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST payment of {} ({}) for order {}", req.amount, req.method, req.order_id);
    let payment = api.create_payment(NewPayment::new(req.order_id, req.amount, req.method)).await?;
    Ok(HttpResponse::Created().json(payment))
}

route!(payment_by_id => Get "/payment/{id}" impl PaymentManagement);
pub async fn payment_by_id<B: PaymentManagement>(
    path: web::Path<i64>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let payment_id = path.into_inner();
    debug!("💻️ GET payment {payment_id}");
    let payment = api
        .payment_by_id(payment_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Payment {payment_id} not found")))?;
    Ok(HttpResponse::Ok().json(payment))
}

route!(payment_for_order => Get "/payment/order/{order_id}" impl PaymentManagement);
pub async fn payment_for_order<B: PaymentManagement>(
    path: web::Path<i64>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    debug!("💻️ GET payment for order {order_id}");
    let payment = api
        .payment_for_order(order_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("No payment recorded for order {order_id}")))?;
    Ok(HttpResponse::Ok().json(payment))
}

route!(update_payment_status => Patch "/payment/{id}/status" impl PaymentManagement);
pub async fn update_payment_status<B: PaymentManagement>(
    path: web::Path<i64>,
    body: web::Json<UpdatePaymentStatusRequest>,
    api: web::Data<PaymentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let payment_id = path.into_inner();
    debug!("💻️ PATCH payment {payment_id} status to {}", body.status);
    let payment = api.update_status(payment_id, body.status).await?;
    Ok(HttpResponse::Ok().json(payment))
}

//----------------------------------------------   Razorpay  ----------------------------------------------------
#[actix_web::post("/payment/razorpay/create-order")]
pub async fn razorpay_create_order(
    body: web::Json<RazorpayOrderRequest>,
    api: web::Data<RazorpayApi>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST razorpay create-order for {}", req.amount);
    let order = api.create_order(req.amount, req.receipt);
    Ok(HttpResponse::Created().json(order))
}

#[actix_web::post("/payment/razorpay/verify")]
pub async fn razorpay_verify(
    body: web::Json<RazorpayVerifyRequest>,
    api: web::Data<RazorpayApi>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    debug!("💻️ POST razorpay verify for gateway order {}", req.razorpay_order_id);
    if !api.verify_payment(&req) {
        return Err(ServerError::InvalidSignature);
    }
    Ok(HttpResponse::Ok().json(JsonResponse::success("Payment signature verified")))
}

//----------------------------------------------   Catalog  ----------------------------------------------------
route!(create_store => Post "/store" impl CatalogManagement);
pub async fn create_store<B: CatalogManagement>(
    body: web::Json<NewStore>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let store = body.into_inner();
    debug!("💻️ POST store {}", store.name);
    let store = api.create_store(store).await?;
    Ok(HttpResponse::Created().json(store))
}

route!(store_by_id => Get "/store/{id}" impl CatalogManagement);
pub async fn store_by_id<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let store_id = path.into_inner();
    debug!("💻️ GET store {store_id}");
    let store = api
        .store_by_id(store_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Store {store_id} not found")))?;
    Ok(HttpResponse::Ok().json(store))
}

route!(create_category => Post "/store/{store_id}/category" impl CatalogManagement);
pub async fn create_category<B: CatalogManagement>(
    path: web::Path<i64>,
    body: web::Json<CreateCategoryRequest>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let store_id = path.into_inner();
    debug!("💻️ POST category {} for store {store_id}", body.name);
    let category = api.create_category(NewCategory::new(store_id, body.into_inner().name)).await?;
    Ok(HttpResponse::Created().json(category))
}

route!(categories_for_store => Get "/store/{store_id}/categories" impl CatalogManagement);
pub async fn categories_for_store<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let store_id = path.into_inner();
    debug!("💻️ GET categories for store {store_id}");
    let categories = api.categories_for_store(store_id).await?;
    Ok(HttpResponse::Ok().json(categories))
}

route!(create_product => Post "/store/{store_id}/product" impl CatalogManagement);
pub async fn create_product<B: CatalogManagement>(
    path: web::Path<i64>,
    body: web::Json<CreateProductRequest>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let store_id = path.into_inner();
    let req = body.into_inner();
    debug!("💻️ POST product {} for store {store_id}", req.name);
    let product = api.create_product(NewProduct::new(store_id, req.category_id, req.name, req.price, req.stock)).await?;
    Ok(HttpResponse::Created().json(product))
}

route!(products_for_store => Get "/store/{store_id}/products" impl CatalogManagement);
pub async fn products_for_store<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let store_id = path.into_inner();
    debug!("💻️ GET products for store {store_id}");
    let products = api.products_for_store(store_id).await?;
    Ok(HttpResponse::Ok().json(products))
}

route!(product_by_id => Get "/product/{id}" impl CatalogManagement);
pub async fn product_by_id<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product_id = path.into_inner();
    debug!("💻️ GET product {product_id}");
    let product = api
        .product_by_id(product_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Product {product_id} not found")))?;
    Ok(HttpResponse::Ok().json(product))
}

route!(update_product => Patch "/product/{id}" impl CatalogManagement);
pub async fn update_product<B: CatalogManagement>(
    path: web::Path<i64>,
    body: web::Json<ProductUpdate>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product_id = path.into_inner();
    debug!("💻️ PATCH product {product_id}");
    let product = api.update_product(product_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

route!(delete_product => Delete "/product/{id}" impl CatalogManagement);
pub async fn delete_product<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product_id = path.into_inner();
    debug!("💻️ DELETE product {product_id}");
    api.delete_product(product_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Product {product_id} deleted"))))
}

//----------------------------------------------   Addresses  ----------------------------------------------------
route!(create_address => Post "/address" impl AddressBook);
pub async fn create_address<B: AddressBook>(
    body: web::Json<NewAddress>,
    api: web::Data<AddressApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let address = body.into_inner();
    debug!("💻️ POST address for {}", address.user_id);
    let address = api.create_address(address).await?;
    Ok(HttpResponse::Created().json(address))
}

route!(addresses_for_user => Get "/address/user/{user_id}" impl AddressBook);
pub async fn addresses_for_user<B: AddressBook>(
    path: web::Path<String>,
    api: web::Data<AddressApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = path.into_inner();
    debug!("💻️ GET addresses for {user_id}");
    let addresses = api.addresses_for_user(&user_id).await?;
    Ok(HttpResponse::Ok().json(addresses))
}

route!(address_by_id => Get "/address/{id}" impl AddressBook);
pub async fn address_by_id<B: AddressBook>(
    path: web::Path<i64>,
    api: web::Data<AddressApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let address_id = path.into_inner();
    debug!("💻️ GET address {address_id}");
    let address = api
        .address_by_id(address_id)
        .await?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Address {address_id} not found")))?;
    Ok(HttpResponse::Ok().json(address))
}

route!(update_address => Patch "/address/{id}" impl AddressBook);
pub async fn update_address<B: AddressBook>(
    path: web::Path<i64>,
    body: web::Json<AddressUpdate>,
    api: web::Data<AddressApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let address_id = path.into_inner();
    debug!("💻️ PATCH address {address_id}");
    let address = api.update_address(address_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(address))
}

route!(delete_address => Delete "/address/{id}" impl AddressBook);
pub async fn delete_address<B: AddressBook>(
    path: web::Path<i64>,
    api: web::Data<AddressApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let address_id = path.into_inner();
    debug!("💻️ DELETE address {address_id}");
    api.delete_address(address_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Address {address_id} deleted"))))
}
