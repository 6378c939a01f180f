use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use storefront_engine::{AddressApiError, CartApiError, CatalogApiError, OrderFlowError, PaymentApiError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("The request cannot be fulfilled. {0}")]
    CannotFulfillRequest(String),
    #[error("Payment signature verification failed.")]
    InvalidSignature,
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::CannotFulfillRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidSignature => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::ProductNotFound(_) |
            OrderFlowError::OrderNotFound(_) |
            OrderFlowError::AddressNotFound(_) => Self::NoRecordFound(e.to_string()),
            OrderFlowError::InsufficientStock { .. } |
            OrderFlowError::InvalidQuantity(_) |
            OrderFlowError::EmptyOrder |
            OrderFlowError::OrderAlreadyCancelled(_) => Self::CannotFulfillRequest(e.to_string()),
            OrderFlowError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<CartApiError> for ServerError {
    fn from(e: CartApiError) -> Self {
        match e {
            CartApiError::ProductNotFound(_) | CartApiError::CartItemNotFound(_) => Self::NoRecordFound(e.to_string()),
            CartApiError::InsufficientStock { .. } | CartApiError::InvalidQuantity(_) => {
                Self::CannotFulfillRequest(e.to_string())
            },
            CartApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<PaymentApiError> for ServerError {
    fn from(e: PaymentApiError) -> Self {
        match e {
            PaymentApiError::OrderNotFound(_) | PaymentApiError::PaymentNotFound(_) => {
                Self::NoRecordFound(e.to_string())
            },
            PaymentApiError::PaymentAlreadyExists(_) => Self::CannotFulfillRequest(e.to_string()),
            PaymentApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<AddressApiError> for ServerError {
    fn from(e: AddressApiError) -> Self {
        match e {
            AddressApiError::AddressNotFound(_) => Self::NoRecordFound(e.to_string()),
            AddressApiError::UpdateNoOp => Self::CannotFulfillRequest(e.to_string()),
            AddressApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::StoreNotFound(_) |
            CatalogApiError::CategoryNotFound(_) |
            CatalogApiError::ProductNotFound(_) => Self::NoRecordFound(e.to_string()),
            CatalogApiError::CategoryStoreMismatch { .. } | CatalogApiError::UpdateNoOp => {
                Self::CannotFulfillRequest(e.to_string())
            },
            CatalogApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}
