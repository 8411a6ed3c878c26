mod app_error;
mod database;
mod service_error;

pub use app_error::{AppError, AppResult, ValidationFieldError};
pub use database::convert_diesel_error;
pub use service_error::{ServiceError, ServiceErrorKind, ServiceResult};
