//! Middleware components for request processing.
//!
//! Request ID tracking, request logging, the `x-actor` extractor and the
//! error-to-response mapping.

mod actor;
mod error_handler;
mod logging;
mod request_id;

pub use actor::{ACTOR_HEADER, ANONYMOUS_ACTOR, Actor};
pub use error_handler::{error_to_code, error_to_status_code, service_error_status};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
