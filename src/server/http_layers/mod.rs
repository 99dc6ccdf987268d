mod error_details;
mod requests_logging;

pub use error_details::expose_error_details;
pub use requests_logging::{log_requests, RequestsLoggingLevel};
