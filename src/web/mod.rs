mod error;
mod flash;
mod log;
pub mod midware;
pub mod routes;
mod serve;
pub mod types;

pub use error::{ClientError, Error, WebResult};
pub use serve::{serve, shutdown_signal};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
pub const FLASH_ERROR_MSG: &str = "_flasherr";
