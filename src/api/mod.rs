pub mod errors;
pub mod http_server;

pub use errors::ErrorResponse;
pub use http_server::{build_router, start_server, AskRequest, AskResponse};
