pub mod api;
pub mod facade;

pub use api::{ApiTransport, FullResponse, RequestOptions, ResponseMode, ShapedResponse};
pub use facade::{Client, InvalidReason, TokenStatus};
