pub mod oauth;
pub mod storage;
pub mod token;

pub use oauth::OAuthApp;
pub use storage::TokenStorage;
pub use token::{AccessToken, TokenResponse};
