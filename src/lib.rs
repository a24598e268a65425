//! # Asana v1 Rust Crate
//!
//! Uma biblioteca Rust para integração com a API v1.0 do Asana.
//!
//! ## Features
//!
//! - Autenticação OAuth2 (authorization code + refresh token)
//! - Personal access tokens (sem expiração, sem refresh)
//! - Persistência de token em arquivo JSON
//! - Cliente HTTP assíncrono com três modos de resposta (full, normal, data)
//! - Serviços de recursos: tags, projects, tasks, workspaces, memberships, users
//!
//! ## Exemplo
//!
//! ```no_run
//! use asana_v1::{Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let mut client = Client::with_personal_access_token(config, "0/abcdef...")?;
//!     let me = client.users().await?.me(None).await?;
//!     println!("Usuário: {}", me);
//!     Ok(())
//! }
//! ```

/// Módulo de autenticação OAuth2
pub mod auth;

/// Módulo de cliente API
pub mod client;

/// Módulo de configuração
pub mod config;

/// Módulo de tratamento de erros
pub mod error;

/// Módulo de serviços de recursos
pub mod resources;

// Re-exportações para conveniência
pub use auth::oauth::OAuthApp;
pub use auth::storage::TokenStorage;
pub use auth::token::AccessToken;
pub use client::api::{ApiTransport, FullResponse, RequestOptions, ResponseMode, ShapedResponse};
pub use client::facade::{Client, InvalidReason, TokenStatus};
pub use config::Config;
pub use error::{ApiResult, Error};
