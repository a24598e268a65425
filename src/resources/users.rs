use serde_json::Value;

use crate::client::api::{ApiTransport, RequestOptions};
use crate::error::ApiResult;

/// Serviço de users
pub struct Users<'a> {
    transport: &'a ApiTransport,
}

impl<'a> Users<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    /// GET /users
    pub async fn list(&self, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get("users", options).await
    }

    /// GET /users/{gid}
    pub async fn get(&self, gid: &str, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get(&format!("users/{}", gid), options).await
    }

    /// GET /users/me - usuário autenticado
    pub async fn me(&self, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get("users/me", options).await
    }
}
