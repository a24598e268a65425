use serde_json::Value;

use crate::client::api::{ApiTransport, RequestOptions};
use crate::error::ApiResult;

/// Serviço de memberships
pub struct Memberships<'a> {
    transport: &'a ApiTransport,
}

impl<'a> Memberships<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    /// GET /memberships
    pub async fn list(&self, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get("memberships", options).await
    }

    /// POST /memberships
    pub async fn create(&self, data: Value) -> ApiResult<Value> {
        self.transport.post("memberships", data).await
    }

    /// GET /memberships/{gid}
    pub async fn get(&self, gid: &str, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get(&format!("memberships/{}", gid), options).await
    }

    /// DELETE /memberships/{gid}
    pub async fn delete(&self, gid: &str) -> ApiResult<Value> {
        self.transport.delete(&format!("memberships/{}", gid)).await
    }
}
