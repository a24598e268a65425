use serde_json::Value;

use crate::client::api::{ApiTransport, RequestOptions};
use crate::error::ApiResult;

/// Serviço de workspaces
pub struct Workspaces<'a> {
    transport: &'a ApiTransport,
}

impl<'a> Workspaces<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    /// GET /workspaces
    pub async fn list(&self, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get("workspaces", options).await
    }

    /// GET /workspaces/{gid}
    pub async fn get(&self, gid: &str, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get(&format!("workspaces/{}", gid), options).await
    }

    /// PUT /workspaces/{gid}
    pub async fn update(&self, gid: &str, data: Value) -> ApiResult<Value> {
        self.transport.put(&format!("workspaces/{}", gid), data).await
    }

    /// GET /workspaces/{gid}/users
    pub async fn users(&self, gid: &str, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport
            .get(&format!("workspaces/{}/users", gid), options)
            .await
    }
}
