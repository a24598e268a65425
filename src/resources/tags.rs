use serde_json::Value;

use crate::client::api::{ApiTransport, RequestOptions};
use crate::error::ApiResult;

/// Serviço de tags
///
/// Template sem estado sobre o transporte: cada método corresponde a um
/// endpoint fixo da família `/tags`.
pub struct Tags<'a> {
    transport: &'a ApiTransport,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    /// GET /tags
    pub async fn list(&self, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get("tags", options).await
    }

    /// POST /tags
    pub async fn create(&self, data: Value) -> ApiResult<Value> {
        self.transport.post("tags", data).await
    }

    /// GET /tags/{gid}
    pub async fn get(&self, gid: &str, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get(&format!("tags/{}", gid), options).await
    }

    /// PUT /tags/{gid}
    pub async fn update(&self, gid: &str, data: Value) -> ApiResult<Value> {
        self.transport.put(&format!("tags/{}", gid), data).await
    }

    /// DELETE /tags/{gid}
    pub async fn delete(&self, gid: &str) -> ApiResult<Value> {
        self.transport.delete(&format!("tags/{}", gid)).await
    }

    /// GET /workspaces/{gid}/tags
    pub async fn list_for_workspace(
        &self,
        workspace_gid: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<Value> {
        self.transport
            .get(&format!("workspaces/{}/tags", workspace_gid), options)
            .await
    }

    /// GET /tasks/{gid}/tags
    pub async fn list_for_task(
        &self,
        task_gid: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<Value> {
        self.transport
            .get(&format!("tasks/{}/tags", task_gid), options)
            .await
    }
}
