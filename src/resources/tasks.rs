use serde_json::{json, Value};

use crate::client::api::{ApiTransport, RequestOptions};
use crate::error::ApiResult;

/// Serviço de tasks
pub struct Tasks<'a> {
    transport: &'a ApiTransport,
}

impl<'a> Tasks<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    /// GET /tasks
    pub async fn list(&self, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get("tasks", options).await
    }

    /// POST /tasks
    pub async fn create(&self, data: Value) -> ApiResult<Value> {
        self.transport.post("tasks", data).await
    }

    /// GET /tasks/{gid}
    pub async fn get(&self, gid: &str, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get(&format!("tasks/{}", gid), options).await
    }

    /// PUT /tasks/{gid}
    pub async fn update(&self, gid: &str, data: Value) -> ApiResult<Value> {
        self.transport.put(&format!("tasks/{}", gid), data).await
    }

    /// DELETE /tasks/{gid}
    pub async fn delete(&self, gid: &str) -> ApiResult<Value> {
        self.transport.delete(&format!("tasks/{}", gid)).await
    }

    /// GET /tasks/{gid}/subtasks
    pub async fn subtasks(
        &self,
        gid: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<Value> {
        self.transport
            .get(&format!("tasks/{}/subtasks", gid), options)
            .await
    }

    /// POST /tasks/{gid}/subtasks
    pub async fn create_subtask(&self, gid: &str, data: Value) -> ApiResult<Value> {
        self.transport
            .post(&format!("tasks/{}/subtasks", gid), data)
            .await
    }

    /// POST /tasks/{gid}/addTag
    pub async fn add_tag(&self, gid: &str, tag_gid: &str) -> ApiResult<Value> {
        self.transport
            .post(&format!("tasks/{}/addTag", gid), json!({ "tag": tag_gid }))
            .await
    }

    /// POST /tasks/{gid}/removeTag
    pub async fn remove_tag(&self, gid: &str, tag_gid: &str) -> ApiResult<Value> {
        self.transport
            .post(&format!("tasks/{}/removeTag", gid), json!({ "tag": tag_gid }))
            .await
    }

    /// GET /projects/{gid}/tasks
    pub async fn list_for_project(
        &self,
        project_gid: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<Value> {
        self.transport
            .get(&format!("projects/{}/tasks", project_gid), options)
            .await
    }
}
