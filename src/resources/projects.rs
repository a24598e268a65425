use serde_json::Value;

use crate::client::api::{ApiTransport, RequestOptions};
use crate::error::ApiResult;

/// Serviço de projects
pub struct Projects<'a> {
    transport: &'a ApiTransport,
}

impl<'a> Projects<'a> {
    pub(crate) fn new(transport: &'a ApiTransport) -> Self {
        Self { transport }
    }

    /// GET /projects
    pub async fn list(&self, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get("projects", options).await
    }

    /// POST /projects
    pub async fn create(&self, data: Value) -> ApiResult<Value> {
        self.transport.post("projects", data).await
    }

    /// GET /projects/{gid}
    pub async fn get(&self, gid: &str, options: Option<&RequestOptions>) -> ApiResult<Value> {
        self.transport.get(&format!("projects/{}", gid), options).await
    }

    /// PUT /projects/{gid}
    pub async fn update(&self, gid: &str, data: Value) -> ApiResult<Value> {
        self.transport.put(&format!("projects/{}", gid), data).await
    }

    /// DELETE /projects/{gid}
    pub async fn delete(&self, gid: &str) -> ApiResult<Value> {
        self.transport.delete(&format!("projects/{}", gid)).await
    }

    /// POST /projects/{gid}/duplicate
    pub async fn duplicate(&self, gid: &str, data: Value) -> ApiResult<Value> {
        self.transport
            .post(&format!("projects/{}/duplicate", gid), data)
            .await
    }

    /// GET /workspaces/{gid}/projects
    pub async fn list_for_workspace(
        &self,
        workspace_gid: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<Value> {
        self.transport
            .get(&format!("workspaces/{}/projects", workspace_gid), options)
            .await
    }

    /// GET /projects/{gid}/task_counts
    pub async fn task_counts(
        &self,
        gid: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<Value> {
        self.transport
            .get(&format!("projects/{}/task_counts", gid), options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_duplicate_project() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/1.0/projects/1331/duplicate"))
            .and(body_json(json!({"data": {"name": "Cópia", "include": "task_notes"}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"gid": "job-7", "resource_type": "job"}
            })))
            .mount(&server)
            .await;

        let transport = ApiTransport::new("t", &format!("{}/api/1.0", server.uri()), 5).unwrap();
        let job = Projects::new(&transport)
            .duplicate("1331", json!({"name": "Cópia", "include": "task_notes"}))
            .await
            .unwrap();

        assert_eq!(job["gid"], "job-7");
    }

    #[tokio::test]
    async fn test_list_with_pagination_options() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/1.0/projects"))
            .and(wiremock::matchers::query_param("limit", "50"))
            .and(wiremock::matchers::query_param("offset", "tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let transport = ApiTransport::new("t", &format!("{}/api/1.0", server.uri()), 5).unwrap();
        let options = RequestOptions::new().limit(50).offset("tok123");
        let projects = Projects::new(&transport).list(Some(&options)).await.unwrap();

        assert_eq!(projects, json!([]));
    }
}
