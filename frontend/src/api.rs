use tenant_manager_shared::protocol::{
    ApiRequest, ApproveRequest, ListMaintenanceRequests, LogoutRequest, RejectRequest,
    UpdateStatusRequest,
};
use tenant_manager_shared::{
    AuthResponse, BEARER_PREFIX, CreateMaintenanceRequest, Credentials, HEADER_AUTHORIZATION,
    MaintenanceRequest, RequestStatus,
};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::web::http::{FetchHttpClient, HttpClient, HttpRequest};

/// 后端 REST API 客户端
///
/// `bearer` 相当于默认的 Authorization 头：登录成功后设置，注销时清除。
#[derive(Clone, Debug, PartialEq)]
pub struct TenantManagerApi<C = FetchHttpClient> {
    pub base_url: String,
    bearer: Option<String>,
    client: C,
}

impl TenantManagerApi<FetchHttpClient> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, FetchHttpClient)
    }
}

impl<C: HttpClient> TenantManagerApi<C> {
    pub fn with_client(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            bearer: None,
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 设置默认的 bearer 令牌
    pub fn set_bearer(&mut self, token: impl Into<String>) {
        self.bearer = Some(token.into());
    }

    /// 清除默认的 bearer 令牌
    pub fn clear_bearer(&mut self) {
        self.bearer = None;
    }

    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    /// 当前的 Authorization 头值
    pub fn authorization(&self) -> Option<String> {
        self.bearer
            .as_ref()
            .map(|token| format!("{}{}", BEARER_PREFIX, token))
    }

    /// 发送一个类型化请求
    pub async fn send<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        self.send_with_token(request, self.bearer.as_deref()).await
    }

    async fn send_with_token<R: ApiRequest>(
        &self,
        request: &R,
        token: Option<&str>,
    ) -> ApiResult<R::Response> {
        let url = self.url(&request.path());
        let mut req = HttpRequest::new(&url, R::METHOD).with_header("Content-Type", "application/json");

        if R::REQUIRES_AUTH {
            if let Some(token) = token {
                req = req.with_header(HEADER_AUTHORIZATION, &format!("{}{}", BEARER_PREFIX, token));
            }
        }
        if R::METHOD.has_body() {
            req = req.with_body(serde_json::to_string(request)?);
        }

        let res = self.client.send(req).await?;
        if !res.ok() {
            return Err(ApiError::from_response(
                res.status,
                &res.body,
                !R::REQUIRES_AUTH,
            ));
        }

        let body = if R::ACKNOWLEDGE_ONLY {
            "null"
        } else {
            res.body.as_str()
        };
        Ok(serde_json::from_str::<R::Response>(body)?)
    }

    // =========================================================
    // 认证
    // =========================================================

    /// 登录
    pub async fn sign_in(&self, credentials: &Credentials) -> ApiResult<AuthResponse> {
        self.send(credentials).await
    }

    /// 使指定令牌对应的服务端会话失效
    pub async fn logout(&self, token: &str) -> ApiResult<()> {
        self.send_with_token(&LogoutRequest::default(), Some(token))
            .await
    }

    // =========================================================
    // 管理员
    // =========================================================

    /// 获取维修请求列表
    pub async fn list_maintenance(
        &self,
        filter: &ListMaintenanceRequests,
    ) -> ApiResult<Vec<MaintenanceRequest>> {
        self.send(filter).await
    }

    /// 批准请求
    pub async fn approve(&self, id: Uuid) -> ApiResult<MaintenanceRequest> {
        self.send(&ApproveRequest { id }).await
    }

    /// 驳回请求
    pub async fn reject(&self, id: Uuid) -> ApiResult<MaintenanceRequest> {
        self.send(&RejectRequest { id }).await
    }

    /// 更新请求状态
    pub async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> ApiResult<MaintenanceRequest> {
        self.send(&UpdateStatusRequest { id, status }).await
    }

    // =========================================================
    // 租户
    // =========================================================

    /// 提交维修请求（先做客户端校验）
    pub async fn create_maintenance(
        &self,
        request: &CreateMaintenanceRequest,
    ) -> ApiResult<MaintenanceRequest> {
        request.validate()?;
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::web::http::MockHttpClient;
    use serde_json::json;
    use tenant_manager_shared::protocol::HttpMethod;
    use tenant_manager_shared::{Department, MAX_DESCRIPTION_CHARS};

    const BASE: &str = "http://api.test";

    fn api_with(client: &MockHttpClient) -> TenantManagerApi<MockHttpClient> {
        TenantManagerApi::with_client(format!("{}/", BASE), client.clone())
    }

    fn entity(id: Uuid, approved: bool) -> serde_json::Value {
        json!({
            "id": id,
            "tenantName": "bob",
            "unitNumber": "7C",
            "description": "Door stuck",
            "department": "CARPENTRY",
            "status": "OPEN",
            "approved": approved,
            "createdAt": "2024-05-01T08:00:00Z"
        })
    }

    #[tokio::test]
    async fn sign_in_is_sent_without_authorization() {
        let client = MockHttpClient::new();
        client.mock_json(
            HttpMethod::Post,
            "http://api.test/api/auth/signin",
            200,
            json!({ "token": "jwt-1", "user": { "username": "alice", "role": "ADMIN" } }),
        );
        let mut api = api_with(&client);
        api.set_bearer("stale");

        let resp = api.sign_in(&Credentials::new("alice", "pw")).await.unwrap();
        assert_eq!(resp.token, "jwt-1");

        let reqs = client.requests();
        assert_eq!(reqs.len(), 1);
        let (method, url, headers, body) = &reqs[0];
        assert_eq!(method, "POST");
        assert_eq!(url, "http://api.test/api/auth/signin");
        assert!(headers.iter().all(|(k, _)| k != HEADER_AUTHORIZATION));
        assert_eq!(
            body.as_deref(),
            Some(r#"{"username":"alice","password":"pw"}"#)
        );
    }

    #[tokio::test]
    async fn bearer_is_injected_into_admin_calls() {
        let client = MockHttpClient::new();
        let id = Uuid::new_v4();
        client.mock_json(
            HttpMethod::Put,
            &format!("http://api.test/api/admin/maintenance/{}/status", id),
            200,
            entity(id, false),
        );
        let mut api = api_with(&client);
        api.set_bearer("jwt-2");

        let updated = api.update_status(id, RequestStatus::InProgress).await.unwrap();
        assert_eq!(updated.id, id);

        let reqs = client.requests();
        let (_, _, headers, body) = &reqs[0];
        assert!(headers.contains(&(HEADER_AUTHORIZATION.to_string(), "Bearer jwt-2".to_string())));
        assert_eq!(body.as_deref(), Some(r#"{"status":"IN_PROGRESS"}"#));
    }

    #[tokio::test]
    async fn list_uses_get_without_body() {
        let client = MockHttpClient::new();
        client.mock_json(
            HttpMethod::Get,
            "http://api.test/api/admin/maintenance?department=PLUMBING",
            200,
            json!([entity(Uuid::new_v4(), true)]),
        );
        let api = api_with(&client);

        let filter = ListMaintenanceRequests::default().with_department(Some(Department::Plumbing));
        let list = api.list_maintenance(&filter).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(client.requests()[0].3, None);
    }

    #[tokio::test]
    async fn logout_accepts_plain_text_acknowledgement() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "http://api.test/api/auth/logout",
            200,
            "Logged out successfully",
        );
        let api = api_with(&client);

        api.logout("jwt-3").await.unwrap();
        let (_, _, headers, _) = &client.requests()[0];
        assert!(headers.contains(&(HEADER_AUTHORIZATION.to_string(), "Bearer jwt-3".to_string())));
    }

    #[tokio::test]
    async fn oversized_description_never_reaches_the_network() {
        let client = MockHttpClient::new();
        let api = api_with(&client);
        let request = CreateMaintenanceRequest {
            unit_number: "1A".into(),
            description: "x".repeat(MAX_DESCRIPTION_CHARS + 1),
            department: Department::Plumbing,
        };

        let err = api.create_maintenance(&request).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn non_success_status_surfaces_server_message() {
        let client = MockHttpClient::new();
        let id = Uuid::new_v4();
        client.mock_response(
            HttpMethod::Put,
            &format!("http://api.test/api/admin/maintenance/{}/approve", id),
            400,
            "Request not found",
        );
        let api = api_with(&client);

        let err = api.approve(id).await.unwrap_err();
        assert_eq!(err.status, Some(400));
        assert_eq!(err.user_message("Failed to approve request"), "Request not found");
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_serialization_error() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            "http://api.test/api/admin/maintenance",
            200,
            "<html>proxy error</html>",
        );
        let api = api_with(&client);

        let err = api
            .list_maintenance(&ListMaintenanceRequests::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Serialization);
    }
}
