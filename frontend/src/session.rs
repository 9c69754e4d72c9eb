//! 会话/授权流程
//!
//! `Session` 把 API 客户端（默认 Authorization 头）、持久化存储和状态机组合在一起，
//! 不依赖任何 Leptos 信号，UI 层通过 `auth::AuthContext` 驱动它。

mod phase;
mod store;

pub use phase::{SessionEvent, SessionPhase};
pub use store::SessionStore;

use tenant_manager_shared::{Credentials, Identity, Role, UserProfile};

use crate::api::TenantManagerApi;
use crate::error::ApiResult;
use crate::web::http::{FetchHttpClient, HttpClient};
use crate::web::storage::{KeyValueStore, LocalStorage};

#[derive(Debug, Clone)]
pub struct Session<C = FetchHttpClient, S = LocalStorage> {
    api: TenantManagerApi<C>,
    store: SessionStore<S>,
    phase: SessionPhase,
    identity: Option<Identity>,
}

impl<C: HttpClient, S: KeyValueStore> Session<C, S> {
    pub fn new(api: TenantManagerApi<C>, store: SessionStore<S>) -> Self {
        Self {
            api,
            store,
            phase: SessionPhase::Anonymous,
            identity: None,
        }
    }

    // --- Accessors ---

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.identity.as_ref().map(|i| &i.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.phase.role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// 已带上默认 Authorization 的 API 客户端
    pub fn api(&self) -> &TenantManagerApi<C> {
        &self.api
    }

    // --- Transitions ---

    /// 应用启动时恢复身份
    ///
    /// 导航状态中的用户信息优先（同时写回存储），否则读取持久化的身份。
    pub fn restore(&mut self, navigation_user: Option<UserProfile>) -> Option<&Identity> {
        let identity = match navigation_user {
            Some(user) => self.store.adopt_user(&user),
            None => self.store.load(),
        };

        match identity {
            Some(identity) => {
                self.api.set_bearer(identity.token.clone());
                self.phase = self.phase.on(SessionEvent::Restored(identity.role()));
                self.identity = Some(identity);
            }
            None => {
                self.api.clear_bearer();
                self.identity = None;
                self.phase = SessionPhase::Anonymous;
            }
        }
        self.identity.as_ref()
    }

    /// 标记开始登录（用于在请求返回之前更新界面）
    pub fn begin_sign_in(&mut self) {
        self.phase = self.phase.on(SessionEvent::SubmitCredentials);
    }

    /// 登录
    ///
    /// 成功：持久化令牌和用户信息，设置默认 Authorization，返回用户信息。
    /// 失败：本地会话保持为空，不自动重试。
    pub async fn sign_in(&mut self, credentials: &Credentials) -> ApiResult<UserProfile> {
        self.begin_sign_in();

        let result = match credentials.validate() {
            Ok(()) => self.api.sign_in(credentials).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(resp) => {
                let identity = Identity::from(resp);
                self.store.save(&identity);
                self.api.set_bearer(identity.token.clone());
                self.phase = self
                    .phase
                    .on(SessionEvent::SignInSucceeded(identity.role()));
                log_info!(
                    "[Session] Signed in as {} ({})",
                    identity.username(),
                    identity.role()
                );
                let user = identity.user.clone();
                self.identity = Some(identity);
                Ok(user)
            }
            Err(e) => {
                log_warn!(
                    "[Session] Sign-in failed for {}: {}",
                    credentials.username,
                    e
                );
                self.clear_local();
                self.phase = self.phase.on(SessionEvent::SignInFailed);
                Err(e)
            }
        }
    }

    /// 标记开始注销
    pub fn begin_sign_out(&mut self) {
        self.phase = self.phase.on(SessionEvent::LogoutRequested);
    }

    /// 注销
    ///
    /// 尽力通知服务端使会话失效；无论成功与否，本地会话都会被清理。
    pub async fn sign_out(&mut self) {
        self.begin_sign_out();

        let token = self
            .api
            .bearer()
            .map(str::to_string)
            .or_else(|| self.store.token());

        if let Some(token) = token {
            if let Err(e) = self.api.logout(&token).await {
                log_warn!("[Session] Logout request failed, continuing locally: {}", e);
            }
        }

        self.clear_local();
        self.phase = self.phase.on(SessionEvent::CleanupFinished);
    }

    fn clear_local(&mut self) {
        self.store.clear();
        self.api.clear_bearer();
        self.identity = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;
    use crate::web::http::MockHttpClient;
    use crate::web::route::AppRoute;
    use crate::web::storage::MemoryStorage;
    use serde_json::json;
    use tenant_manager_shared::protocol::HttpMethod;
    use tenant_manager_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY};

    const SIGNIN_URL: &str = "http://api.test/api/auth/signin";
    const LOGOUT_URL: &str = "http://api.test/api/auth/logout";

    struct Harness {
        client: MockHttpClient,
        storage: MemoryStorage,
        session: Session<MockHttpClient, MemoryStorage>,
    }

    fn harness(storage: MemoryStorage) -> Harness {
        let client = MockHttpClient::new();
        let session = Session::new(
            TenantManagerApi::with_client("http://api.test", client.clone()),
            SessionStore::new(storage.clone()),
        );
        Harness {
            client,
            storage,
            session,
        }
    }

    fn mock_sign_in(client: &MockHttpClient, role: &str) {
        client.mock_json(
            HttpMethod::Post,
            SIGNIN_URL,
            200,
            json!({ "token": "jwt-abc", "user": { "username": "dana", "role": role } }),
        );
    }

    #[tokio::test]
    async fn admin_sign_in_lands_on_admin_view() {
        let mut h = harness(MemoryStorage::new());
        mock_sign_in(&h.client, "ADMIN");

        let user = h
            .session
            .sign_in(&Credentials::new("dana", "secret"))
            .await
            .unwrap();

        assert_eq!(AppRoute::home_for(user.role), AppRoute::AdminDashboard);
        assert_eq!(h.session.phase(), SessionPhase::Authenticated(Role::Admin));
        assert_eq!(h.session.identity().unwrap().token, "jwt-abc");
        assert_eq!(h.session.api().authorization().as_deref(), Some("Bearer jwt-abc"));
        assert_eq!(h.storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("jwt-abc"));
        assert!(h.storage.get(STORAGE_USER_KEY).is_some());
    }

    #[tokio::test]
    async fn tenant_sign_in_lands_on_tenant_view() {
        let mut h = harness(MemoryStorage::new());
        mock_sign_in(&h.client, "TENANT");

        let user = h
            .session
            .sign_in(&Credentials::new("dana", "secret"))
            .await
            .unwrap();

        assert_eq!(AppRoute::home_for(user.role), AppRoute::TenantDashboard);
        assert_eq!(h.session.role(), Some(Role::Tenant));
    }

    #[tokio::test]
    async fn failed_sign_in_leaves_store_empty() {
        let mut h = harness(MemoryStorage::new());
        h.client
            .mock_response(HttpMethod::Post, SIGNIN_URL, 401, "Invalid username or password");

        let err = h
            .session
            .sign_in(&Credentials::new("dana", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Authentication);
        assert_eq!(
            err.user_message("Login failed. Invalid Credentials."),
            "Invalid username or password"
        );
        assert_eq!(h.session.phase(), SessionPhase::Anonymous);
        assert!(h.session.identity().is_none());
        assert!(h.storage.is_empty());
        assert_eq!(h.session.api().authorization(), None);
    }

    #[tokio::test]
    async fn unreachable_server_on_sign_in_leaves_store_empty() {
        let mut h = harness(MemoryStorage::new());
        h.client.mock_network_error(HttpMethod::Post, SIGNIN_URL);

        let err = h
            .session
            .sign_in(&Credentials::new("dana", "secret"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Network);
        assert!(h.storage.is_empty());
        assert!(!h.session.is_authenticated());
    }

    #[tokio::test]
    async fn blank_credentials_are_rejected_before_any_request() {
        let mut h = harness(MemoryStorage::new());

        let err = h
            .session
            .sign_in(&Credentials::new("", "secret"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(h.client.request_count(), 0);
        assert_eq!(h.session.phase(), SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn logout_clears_everything_even_when_server_is_down() {
        let mut h = harness(MemoryStorage::new());
        mock_sign_in(&h.client, "TENANT");
        h.session
            .sign_in(&Credentials::new("dana", "secret"))
            .await
            .unwrap();
        h.client.mock_network_error(HttpMethod::Post, LOGOUT_URL);

        h.session.sign_out().await;

        assert_eq!(h.session.phase(), SessionPhase::Anonymous);
        assert!(h.storage.is_empty());
        assert_eq!(h.session.api().authorization(), None);
        let (_, url, headers, _) = h.client.requests().last().cloned().unwrap();
        assert_eq!(url, LOGOUT_URL);
        assert!(headers.contains(&("Authorization".to_string(), "Bearer jwt-abc".to_string())));
    }

    #[tokio::test]
    async fn logout_clears_everything_when_server_rejects() {
        let mut h = harness(MemoryStorage::new());
        mock_sign_in(&h.client, "ADMIN");
        h.session
            .sign_in(&Credentials::new("dana", "secret"))
            .await
            .unwrap();
        h.client
            .mock_response(HttpMethod::Post, LOGOUT_URL, 500, "Logout failed");

        h.session.sign_out().await;

        assert!(h.storage.is_empty());
        assert!(!h.session.is_authenticated());
    }

    #[tokio::test]
    async fn logout_without_token_skips_the_server() {
        let mut h = harness(MemoryStorage::new());

        h.session.sign_out().await;

        assert_eq!(h.client.request_count(), 0);
        assert_eq!(h.session.phase(), SessionPhase::Anonymous);
    }

    #[test]
    fn restore_prefers_navigation_state() {
        let storage = MemoryStorage::new()
            .with_entry(STORAGE_TOKEN_KEY, "jwt-xyz")
            .with_entry(STORAGE_USER_KEY, r#"{"username":"old","role":"TENANT"}"#);
        let mut h = harness(storage);

        let nav_user = UserProfile {
            username: "erin".into(),
            role: Role::Admin,
        };
        let identity = h.session.restore(Some(nav_user.clone())).cloned().unwrap();

        assert_eq!(identity.user, nav_user);
        assert_eq!(h.session.phase(), SessionPhase::Authenticated(Role::Admin));
        assert_eq!(h.session.api().bearer(), Some("jwt-xyz"));
        assert!(h.storage.get(STORAGE_USER_KEY).unwrap().contains("erin"));
    }

    #[test]
    fn restore_falls_back_to_storage() {
        let storage = MemoryStorage::new()
            .with_entry(STORAGE_TOKEN_KEY, "jwt-xyz")
            .with_entry(STORAGE_USER_KEY, r#"{"username":"frank","role":"TENANT"}"#);
        let mut h = harness(storage);

        let identity = h.session.restore(None).cloned().unwrap();
        assert_eq!(identity.username(), "frank");
        assert_eq!(h.session.role(), Some(Role::Tenant));
    }

    #[test]
    fn corrupted_storage_restores_to_anonymous() {
        let storage = MemoryStorage::new()
            .with_entry(STORAGE_TOKEN_KEY, "jwt-xyz")
            .with_entry(STORAGE_USER_KEY, "\u{0}garbage");
        let mut h = harness(storage);

        assert!(h.session.restore(None).is_none());
        assert_eq!(h.session.phase(), SessionPhase::Anonymous);
        assert!(h.storage.is_empty());
        assert_eq!(h.session.api().authorization(), None);
    }
}
