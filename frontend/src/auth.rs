//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的角色信号来检查访问权限。
//! 会话的真正逻辑在 `session` 模块中，这里只负责把它放进信号里供组件共享。

use leptos::prelude::*;
use tenant_manager_shared::{Credentials, Identity, Role, UserProfile};

use crate::api::TenantManagerApi;
use crate::config::AppConfig;
use crate::error::ApiResult;
use crate::session::{Session, SessionPhase, SessionStore};
use crate::web::storage::LocalStorage;

/// 浏览器中使用的会话类型
pub type AppSession = Session;
/// 浏览器中使用的 API 客户端类型
pub type AppApi = TenantManagerApi;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<AppSession>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<AppSession>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new(config: &AppConfig) -> Self {
        let session = Session::new(
            TenantManagerApi::new(config.api_base_url.clone()),
            SessionStore::new(LocalStorage),
        );
        let (state, set_state) = signal(session);
        Self { state, set_state }
    }

    /// 获取当前角色信号（用于路由服务注入）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.role()))
    }

    /// 当前用户信息信号
    pub fn user_signal(&self) -> Signal<Option<UserProfile>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user().cloned()))
    }

    pub fn phase_signal(&self) -> Signal<SessionPhase> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.phase()))
    }

    /// 当前已带上 Authorization 的 API 客户端
    pub fn api(&self) -> AppApi {
        self.state.with_untracked(|s| s.api().clone())
    }

    /// 应用启动时恢复会话
    pub fn init(&self, navigation_user: Option<UserProfile>) -> Option<Identity> {
        let mut restored = None;
        self.set_state.update(|session| {
            restored = session.restore(navigation_user).cloned();
        });
        restored
    }

    /// 登录
    ///
    /// 请求期间先把 Authenticating 状态写回信号，完成后写回最终会话。
    pub async fn sign_in(&self, credentials: Credentials) -> ApiResult<UserProfile> {
        self.set_state.update(|session| session.begin_sign_in());

        let mut session = self.state.get_untracked();
        let result = session.sign_in(&credentials).await;
        self.set_state.set(session);
        result
    }

    /// 注销
    ///
    /// 服务端调用失败只记录日志，本地会话总是被清理。
    pub async fn sign_out(&self) {
        self.set_state.update(|session| session.begin_sign_out());

        let mut session = self.state.get_untracked();
        session.sign_out().await;
        self.set_state.set(session);
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
