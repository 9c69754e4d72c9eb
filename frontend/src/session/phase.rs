//! 会话状态机
//!
//! ```text
//! Anonymous --SubmitCredentials--> Authenticating --SignInSucceeded--> Authenticated(role)
//!     ^                                 |                                   |
//!     |<-----------SignInFailed---------+                          LogoutRequested
//!     |                                                                     v
//!     +<------------------------CleanupFinished------------------------ LoggingOut
//! ```
//!
//! 不合法的事件不会改变当前状态。

use tenant_manager_shared::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated(Role),
    LoggingOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// 登录表单提交
    SubmitCredentials,
    SignInSucceeded(Role),
    SignInFailed,
    /// 启动时从导航状态或本地存储恢复了身份
    Restored(Role),
    LogoutRequested,
    /// 本地会话已清理（无论服务端注销是否成功）
    CleanupFinished,
}

impl SessionPhase {
    pub fn on(self, event: SessionEvent) -> Self {
        use SessionEvent::*;
        use SessionPhase::*;

        match (self, event) {
            (Anonymous, SubmitCredentials) => Authenticating,
            (Authenticating, SignInSucceeded(role)) => Authenticated(role),
            (Authenticating, SignInFailed) => Anonymous,
            (Anonymous, Restored(role)) => Authenticated(role),
            (Authenticated(_), LogoutRequested) => LoggingOut,
            // 本地清理是无条件的
            (_, CleanupFinished) => Anonymous,
            (phase, _) => phase,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            SessionPhase::Authenticated(role) => Some(*role),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, SessionPhase::Authenticating | SessionPhase::LoggingOut)
    }
}

#[cfg(test)]
mod tests {
    use super::SessionEvent::*;
    use super::SessionPhase::*;
    use super::*;

    #[test]
    fn sign_in_then_logout_cycle() {
        let phase = Anonymous
            .on(SubmitCredentials)
            .on(SignInSucceeded(Role::Admin));
        assert_eq!(phase, Authenticated(Role::Admin));
        assert_eq!(phase.role(), Some(Role::Admin));

        let phase = phase.on(LogoutRequested);
        assert_eq!(phase, LoggingOut);
        assert!(phase.is_busy());
        assert_eq!(phase.on(CleanupFinished), Anonymous);
    }

    #[test]
    fn failed_sign_in_returns_to_anonymous() {
        assert_eq!(Anonymous.on(SubmitCredentials).on(SignInFailed), Anonymous);
    }

    #[test]
    fn out_of_order_events_are_ignored() {
        assert_eq!(Anonymous.on(SignInSucceeded(Role::Admin)), Anonymous);
        assert_eq!(Anonymous.on(LogoutRequested), Anonymous);
        assert_eq!(
            Authenticated(Role::Tenant).on(SubmitCredentials),
            Authenticated(Role::Tenant)
        );
        assert_eq!(
            Authenticated(Role::Tenant).on(Restored(Role::Admin)),
            Authenticated(Role::Tenant)
        );
    }

    #[test]
    fn cleanup_always_ends_anonymous() {
        for phase in [
            Anonymous,
            Authenticating,
            Authenticated(Role::Tenant),
            LoggingOut,
        ] {
            assert_eq!(phase.on(CleanupFinished), Anonymous);
        }
    }
}
