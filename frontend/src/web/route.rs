//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、守卫规则以及按角色的跳转表。

use std::fmt::Display;

use tenant_manager_shared::Role;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 租户面板 (需要认证)
    TenantDashboard,
    /// 管理员面板 (需要管理员角色)
    AdminDashboard,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/tenant-dashboard" => Self::TenantDashboard,
            "/admin-dashboard" => Self::AdminDashboard,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::TenantDashboard => "/tenant-dashboard",
            Self::AdminDashboard => "/admin-dashboard",
            Self::NotFound => "/404",
        }
    }

    /// **角色跳转表：登录成功后的落地页只由角色决定**
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::Tenant => Self::TenantDashboard,
        }
    }

    /// 定义该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::TenantDashboard | Self::AdminDashboard)
    }

    /// 已认证用户是否有权访问此路由
    pub fn allows(&self, role: Role) -> bool {
        match self {
            Self::AdminDashboard => role == Role::Admin,
            _ => true,
        }
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// **核心守卫逻辑**
    ///
    /// 返回当前角色下实际应当展示的路由；与 `self` 相同表示放行。
    pub fn guard(self, role: Option<Role>) -> Self {
        match role {
            None if self.requires_auth() => Self::auth_failure_redirect(),
            Some(role) if self.should_redirect_when_authenticated() => Self::home_for(role),
            Some(role) if !self.allows(role) => Self::home_for(role),
            _ => self,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
