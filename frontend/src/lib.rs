//! Tenant Manager 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与守卫（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话/授权流程（与 UI 无关）
//! - `auth`: 把会话放进信号供组件共享
//! - `components`: UI 组件层

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

mod api;
mod auth;
mod config;
mod error;
mod session;
mod components {
    pub mod admin_dashboard;
    mod alert;
    pub mod header;
    pub mod login;
    pub mod tenant_dashboard;

    pub use alert::{Alert, AlertKind};
}

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装（fetch / localStorage / history）。
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod storage;
}

use crate::auth::AuthContext;
use crate::components::admin_dashboard::AdminDashboardPage;
use crate::components::header::Header;
use crate::components::login::LoginPage;
use crate::components::tenant_dashboard::TenantDashboardPage;
use crate::config::AppConfig;

use leptos::prelude::*;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet, navigation_user};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::TenantDashboard => view! { <TenantDashboardPage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="not-found">
                <h1>"404"</h1>
                <p>"Page not found"</p>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 解析配置（后端地址）
    let config = AppConfig::load();
    log_info!("[App] Using API base {}", config.api_base_url);
    provide_context(config.clone());

    // 2. 创建认证上下文
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    // 3. 恢复会话：导航状态优先，其次本地存储
    if let Some(identity) = auth_ctx.init(navigation_user()) {
        log_info!(
            "[App] Restored session for {} ({}).",
            identity.username(),
            identity.role()
        );
    }

    // 4. 获取角色信号，用于注入路由服务
    let role = auth_ctx.role_signal();

    view! {
        <div class="App">
            <Router role=role>
                <Header />
                <RouterOutlet matcher=route_matcher />
            </Router>
        </div>
    }
}
