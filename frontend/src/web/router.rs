//! 路由引擎
//!
//! 唯一接触 `window.history` / `popstate` 的地方。
//! 每次跳转（主动导航、浏览器前进后退、会话结束）都先经过 `AppRoute::guard`，
//! 再写入 History 并更新当前路由信号。
//! 登录后的跳转会把用户信息作为 History state 一并写入，供目标页面恢复会话。

use leptos::prelude::*;
use tenant_manager_shared::{Role, UserProfile};
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// History 写入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    /// 新增一条记录（正常导航）
    Push,
    /// 覆盖当前记录（重定向）
    Replace,
}

fn location_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(mode: HistoryMode, path: &str, state: &JsValue) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let written = match mode {
        HistoryMode::Push => history.push_state_with_url(state, "", Some(path)),
        HistoryMode::Replace => history.replace_state_with_url(state, "", Some(path)),
    };
    if let Err(e) = written {
        log_warn!("[Router] Failed to write history for {}: {:?}", path, e);
    }
}

/// 读取当前 History state 中携带的用户信息
///
/// state 不存在或无法解析时返回 None。
pub fn navigation_user() -> Option<UserProfile> {
    let state = web_sys::window()?.history().ok()?.state().ok()?;
    let raw = state.as_string()?;
    serde_json::from_str(&raw).ok()
}

/// 路由服务
///
/// 角色信号由外部注入，路由层不关心会话如何建立。
#[derive(Clone, Copy)]
pub struct RouterService {
    route: RwSignal<AppRoute>,
    role: Signal<Option<Role>>,
}

impl RouterService {
    /// 初始路由同样经过守卫，被拒绝时覆盖当前 History 记录
    fn new(role: Signal<Option<Role>>) -> Self {
        let requested = AppRoute::from_path(&location_path());
        let allowed = requested.guard(role.get_untracked());
        if allowed != requested {
            log_info!("[Router] {} is not reachable, starting at {}.", requested, allowed);
            write_history(HistoryMode::Replace, allowed.to_path(), &JsValue::NULL);
        }

        Self {
            route: RwSignal::new(allowed),
            role,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.route.read_only()
    }

    /// 导航到指定路由（经过守卫）
    pub fn navigate(&self, target: AppRoute) {
        self.go(target, JsValue::NULL);
    }

    /// 导航并通过 History state 携带用户信息
    pub fn navigate_with_user(&self, target: AppRoute, user: &UserProfile) {
        let state = match serde_json::to_string(user) {
            Ok(json) => JsValue::from_str(&json),
            Err(e) => {
                log_warn!("[Router] Could not attach user to navigation: {}", e);
                JsValue::NULL
            }
        };
        self.go(target, state);
    }

    fn go(&self, target: AppRoute, state: JsValue) {
        let resolved = target.guard(self.role.get_untracked());
        if resolved != target {
            log_info!("[Router] {} denied, going to {} instead.", target, resolved);
        }

        // 已在目标页面且无需携带状态时不重复压栈
        if resolved == self.route.get_untracked() && state.is_null() {
            return;
        }

        write_history(HistoryMode::Push, resolved.to_path(), &state);
        self.route.set(resolved);
    }

    /// 会话变为匿名且当前页面需要认证时，重定向到登录页
    ///
    /// 登录成功后的跳转由登录页显式完成，以便携带用户信息。
    fn watch_session(&self) {
        let route = self.route;
        let role = self.role;

        Effect::new(move |_| {
            if role.get().is_some() {
                return;
            }
            let here = route.get_untracked();
            if here.requires_auth() {
                let login = AppRoute::auth_failure_redirect();
                log_info!("[Router] Session ended on {}, going to {}.", here, login);
                write_history(HistoryMode::Push, login.to_path(), &JsValue::NULL);
                route.set(login);
            }
        });
    }

    /// 浏览器前进/后退同样经过守卫
    fn watch_popstate(&self) {
        let route = self.route;
        let role = self.role;

        let on_popstate = Closure::<dyn Fn()>::new(move || {
            let requested = AppRoute::from_path(&location_path());
            let allowed = requested.guard(role.get_untracked());
            if allowed != requested {
                write_history(HistoryMode::Replace, allowed.to_path(), &JsValue::NULL);
            }
            route.set(allowed);
        });

        if let Some(window) = web_sys::window() {
            if let Err(e) = window
                .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
            {
                log_error!("[Router] Failed to listen for popstate: {:?}", e);
            }
        }

        // 监听器与页面同寿命
        on_popstate.forget();
    }
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>().expect("RouterService should be provided by <Router>")
}

// ============================================================================
// 组件
// ============================================================================

/// 在 App 根部创建路由服务并放入 Context
#[component]
pub fn Router(
    /// 当前角色，None 表示未认证
    role: Signal<Option<Role>>,
    children: Children,
) -> impl IntoView {
    let router = RouterService::new(role);
    router.watch_popstate();
    router.watch_session();
    provide_context(router);

    children()
}

/// 渲染当前路由对应的页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current_route().get())
}
