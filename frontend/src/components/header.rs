//! 应用顶栏
//!
//! 已登录时显示用户名、角色徽章和注销按钮。

use leptos::prelude::*;
use leptos::task::spawn_local;
use tenant_manager_shared::Role;

use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

fn role_badge_class(role: Role) -> &'static str {
    match role {
        Role::Admin => "badge badge-secondary",
        Role::Tenant => "badge badge-primary",
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let user = auth.user_signal();
    let phase = auth.phase_signal();

    let on_logout = move |_| {
        spawn_local(async move {
            auth.sign_out().await;
            router.navigate(AppRoute::Login);
        });
    };

    view! {
        <div class="navbar bg-base-100 shadow-xl">
            <div class="flex-1 gap-2">
                <a class="btn btn-ghost text-xl">"Tenant Manager"</a>
            </div>
            <Show when=move || user.with(|u| u.is_some())>
                <div class="flex-none gap-2 items-center">
                    <span class="hidden md:inline">
                        "Welcome, " {move || user.with(|u| u.as_ref().map(|u| u.username.clone()).unwrap_or_default())}
                    </span>
                    {move || user.with(|u| u.as_ref().map(|u| u.role)).map(|role| view! {
                        <span class=role_badge_class(role)>{role.as_str()}</span>
                    })}
                    <button
                        on:click=on_logout
                        disabled=move || phase.get().is_busy()
                        class="btn btn-outline btn-error btn-sm"
                    >
                        "Logout"
                    </button>
                </div>
            </Show>
        </div>
    }
}
