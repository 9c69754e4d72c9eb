use leptos::prelude::*;
use leptos::task::spawn_local;
use tenant_manager_shared::Credentials;

use crate::auth::use_auth;
use crate::components::{Alert, AlertKind};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 登录失败且服务端没有给出消息时的兜底文本
const LOGIN_FALLBACK: &str = "Login failed. Invalid Credentials.";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let error_msg = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let credentials = Credentials::new(username.get_untracked(), password.get_untracked());
        if let Err(e) = credentials.validate() {
            error_msg.set(Some(e.to_string()));
            return;
        }

        set_is_submitting.set(true);
        error_msg.set(None);

        spawn_local(async move {
            match auth.sign_in(credentials).await {
                Ok(user) => {
                    set_is_submitting.set(false);
                    router.navigate_with_user(AppRoute::home_for(user.role), &user);
                }
                Err(e) => {
                    error_msg.set(Some(e.user_message(LOGIN_FALLBACK)));
                    set_is_submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Sign In"</h1>
                    <p class="text-base-content/70">"Tenant Manager"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Alert message=error_msg kind=AlertKind::Error />

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
