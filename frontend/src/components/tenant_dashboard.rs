//! 租户面板
//!
//! 单个表单：房号、部门、描述（最多 2000 字符）。
//! 校验在发出请求之前完成，成功后清空表单并显示成功提示。

mod form_state;

use leptos::prelude::*;
use leptos::task::spawn_local;
use tenant_manager_shared::{CreateMaintenanceRequest, Department, MAX_DESCRIPTION_CHARS};

use crate::api::TenantManagerApi;
use crate::auth::use_auth;
use crate::components::{Alert, AlertKind};
use crate::web::http::HttpClient;

use form_state::FormState;

const SUBMIT_SUCCESS: &str = "Maintenance request submitted successfully!";
const SUBMIT_FALLBACK: &str = "Failed to submit request";

/// 提交一个维修请求，返回界面提示文本
///
/// 校验失败时不会发出任何网络请求。
async fn submit_request<C: HttpClient>(
    api: &TenantManagerApi<C>,
    request: &CreateMaintenanceRequest,
) -> Result<&'static str, String> {
    match api.create_maintenance(request).await {
        Ok(created) => {
            log_info!("[Tenant] Request {} submitted.", created.id);
            Ok(SUBMIT_SUCCESS)
        }
        Err(e) => {
            log_error!("[Tenant] Submit failed: {}", e);
            Err(e.user_message(SUBMIT_FALLBACK))
        }
    }
}

#[component]
pub fn TenantDashboardPage() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user_signal();

    let state = FormState::new();
    let (is_submitting, set_is_submitting) = signal(false);
    let success_msg = RwSignal::new(Option::<String>::None);
    let error_msg = RwSignal::new(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let request = state.to_request();
        success_msg.set(None);
        error_msg.set(None);
        set_is_submitting.set(true);

        let api = auth.api();
        spawn_local(async move {
            match submit_request(&api, &request).await {
                Ok(message) => {
                    state.reset();
                    success_msg.set(Some(message.to_string()));
                }
                Err(message) => error_msg.set(Some(message)),
            }
            set_is_submitting.set(false);
        });
    };

    let display_name = move || {
        user.with(|u| {
            u.as_ref()
                .map(|u| u.username.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Tenant".to_string())
        })
    };
    let tenant_name = move || user.with(|u| u.as_ref().map(|u| u.username.clone()).unwrap_or_default());
    let display_role = move || user.with(|u| u.as_ref().map(|u| u.role.as_str()).unwrap_or(""));

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-2xl mx-auto space-y-6">
                <div>
                    <h2 class="text-2xl font-bold">"Welcome, " {display_name} "!"</h2>
                    <p class="text-base-content/70">"Role: " {display_role}</p>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit>
                        <h3 class="card-title">"Submit a Maintenance Request"</h3>

                        <Alert message=success_msg kind=AlertKind::Success />
                        <Alert message=error_msg kind=AlertKind::Error />

                        <div class="form-control">
                            <label for="tenant_name" class="label">
                                <span class="label-text">"Tenant Name"</span>
                            </label>
                            <input id="tenant_name"
                                type="text"
                                readonly
                                prop:value=tenant_name
                                class="input input-bordered w-full bg-base-200"
                            />
                        </div>

                        <div class="form-control">
                            <label for="unit_number" class="label">
                                <span class="label-text">"Unit Number"</span>
                            </label>
                            <input id="unit_number" required
                                type="text"
                                placeholder="e.g. 12B"
                                on:input=move |ev| state.unit_number.set(event_target_value(&ev))
                                prop:value=move || state.unit_number.get()
                                class="input input-bordered w-full"
                            />
                        </div>

                        <div class="form-control">
                            <label for="department" class="label">
                                <span class="label-text">"Department"</span>
                            </label>
                            <select
                                id="department"
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    if let Ok(department) = event_target_value(&ev).parse::<Department>() {
                                        state.department.set(department);
                                    }
                                }
                            >
                                {Department::ALL
                                    .into_iter()
                                    .map(|department| view! {
                                        <option
                                            value=department.as_str()
                                            selected=move || state.department.get() == department
                                        >
                                            {department.form_label()}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
                        </div>

                        <div class="form-control">
                            <label for="description" class="label">
                                <span class="label-text">"Description"</span>
                                <span class="label-text-alt">{move || state.description_counter()}</span>
                            </label>
                            <textarea id="description" required
                                rows="5"
                                maxlength=MAX_DESCRIPTION_CHARS.to_string()
                                placeholder="Describe the issue"
                                on:input=move |ev| state.description.set(event_target_value(&ev))
                                prop:value=move || state.description.get()
                                class="textarea textarea-bordered w-full"
                            ></textarea>
                        </div>

                        <div class="form-control mt-4">
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                                } else {
                                    "Submit Request".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
