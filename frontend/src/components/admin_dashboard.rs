//! 管理员面板
//!
//! 列表 + 筛选 + 行操作。数据流见 `board` 模块。

mod board;
mod filter_bar;
mod request_row;

use leptos::prelude::*;
use leptos::task::spawn_local;
use tenant_manager_shared::MaintenanceRequest;
use tenant_manager_shared::protocol::ListMaintenanceRequests;

use crate::auth::use_auth;
use crate::components::{Alert, AlertKind};

use board::{FilterChange, RowAction};
use filter_bar::FilterBar;
use request_row::RequestRow;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user_signal();

    let filter = RwSignal::new(ListMaintenanceRequests::default());
    let requests = RwSignal::new(Vec::<MaintenanceRequest>::new());
    let (loading, set_loading) = signal(false);
    let error_msg = RwSignal::new(Option::<String>::None);
    // 操作失败后递增，强制重建各行，使下拉框回到服务端保存的状态
    let revision = RwSignal::new(0u64);

    let load = move |current: ListMaintenanceRequests| {
        let api = auth.api();
        set_loading.set(true);
        error_msg.set(None);
        spawn_local(async move {
            match board::refresh(&api, &current).await {
                Ok(list) => requests.set(list),
                Err(message) => error_msg.set(Some(message)),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    load(filter.get_untracked());

    let on_filter_change = move |change: FilterChange| {
        let next = change.apply(filter.get_untracked());
        if next != filter.get_untracked() {
            filter.set(next);
            load(next);
        }
    };

    let on_action = move |action: RowAction| {
        let api = auth.api();
        let current = filter.get_untracked();
        set_loading.set(true);
        error_msg.set(None);
        spawn_local(async move {
            let outcome = board::run_action(&api, action, &current).await;
            if outcome.failed() {
                revision.update(|r| *r += 1);
            }
            if let Some(list) = outcome.rows {
                requests.set(list);
            }
            error_msg.set(outcome.error);
            set_loading.set(false);
        });
    };

    let total = move || requests.with(|r| r.len());
    let display_name = move || {
        user.with(|u| {
            u.as_ref()
                .map(|u| u.username.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Admin".to_string())
        })
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-7xl mx-auto space-y-6">
                <h2 class="text-2xl font-bold">"Welcome, " {display_name} "!"</h2>
                <Alert message=error_msg kind=AlertKind::Error />

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body p-0">
                        <div class="flex items-center justify-between p-6 pb-2">
                            <div>
                                <h3 class="card-title">"Maintenance Requests"</h3>
                                <p class="text-base-content/70 text-sm">{move || format!("{} request(s)", total())}</p>
                            </div>
                            <button
                                on:click=move |_| load(filter.get_untracked())
                                disabled=move || loading.get()
                                class="btn btn-ghost btn-sm"
                            >
                                {move || if loading.get() { "Refreshing..." } else { "Refresh" }}
                            </button>
                        </div>

                        <FilterBar filter=filter on_change=on_filter_change />

                        <div class="overflow-x-auto w-full">
                            <table class="table table-zebra w-full">
                                <thead>
                                    <tr>
                                        <th>"Tenant"</th>
                                        <th>"Unit Number"</th>
                                        <th>"Department"</th>
                                        <th>"Description"</th>
                                        <th>"Status"</th>
                                        <th>"Approved"</th>
                                        <th class="hidden md:table-cell">"Created"</th>
                                        <th>"Update"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <Show when=move || loading.get() && total() == 0>
                                        <tr>
                                            <td colspan="9" class="text-center py-8 text-base-content/50">
                                                <span class="loading loading-dots loading-md"></span>
                                            </td>
                                        </tr>
                                    </Show>
                                    <Show when=move || !loading.get() && total() == 0>
                                        <tr>
                                            <td colspan="9" class="text-center py-8 text-base-content/50">
                                                "No maintenance requests found."
                                            </td>
                                        </tr>
                                    </Show>
                                    <For
                                        each=move || {
                                            let rev = revision.get();
                                            requests.get().into_iter().map(move |r| (rev, r)).collect::<Vec<_>>()
                                        }
                                        key=|(rev, r): &(u64, MaintenanceRequest)| (*rev, r.id, r.status, r.approved)
                                        children=move |(_, request)| view! {
                                            <RequestRow request=request on_action=on_action />
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
