//! 筛选栏组件
//!
//! 状态、部门两个下拉框，各带一个 `ALL` 选项。

use leptos::prelude::*;
use tenant_manager_shared::protocol::ListMaintenanceRequests;
use tenant_manager_shared::{Department, RequestStatus};

use super::board::{FILTER_ALL, FilterChange, parse_filter};

#[component]
pub fn FilterBar(
    /// 当前筛选
    #[prop(into)]
    filter: Signal<ListMaintenanceRequests>,
    #[prop(into)] on_change: Callback<FilterChange>,
) -> impl IntoView {
    view! {
        <div class="flex flex-wrap gap-4 px-6">
            <div class="form-control">
                <label for="status_filter" class="label">
                    <span class="label-text">"Status"</span>
                </label>
                <select
                    id="status_filter"
                    class="select select-bordered select-sm"
                    on:change=move |ev| {
                        let status = parse_filter::<RequestStatus>(&event_target_value(&ev));
                        on_change.run(FilterChange::Status(status));
                    }
                >
                    <option value=FILTER_ALL selected=move || filter.get().status.is_none()>"All"</option>
                    {RequestStatus::ALL
                        .into_iter()
                        .map(|status| view! {
                            <option
                                value=status.as_str()
                                selected=move || filter.get().status == Some(status)
                            >
                                {status.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-control">
                <label for="department_filter" class="label">
                    <span class="label-text">"Department"</span>
                </label>
                <select
                    id="department_filter"
                    class="select select-bordered select-sm"
                    on:change=move |ev| {
                        let department = parse_filter::<Department>(&event_target_value(&ev));
                        on_change.run(FilterChange::Department(department));
                    }
                >
                    <option value=FILTER_ALL selected=move || filter.get().department.is_none()>"All"</option>
                    {Department::ALL
                        .into_iter()
                        .map(|department| view! {
                            <option
                                value=department.as_str()
                                selected=move || filter.get().department == Some(department)
                            >
                                {department.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}
