//! 请求表格行
//!
//! 状态下拉框随时可改；批准/驳回按钮只在未审批时出现。

use leptos::prelude::*;
use tenant_manager_shared::{MaintenanceRequest, RequestStatus};

use super::board::RowAction;

/// 行的展示数据（不依赖 DOM）
#[derive(Debug, Clone, PartialEq, Eq)]
struct RowModel {
    department: String,
    created: String,
    approval_label: &'static str,
    approval_class: &'static str,
    shows_review_actions: bool,
}

impl RowModel {
    fn of(request: &MaintenanceRequest) -> Self {
        Self {
            department: request
                .department
                .map(|d| d.badge_text())
                .unwrap_or_else(|| "-".to_string()),
            created: request
                .created_at
                .as_ref()
                .map(|t| t.format_date())
                .unwrap_or_else(|| "-".to_string()),
            approval_label: request.approval_label(),
            approval_class: request.approval_class(),
            shows_review_actions: request.awaiting_review(),
        }
    }
}

#[component]
pub fn RequestRow(
    request: MaintenanceRequest,
    #[prop(into)] on_action: Callback<RowAction>,
) -> impl IntoView {
    let model = RowModel::of(&request);
    let id = request.id;
    let current = request.status;
    let shows_review_actions = model.shows_review_actions;

    view! {
        <tr>
            <td class="font-bold">{request.tenant_name}</td>
            <td>{request.unit_number}</td>
            <td>
                <span class="badge badge-ghost">{model.department}</span>
            </td>
            <td class="max-w-xs whitespace-normal">{request.description}</td>
            <td>
                <span class=format!("badge {}", current.badge_class())>{current.label()}</span>
            </td>
            <td>
                <span class=format!("badge {}", model.approval_class)>{model.approval_label}</span>
            </td>
            <td class="hidden md:table-cell">{model.created}</td>
            <td>
                <select
                    class="select select-bordered select-xs"
                    prop:value=current.as_str()
                    on:change=move |ev| {
                        if let Ok(status) = event_target_value(&ev).parse::<RequestStatus>() {
                            if status != current {
                                on_action.run(RowAction::SetStatus(id, status));
                            }
                        }
                    }
                >
                    {RequestStatus::ALL
                        .into_iter()
                        .map(|status| view! {
                            <option value=status.as_str() selected=status == current>
                                {status.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
            </td>
            <td class="text-right">
                <Show when=move || shows_review_actions>
                    <div class="join">
                        <button
                            class="btn btn-success btn-xs join-item"
                            on:click=move |_| on_action.run(RowAction::Approve(id))
                        >
                            "Approve"
                        </button>
                        <button
                            class="btn btn-error btn-xs join-item"
                            on:click=move |_| on_action.run(RowAction::Reject(id))
                        >
                            "Reject"
                        </button>
                    </div>
                </Show>
            </td>
        </tr>
    }
}
