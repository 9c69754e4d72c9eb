//! 管理面板的数据流
//!
//! 与 UI 无关：筛选变化和行操作都在这里转成 API 调用。
//! 每次筛选变化只发出一次列表请求；每次修改之后（无论成败）整表重新拉取。

use std::str::FromStr;

use tenant_manager_shared::protocol::{ApiRequest, ListMaintenanceRequests};
use tenant_manager_shared::{Department, MaintenanceRequest, RequestStatus};
use uuid::Uuid;

use crate::api::TenantManagerApi;
use crate::error::ApiResult;
use crate::web::http::HttpClient;

/// 下拉框中表示"不过滤"的值
pub const FILTER_ALL: &str = "ALL";

pub const FETCH_FALLBACK: &str = "Failed to fetch requests";
const APPROVE_FALLBACK: &str = "Failed to approve request";
const REJECT_FALLBACK: &str = "Failed to reject request";
const STATUS_FALLBACK: &str = "Failed to update status";

/// 解析筛选下拉框的值，`ALL` 或无法识别的值都视为不过滤
pub fn parse_filter<T: FromStr>(value: &str) -> Option<T> {
    if value == FILTER_ALL {
        None
    } else {
        value.parse().ok()
    }
}

/// 筛选栏上的一次改动
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    Status(Option<RequestStatus>),
    Department(Option<Department>),
}

impl FilterChange {
    /// 在保留另一维度的前提下应用改动
    pub fn apply(self, filter: ListMaintenanceRequests) -> ListMaintenanceRequests {
        match self {
            FilterChange::Status(status) => filter.with_status(status),
            FilterChange::Department(department) => filter.with_department(department),
        }
    }
}

/// 表格行上的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Approve(Uuid),
    Reject(Uuid),
    SetStatus(Uuid, RequestStatus),
}

impl RowAction {
    fn fallback(&self) -> &'static str {
        match self {
            RowAction::Approve(_) => APPROVE_FALLBACK,
            RowAction::Reject(_) => REJECT_FALLBACK,
            RowAction::SetStatus(..) => STATUS_FALLBACK,
        }
    }

    async fn perform<C: HttpClient>(&self, api: &TenantManagerApi<C>) -> ApiResult<MaintenanceRequest> {
        match *self {
            RowAction::Approve(id) => api.approve(id).await,
            RowAction::Reject(id) => api.reject(id).await,
            RowAction::SetStatus(id, status) => api.update_status(id, status).await,
        }
    }
}

/// 按当前筛选拉取列表，失败时返回界面提示文本
pub async fn refresh<C: HttpClient>(
    api: &TenantManagerApi<C>,
    filter: &ListMaintenanceRequests,
) -> Result<Vec<MaintenanceRequest>, String> {
    log_info!("[Admin] Fetching {}", filter.path());
    api.list_maintenance(filter).await.map_err(|e| {
        log_error!("[Admin] Fetch failed: {}", e);
        e.user_message(FETCH_FALLBACK)
    })
}

/// 一次行操作的结果
///
/// `rows` 为重新拉取到的列表（拉取失败时为 None），`error` 为要展示的提示。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    pub rows: Option<Vec<MaintenanceRequest>>,
    pub error: Option<String>,
}

impl ActionOutcome {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// 执行行操作，然后用同一筛选整表重新拉取
///
/// 操作失败时同样重新拉取，保证表格与服务端一致；提示优先显示操作本身的错误。
pub async fn run_action<C: HttpClient>(
    api: &TenantManagerApi<C>,
    action: RowAction,
    filter: &ListMaintenanceRequests,
) -> ActionOutcome {
    let action_error = match action.perform(api).await {
        Ok(_) => {
            log_info!("[Admin] {:?} done, refreshing.", action);
            None
        }
        Err(e) => {
            log_error!("[Admin] {:?} failed: {}", action, e);
            Some(e.user_message(action.fallback()))
        }
    };

    match refresh(api, filter).await {
        Ok(rows) => ActionOutcome {
            rows: Some(rows),
            error: action_error,
        },
        Err(fetch_error) => ActionOutcome {
            rows: None,
            error: action_error.or(Some(fetch_error)),
        },
    }
}
