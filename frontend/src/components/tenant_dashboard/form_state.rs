//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到请求对象的转换

use leptos::prelude::*;
use tenant_manager_shared::{CreateMaintenanceRequest, Department, MAX_DESCRIPTION_CHARS};

/// 租户提交表单的状态
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub unit_number: RwSignal<String>,
    pub department: RwSignal<Department>,
    pub description: RwSignal<String>,
}

impl FormState {
    /// 创建新的表单状态，部门默认为 Plumbing
    pub fn new() -> Self {
        Self {
            unit_number: RwSignal::new(String::new()),
            department: RwSignal::new(Department::default()),
            description: RwSignal::new(String::new()),
        }
    }

    /// 提交成功后清空表单
    pub fn reset(&self) {
        self.unit_number.set(String::new());
        self.department.set(Department::default());
        self.description.set(String::new());
    }

    /// 描述字数计数，如 `12/2000`
    pub fn description_counter(&self) -> String {
        let used = self.description.with(|d| d.chars().count());
        format!("{}/{}", used, MAX_DESCRIPTION_CHARS)
    }

    /// 将表单状态转换为 API 请求对象
    pub fn to_request(&self) -> CreateMaintenanceRequest {
        CreateMaintenanceRequest {
            unit_number: self.unit_number.get_untracked().trim().to_string(),
            description: self.description.get_untracked(),
            department: self.department.get_untracked(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
