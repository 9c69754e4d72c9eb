use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub mod date;
pub mod protocol;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 本地存储中保存会话令牌的键
pub const STORAGE_TOKEN_KEY: &str = "token";
/// 本地存储中保存序列化用户信息的键
pub const STORAGE_USER_KEY: &str = "user";

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

/// 维修描述允许的最大字符数
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

// =========================================================
// 身份模型 (Identity)
// =========================================================

/// 用户角色
///
/// 未知的角色字符串一律按租户处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    Tenant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Tenant => "TENANT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 后端返回的用户信息（登录响应中的 `user` 字段）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub role: Role,
}

/// 已认证的身份：用户信息 + 会话令牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: UserProfile,
    pub token: String,
}

impl Identity {
    pub fn new(user: UserProfile, token: impl Into<String>) -> Self {
        Self {
            user,
            token: token.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.user.username
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// 用户名和密码（去除首尾空白后）都不能为空
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

impl From<AuthResponse> for Identity {
    fn from(resp: AuthResponse) -> Self {
        Identity::new(resp.user, resp.token)
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 维修部门
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    #[default]
    Plumbing,
    Electrical,
    Hvac,
    Carpentry,
    HouseholdFix,
    Painting,
    Cleaning,
    PestControl,
    ApplianceRepair,
    GeneralMaintenance,
}

impl Department {
    pub const ALL: [Department; 10] = [
        Department::Plumbing,
        Department::Electrical,
        Department::Hvac,
        Department::Carpentry,
        Department::HouseholdFix,
        Department::Painting,
        Department::Cleaning,
        Department::PestControl,
        Department::ApplianceRepair,
        Department::GeneralMaintenance,
    ];

    /// 线上传输使用的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Plumbing => "PLUMBING",
            Department::Electrical => "ELECTRICAL",
            Department::Hvac => "HVAC",
            Department::Carpentry => "CARPENTRY",
            Department::HouseholdFix => "HOUSEHOLD_FIX",
            Department::Painting => "PAINTING",
            Department::Cleaning => "CLEANING",
            Department::PestControl => "PEST_CONTROL",
            Department::ApplianceRepair => "APPLIANCE_REPAIR",
            Department::GeneralMaintenance => "GENERAL_MAINTENANCE",
        }
    }

    /// 筛选下拉框中的显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Department::Plumbing => "Plumbing",
            Department::Electrical => "Electrical",
            Department::Hvac => "HVAC",
            Department::Carpentry => "Carpentry",
            Department::HouseholdFix => "Household Fix",
            Department::Painting => "Painting",
            Department::Cleaning => "Cleaning",
            Department::PestControl => "Pest Control",
            Department::ApplianceRepair => "Appliance Repair",
            Department::GeneralMaintenance => "General Maintenance",
        }
    }

    /// 租户提交表单中的显示名称
    pub fn form_label(&self) -> &'static str {
        match self {
            Department::Hvac => "HVAC (Heating & Cooling)",
            other => other.label(),
        }
    }

    /// 表格中的徽章文本，如 `PEST CONTROL`
    pub fn badge_text(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownDepartment(s.to_string()))
    }
}

/// 维修请求状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Rejected,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Open,
        RequestStatus::InProgress,
        RequestStatus::Resolved,
        RequestStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "OPEN",
            RequestStatus::InProgress => "IN_PROGRESS",
            RequestStatus::Resolved => "RESOLVED",
            RequestStatus::Rejected => "REJECTED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Open => "Open",
            RequestStatus::InProgress => "In Progress",
            RequestStatus::Resolved => "Resolved",
            RequestStatus::Rejected => "Rejected",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            RequestStatus::Open => "status-open",
            RequestStatus::InProgress => "status-in-progress",
            RequestStatus::Resolved => "status-resolved",
            RequestStatus::Rejected => "status-rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

/// 后端持有的维修请求记录（前端只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: Uuid,
    #[serde(default)]
    pub tenant_name: String,
    #[serde(default)]
    pub unit_number: String,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl MaintenanceRequest {
    /// 仅未审批的请求可以执行批准/驳回
    pub fn awaiting_review(&self) -> bool {
        !self.approved
    }

    /// 表格"Approved"列的文本
    pub fn approval_label(&self) -> &'static str {
        if self.approved { "Yes" } else { "No" }
    }

    /// 表格"Approved"列的徽章样式
    pub fn approval_class(&self) -> &'static str {
        if self.approved {
            "approved-yes"
        } else {
            "approved-no"
        }
    }
}

/// 租户提交的新维修请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub unit_number: String,
    pub description: String,
    pub department: Department,
}

impl CreateMaintenanceRequest {
    /// 客户端校验，在发出任何网络请求之前执行
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.unit_number.trim().is_empty() {
            return Err(ValidationError::MissingUnitNumber);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        let len = self.description.chars().count();
        if len > MAX_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooLong(len));
        }
        Ok(())
    }
}

// =========================================================
// 校验错误 (Validation)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingCredentials,
    MissingUnitNumber,
    MissingDescription,
    /// 携带实际字符数
    DescriptionTooLong(usize),
    UnknownDepartment(String),
    UnknownStatus(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingCredentials => {
                write!(f, "Please enter both username and password")
            }
            ValidationError::MissingUnitNumber => write!(f, "Unit number is required"),
            ValidationError::MissingDescription => write!(f, "Description is required"),
            ValidationError::DescriptionTooLong(len) => write!(
                f,
                "Description must be at most {} characters (got {})",
                MAX_DESCRIPTION_CHARS, len
            ),
            ValidationError::UnknownDepartment(v) => write!(f, "Unknown department: {}", v),
            ValidationError::UnknownStatus(v) => write!(f, "Unknown status: {}", v),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_is_treated_as_tenant() {
        let user: UserProfile =
            serde_json::from_str(r#"{"username":"bob","role":"SUPERVISOR"}"#).unwrap();
        assert_eq!(user.role, Role::Tenant);

        let admin: UserProfile =
            serde_json::from_str(r#"{"username":"alice","role":"ADMIN"}"#).unwrap();
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn maintenance_request_parses_backend_entity() {
        let json = r#"{
            "id": "6f1c2a1e-8a53-4c8e-9d7a-0b7f3c1e2d44",
            "tenantName": "bob",
            "unitNumber": "12B",
            "description": "Leaking sink",
            "status": "IN_PROGRESS",
            "department": "PEST_CONTROL",
            "approved": true,
            "createdAt": "2024-03-05T10:15:30.123456Z",
            "updatedAt": 1709633730.5
        }"#;
        let req: MaintenanceRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.status, RequestStatus::InProgress);
        assert_eq!(req.department, Some(Department::PestControl));
        assert!(!req.awaiting_review());
        assert_eq!(req.created_at.unwrap().format_date(), "2024-03-05");
        assert_eq!(req.department.unwrap().badge_text(), "PEST CONTROL");
    }

    #[test]
    fn unapproved_request_awaits_review() {
        let json = r#"{
            "id": "0d9b6b0e-3f0e-4c55-a8a3-3c1f6a9d2b10",
            "tenantName": "dave",
            "unitNumber": "3C",
            "description": "No hot water",
            "status": "OPEN",
            "approved": false
        }"#;
        let mut req: MaintenanceRequest = serde_json::from_str(json).unwrap();
        assert!(req.awaiting_review());
        assert_eq!(req.approval_label(), "No");
        assert_eq!(req.approval_class(), "approved-no");

        req.approved = true;
        assert!(!req.awaiting_review());
        assert_eq!(req.approval_label(), "Yes");
        assert_eq!(req.approval_class(), "approved-yes");
    }

    #[test]
    fn create_request_serializes_camel_case() {
        let req = CreateMaintenanceRequest {
            unit_number: "4A".into(),
            description: "Broken heater".into(),
            department: Department::Hvac,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "unitNumber": "4A",
                "description": "Broken heater",
                "department": "HVAC"
            })
        );
    }

    #[test]
    fn description_limit_counts_characters() {
        let mut req = CreateMaintenanceRequest {
            unit_number: "1".into(),
            description: "é".repeat(MAX_DESCRIPTION_CHARS),
            department: Department::Plumbing,
        };
        assert!(req.validate().is_ok());

        req.description.push('x');
        assert_eq!(
            req.validate(),
            Err(ValidationError::DescriptionTooLong(MAX_DESCRIPTION_CHARS + 1))
        );
    }

    #[test]
    fn blank_fields_fail_validation() {
        let req = CreateMaintenanceRequest {
            unit_number: "  ".into(),
            description: "x".into(),
            department: Department::Plumbing,
        };
        assert_eq!(req.validate(), Err(ValidationError::MissingUnitNumber));
        assert_eq!(
            Credentials::new("bob", " ").validate(),
            Err(ValidationError::MissingCredentials)
        );
    }

    #[test]
    fn enum_names_round_trip_through_from_str() {
        for dept in Department::ALL {
            assert_eq!(dept.as_str().parse::<Department>(), Ok(dept));
        }
        for status in RequestStatus::ALL {
            assert_eq!(status.as_str().parse::<RequestStatus>(), Ok(status));
        }
        assert!("ALL".parse::<RequestStatus>().is_err());
    }
}
