use crate::{
    AuthResponse, CreateMaintenanceRequest, Credentials, Department, MaintenanceRequest,
    RequestStatus,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }

    /// GET requests never carry a body.
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// The request value itself is serialized as the JSON body (unless the method is GET);
/// path parameters are marked `#[serde(skip)]`.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token is attached.
    const REQUIRES_AUTH: bool = true;
    /// The response body is an acknowledgement only and is not decoded.
    const ACKNOWLEDGE_ONLY: bool = false;
    /// The URL path (including any query string).
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for Credentials {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;

    fn path(&self) -> String {
        "/api/auth/signin".to_string()
    }
}

/// Invalidate the server-side session of the current token.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LogoutRequest {}

impl ApiRequest for LogoutRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;
    const ACKNOWLEDGE_ONLY: bool = true;

    fn path(&self) -> String {
        "/api/auth/logout".to_string()
    }
}

// =========================================================
// Admin
// =========================================================

/// List maintenance requests. `None` on an axis means "ALL".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMaintenanceRequests {
    #[serde(skip)]
    pub status: Option<RequestStatus>,
    #[serde(skip)]
    pub department: Option<Department>,
}

impl ListMaintenanceRequests {
    pub fn with_status(mut self, status: Option<RequestStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_department(mut self, department: Option<Department>) -> Self {
        self.department = department;
        self
    }

    /// `?status=..&department=..`, omitting unconstrained axes.
    pub fn query_string(&self) -> String {
        let mut params = Vec::with_capacity(2);
        if let Some(status) = self.status {
            params.push(format!("status={}", status.as_str()));
        }
        if let Some(department) = self.department {
            params.push(format!("department={}", department.as_str()));
        }
        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

impl ApiRequest for ListMaintenanceRequests {
    type Response = Vec<MaintenanceRequest>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/admin/maintenance{}", self.query_string())
    }
}

/// Approve a pending request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApproveRequest {
    #[serde(skip)]
    pub id: Uuid,
}

impl ApiRequest for ApproveRequest {
    type Response = MaintenanceRequest;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/admin/maintenance/{}/approve", self.id)
    }
}

/// Reject a pending request.
#[derive(Debug, Serialize, Deserialize)]
pub struct RejectRequest {
    #[serde(skip)]
    pub id: Uuid,
}

impl ApiRequest for RejectRequest {
    type Response = MaintenanceRequest;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/admin/maintenance/{}/reject", self.id)
    }
}

/// Set the status of a request.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(skip)]
    pub id: Uuid,
    pub status: RequestStatus,
}

impl ApiRequest for UpdateStatusRequest {
    type Response = MaintenanceRequest;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/admin/maintenance/{}/status", self.id)
    }
}

// =========================================================
// Tenant
// =========================================================

impl ApiRequest for CreateMaintenanceRequest {
    type Response = MaintenanceRequest;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/maintenance/create".to_string()
    }
}
