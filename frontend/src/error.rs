use std::fmt;

use serde::Deserialize;
use tenant_manager_shared::ValidationError;

use crate::web::http::HttpError;

// =========================================================
// 错误类型枚举
// =========================================================

/// 前端可见的错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 网络/传输失败 (fetch 被拒绝)
    Network,
    /// 登录凭据无效
    Authentication,
    /// 令牌缺失或过期 (401/403)
    Authorization,
    /// 客户端校验失败，或服务端返回 400
    Validation,
    /// 其它非 2xx 响应
    Server,
    /// 请求/响应体无法 (反) 序列化
    Serialization,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Authentication => "INVALID_CREDENTIALS",
            ApiErrorKind::Authorization => "UNAUTHORIZED",
            ApiErrorKind::Validation => "INVALID_INPUT",
            ApiErrorKind::Server => "SERVER_ERROR",
            ApiErrorKind::Serialization => "JSON_PARSE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// API 调用错误
///
/// - kind: 错误语义
/// - status: HTTP 状态码（仅对已收到响应的错误存在）
/// - detail: 服务端或客户端校验给出的可展示消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, detail: Option<String>) -> Self {
        Self {
            kind,
            status: None,
            detail,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, Some(message.into()))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, Some(message.into()))
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Serialization, Some(message.into()))
    }

    /// 根据非 2xx 响应构造错误
    ///
    /// `anonymous` 表示请求未携带令牌（登录），此时 401 视为凭据错误。
    pub fn from_response(status: u16, body: &str, anonymous: bool) -> Self {
        let kind = match status {
            400 | 422 => ApiErrorKind::Validation,
            401 if anonymous => ApiErrorKind::Authentication,
            401 | 403 => ApiErrorKind::Authorization,
            _ => ApiErrorKind::Server,
        };
        Self {
            kind,
            status: Some(status),
            detail: extract_message(body),
        }
    }

    /// 界面展示用消息
    ///
    /// 优先使用服务端返回的消息，传输/解析失败时使用调用处提供的兜底文本。
    pub fn user_message(&self, fallback: &str) -> String {
        match self.kind {
            ApiErrorKind::Network | ApiErrorKind::Serialization => fallback.to_string(),
            _ => self
                .detail
                .clone()
                .unwrap_or_else(|| fallback.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.kind.error_code())?;
        if let Some(status) = self.status {
            write!(f, " HTTP {}", status)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, " {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RequestBuildFailed(msg) => ApiError::new(ApiErrorKind::Network, Some(msg)),
            HttpError::NetworkError(msg) | HttpError::ResponseReadFailed(msg) => {
                ApiError::network(msg)
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::validation(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::serialization(e.to_string())
    }
}

// =========================================================
// 响应体消息提取
// =========================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Object {
        #[serde(default)]
        message: Option<String>,
    },
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// 从失败响应中取出可展示的消息
///
/// JSON 对象的 `message` 字段 > JSON 字符串 > 非 JSON 的纯文本。
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let message = match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(ErrorBody::Object { message }) => message,
        Ok(ErrorBody::Text(text)) => Some(text),
        Ok(ErrorBody::Other(_)) => None,
        Err(_) => Some(trimmed.to_string()),
    };
    message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_comes_from_json_object() {
        let err = ApiError::from_response(400, r#"{"message":"Unit not found"}"#, false);
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(err.user_message("fallback"), "Unit not found");
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        let err = ApiError::from_response(400, "Request already approved\n", false);
        assert_eq!(err.user_message("fallback"), "Request already approved");
    }

    #[test]
    fn empty_or_messageless_body_falls_back() {
        let spring_default = r#"{"timestamp":"2024-01-01T00:00:00Z","status":401,"error":"Unauthorized","message":"","path":"/api/auth/signin"}"#;
        let err = ApiError::from_response(401, spring_default, true);
        assert_eq!(err.kind, ApiErrorKind::Authentication);
        assert_eq!(
            err.user_message("Login failed. Invalid Credentials."),
            "Login failed. Invalid Credentials."
        );

        let empty = ApiError::from_response(500, "", false);
        assert_eq!(empty.kind, ApiErrorKind::Server);
        assert_eq!(empty.user_message("Failed"), "Failed");
    }

    #[test]
    fn non_text_json_body_falls_back() {
        let list = ApiError::from_response(500, "[1, 2, 3]", false);
        assert_eq!(list.kind, ApiErrorKind::Server);
        assert_eq!(list.user_message("Failed to fetch requests"), "Failed to fetch requests");

        let number = ApiError::from_response(400, "42", false);
        assert_eq!(number.user_message("Failed to submit request"), "Failed to submit request");
    }

    #[test]
    fn expired_token_is_an_authorization_error() {
        let err = ApiError::from_response(401, "", false);
        assert_eq!(err.kind, ApiErrorKind::Authorization);
        assert_eq!(
            ApiError::from_response(403, "", false).kind,
            ApiErrorKind::Authorization
        );
    }

    #[test]
    fn transport_failures_never_leak_internal_details() {
        let err = ApiError::from(HttpError::NetworkError("JsValue(TypeError)".into()));
        assert_eq!(err.kind, ApiErrorKind::Network);
        assert_eq!(err.user_message("Failed to fetch requests"), "Failed to fetch requests");
    }
}
