//! 统一错误处理
//!
//! 提供应用级错误类型 [`AppError`]，实现 `IntoResponse`，
//! 响应体保持与既有前端兼容的形状（阿拉伯语消息原样保留）：
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | `Validation` | 400 | `{"message": ...}` |
//! | `BusinessRule` | 400 | `{"message": ...}` |
//! | `NotFound` | 404 | `{"message": ...}` |
//! | `InvalidCredentials` | 401 | `{"success": false, "message": ...}` |
//! | `Internal` | 500 | `{"message": ...}` (详情只写日志) |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// 登录失败的统一消息
const MSG_INVALID_CREDENTIALS: &str = "اسم المستخدم او كلمة المرور غير صحيحة";

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 请求格式错误 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 业务规则违反: 用户名重复、库存不足 (400)
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// 资源不存在 (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 用户名或密码错误 (401)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// 内部错误 (500)，消息对外、详情写日志
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// 错误响应体
#[derive(Debug, Serialize)]
struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, success, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, None, msg),
            AppError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, None, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, None, msg),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Some(false),
                MSG_INVALID_CREDENTIALS.to_string(),
            ),
            AppError::Internal(msg) => {
                error!(target: "internal", "Internal error surfaced as 500: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, None, msg)
            }
        };

        (status, Json(ErrorBody { success, message })).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        Self::BusinessRule(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
