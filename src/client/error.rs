//! 客户端错误类型

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 401，调用方应跳转到 `/auth/signin`
    #[error("Not signed in")]
    Unauthenticated,

    /// 接口返回的 `error` 字段，原样保留
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ClientError {
    /// 从非 2xx 响应体构建错误；缺少 `error` 字段时退回状态码描述
    pub fn from_response_body(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
            });

        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// 是否需要重新登录
    pub fn requires_sign_in(&self) -> bool {
        matches!(self, ClientError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_body_used_verbatim() {
        let err = ClientError::from_response_body(
            StatusCode::CONFLICT,
            r#"{"error":"Product is out of stock","productId":"abc"}"#,
        );
        match &err {
            ClientError::Api { status, message } => {
                assert_eq!(*status, 409);
                assert_eq!(message, "Product is out of stock");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Product is out of stock");
    }

    #[test]
    fn test_missing_error_field_falls_back_to_reason() {
        let err = ClientError::from_response_body(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[test]
    fn test_requires_sign_in() {
        assert!(ClientError::Unauthenticated.requires_sign_in());
        assert!(!ClientError::InvalidQuery("x".to_string()).requires_sign_in());
    }
}
