//! 门户令牌认证
//!
//! 令牌中的角色只是字符串；未知角色照常放行，由权限表解析为空能力集。

use crate::{access::Role, auth::jwt::JwtService, error::AppError};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 已认证的门户用户
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub username: String,
    pub role: String,
}

impl AuthContext {
    /// 已知角色；未知角色返回 None
    pub fn known_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// `Authorization: Bearer <token>`
pub fn extract_token(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or(AppError::Unauthorized)
}

/// 必须认证
pub async fn jwt_auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers())?;
    let claims = jwt_service.validate_access_token(&token)?;

    let context = AuthContext {
        user_id: claims.sub,
        username: claims.username,
        role: claims.role,
    };

    if context.known_role().is_none() {
        tracing::warn!(user_id = %context.user_id, role = %context.role, "Token carries unknown role");
    }

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}
