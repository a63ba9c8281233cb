//! 权限相关的 HTTP 处理器

use crate::{
    auth::AuthContext,
    error::AppError,
    middleware::AppState,
    models::{ModuleAccess, UserAbilitiesResponse},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// 当前用户的能力列表
pub async fn get_user_abilities(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let abilities = state.access_service.abilities_for(&auth_context);

    tracing::debug!(
        user_id = %auth_context.user_id,
        role = %auth_context.role,
        count = abilities.len(),
        "Abilities resolved"
    );

    Ok(Json(UserAbilitiesResponse {
        role: auth_context.role,
        abilities: abilities.into_iter().collect(),
    }))
}

/// 列出模块及当前用户的访问结果
pub async fn list_modules(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let modules = state.access_service.module_overview(&auth_context);

    Ok(Json(json!({
        "modules": modules,
        "count": modules.len()
    })))
}

/// 单个模块的访问结果；未注册模块返回 accessible=false
pub async fn module_access(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(module): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let table = state.access_service.table();

    Ok(Json(ModuleAccess {
        accessible: state.access_service.can_access_module(&auth_context, &module),
        required: table.required_abilities_for_module(&module).into_iter().collect(),
        module,
    }))
}

/// 当前用户可见的导航树
pub async fn navigation(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let items = state.access_service.visible_navigation(&auth_context);

    Ok(Json(json!({ "items": items })))
}

/// 角色能力表
pub async fn list_roles(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    state
        .access_service
        .require_ability(&auth_context, "roles.view")?;

    let roles = state.access_service.role_table();

    Ok(Json(json!({
        "roles": roles,
        "count": roles.len()
    })))
}

/// 权限表一致性报告
pub async fn validate_permissions(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    state
        .access_service
        .require_ability(&auth_context, "settings.view")?;

    Ok(Json(state.access_service.table().validate()))
}
