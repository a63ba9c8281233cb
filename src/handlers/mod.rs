//! HTTP 处理器模块

pub mod access;
pub mod health;

use crate::error::AppError;

/// 未匹配路由
pub async fn not_found() -> AppError {
    AppError::NotFound
}
