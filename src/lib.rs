//! 业务门户访问控制库
//! 权限表、能力解析、导航过滤，以及列表页使用的辅助逻辑

pub mod access;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
