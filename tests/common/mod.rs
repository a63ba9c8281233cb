//! 测试公共模块
//! 提供测试配置、应用状态和本地 HTTP 服务

#![allow(dead_code)]

use axum::Router;
use bizportal::{
    access::PermissionTable,
    auth::JwtService,
    config::{AppConfig, ClientConfig, LoggingConfig, SecurityConfig, ServerConfig},
    middleware::AppState,
    services::AccessService,
};
use secrecy::Secret;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// 创建测试配置
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(), // 使用随机端口
            graceful_shutdown_timeout_secs: 5,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new("test-secret-key-for-testing-only-min-32-chars".to_string()),
            access_token_exp_secs: 300,
            trust_proxy: false,
            allowed_ips: None,
        },
        client: ClientConfig {
            base_url: "http://127.0.0.1:3000".to_string(),
            api_token: None,
            request_timeout_secs: 5,
            abilities_timeout_ms: 1000,
            search_debounce_ms: 500,
            toast_duration_ms: 5000,
        },
    }
}

/// 创建测试应用状态
pub fn create_test_app_state(config: AppConfig) -> Arc<AppState> {
    let jwt_service =
        Arc::new(JwtService::from_config(&config).expect("Failed to create JWT service"));

    Arc::new(AppState {
        config,
        jwt_service,
        access_service: Arc::new(AccessService::new(PermissionTable::builtin())),
    })
}

/// 为指定角色签发令牌
pub fn token_for(state: &AppState, role: &str) -> String {
    state
        .jwt_service
        .generate_access_token("user-1", "testuser", role)
        .expect("Failed to issue token")
}

/// 在随机端口上启动服务（携带对端地址），返回监听地址
pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .expect("Test server failed");
    });

    addr
}

/// 指向本地服务的客户端配置
pub fn client_config_for(addr: SocketAddr) -> ClientConfig {
    ClientConfig {
        base_url: format!("http://{}", addr),
        ..create_test_config().client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_config() {
        let config = create_test_config();
        assert_eq!(config.server.addr, "127.0.0.1:0");
        assert!(config.validate().is_ok());
    }
}
