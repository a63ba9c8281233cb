//! 业务门户访问服务主入口

use bizportal::{
    access::PermissionTable, auth::JwtService, config::AppConfig, handlers::health,
    middleware::AppState, routes, services::AccessService, telemetry,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("bizportal {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            "--check-permissions" => {
                return check_permissions();
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    if let Ok(env) = std::env::var("PORTAL_ENV") {
        dotenv::from_filename(format!(".env.{}", env)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::dotenv().ok();
    }

    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志
    telemetry::init_telemetry(&config)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Portal access service starting...");

    // 3. 权限表一致性检查（只告警，不阻止启动）
    let table = PermissionTable::builtin();
    let report = table.validate();
    if report.is_valid {
        tracing::info!(
            abilities = table.ability_keys().count(),
            modules = table.module_names().count(),
            "Permission table validated"
        );
    } else {
        for error in &report.errors {
            tracing::warn!(error = %error, "Permission table inconsistency");
        }
    }

    // 4. 构建应用状态
    let app_state = Arc::new(AppState {
        jwt_service: Arc::new(JwtService::from_config(&config)?),
        access_service: Arc::new(AccessService::new(table)),
        config: config.clone(),
    });

    // 5. 构建路由
    let app = routes::create_router(app_state);

    // 6. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, "Server listening");

    // 7. 优雅关闭
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal(config.server.graceful_shutdown_timeout_secs))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 打印权限表一致性报告，有错误时以非零码退出
fn check_permissions() -> anyhow::Result<()> {
    let report = bizportal::access::validate_permissions();
    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.is_valid {
        std::process::exit(2);
    }
    Ok(())
}

/// 优雅关闭信号处理
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }

    // 超时后强制退出
    tokio::spawn(async move {
        tokio::time::sleep(tokio::time::Duration::from_secs(timeout_secs)).await;
        tracing::warn!("Graceful shutdown timeout reached, forcing exit");
        std::process::exit(1);
    });
}

/// 打印帮助信息
fn print_help() {
    println!("bizportal {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: bizportal [选项]");
    println!();
    println!("选项:");
    println!("  --version             打印版本信息并退出");
    println!("  --help                打印此帮助信息并退出");
    println!("  --check-permissions   检查权限表一致性并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过 PORTAL_ 前缀的环境变量完成");
}
