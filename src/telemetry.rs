//! 结构化日志初始化
//! `RUST_LOG` 优先于配置中的级别

use crate::config::AppConfig;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    EnvFilter, Layer,
};

/// 安装全局订阅者；重复调用返回错误
pub fn init_telemetry(config: &AppConfig) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let fmt_layer = if config.logging.format.eq_ignore_ascii_case("json") {
        // 生产环境：每行一个 JSON 对象，span 关闭时输出耗时
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_events(FmtSpan::CLOSE)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().pretty().with_target(false).boxed()
    };

    tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()?;

    tracing::debug!(
        level = %config.logging.level,
        format = %config.logging.format,
        "Logging initialized"
    );
    Ok(())
}
