//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, ConfigError, Environment};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址，例如 "0.0.0.0:3000"
    pub addr: String,
    /// 优雅关闭超时时间（秒）
    pub graceful_shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// 会话令牌签名密钥（与会话提供方共享）
    pub jwt_secret: Secret<String>,
    /// 访问令牌过期时间（秒）
    pub access_token_exp_secs: u64,
    /// 是否信任 X-Forwarded-For 头
    pub trust_proxy: bool,
    /// IP 白名单（可选）
    pub allowed_ips: Option<Vec<String>>,
}

/// 访问外部 REST API 的客户端配置
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// API 根地址，例如 "http://localhost:3000"
    pub base_url: String,
    /// Bearer 令牌（可选）
    #[serde(default)]
    pub api_token: Option<Secret<String>>,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 能力拉取超时（毫秒），同时也是加载期放行窗口
    pub abilities_timeout_ms: u64,
    /// 搜索输入防抖（毫秒）
    pub search_debounce_ms: u64,
    /// 提示消息默认显示时长（毫秒）
    pub toast_duration_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub client: ClientConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("server.addr", "0.0.0.0:3000")?
            .set_default("server.graceful_shutdown_timeout_secs", 30)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.jwt_secret", "change-this-secret-in-production-min-32-chars!")?
            .set_default("security.access_token_exp_secs", 3600)?
            .set_default("security.trust_proxy", true)?
            .set_default("client.base_url", "http://127.0.0.1:3000")?
            .set_default("client.request_timeout_secs", 30)?
            .set_default("client.abilities_timeout_ms", 5000)?
            .set_default("client.search_debounce_ms", 500)?
            .set_default("client.toast_duration_ms", 5000)?;

        // 从环境变量加载配置（前缀为 PORTAL_）
        settings = settings.add_source(
            Environment::with_prefix("PORTAL")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("security.allowed_ips")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 验证端口范围（0 表示随机端口）
        if let Some(port_str) = self.server.addr.split(':').next_back() {
            if let Ok(port) = port_str.parse::<u16>() {
                if port != 0 && port < 1024 {
                    return Err(ConfigError::Message("Server port should be >= 1024".to_string()));
                }
            }
        }

        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // 验证 JWT 密钥长度（至少 32 字符）
        if self.security.jwt_secret.expose_secret().len() < 32 {
            return Err(ConfigError::Message(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        if self.security.access_token_exp_secs < 60 || self.security.access_token_exp_secs > 86400 {
            return Err(ConfigError::Message(
                "access_token_exp_secs must be between 60 and 86400 (1 minute to 24 hours)"
                    .to_string(),
            ));
        }

        // 验证客户端配置
        if !self.client.base_url.starts_with("http://") && !self.client.base_url.starts_with("https://")
        {
            return Err(ConfigError::Message(format!(
                "Invalid client base_url: {}. Must start with http:// or https://",
                self.client.base_url
            )));
        }

        if self.client.request_timeout_secs == 0 {
            return Err(ConfigError::Message("request_timeout_secs must be > 0".to_string()));
        }

        if self.client.abilities_timeout_ms == 0 {
            return Err(ConfigError::Message("abilities_timeout_ms must be > 0".to_string()));
        }

        if self.client.toast_duration_ms == 0 {
            return Err(ConfigError::Message("toast_duration_ms must be > 0".to_string()));
        }

        Ok(())
    }
}
