//! 两级能力解析
//! 远端接口是权威来源；拉取失败或超时才退回静态角色表，两者从不合并

use super::ability::AbilitySet;
use super::table::PermissionTable;
use crate::client::ClientError;
use crate::config::ClientConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// `/api/user/abilities` 的响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityGrant {
    pub abilities: Vec<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// 当前用户能力的来源
#[async_trait]
pub trait AbilitySource: Send + Sync {
    async fn fetch_abilities(&self) -> Result<AbilityGrant, ClientError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityOrigin {
    Remote,
    StaticFallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAbilities {
    pub origin: AbilityOrigin,
    pub role: Option<String>,
    pub abilities: AbilitySet,
}

pub struct AbilityResolver {
    source: Arc<dyn AbilitySource>,
    table: &'static PermissionTable,
    timeout: Duration,
}

impl AbilityResolver {
    pub fn new(source: Arc<dyn AbilitySource>, timeout: Duration) -> Self {
        Self {
            source,
            table: PermissionTable::builtin(),
            timeout,
        }
    }

    /// 超时取 `client.abilities_timeout_ms`
    pub fn from_config(source: Arc<dyn AbilitySource>, config: &ClientConfig) -> Self {
        Self::new(source, Duration::from_millis(config.abilities_timeout_ms))
    }

    /// 替换兜底使用的权限表
    pub fn with_table(mut self, table: &'static PermissionTable) -> Self {
        self.table = table;
        self
    }

    pub fn table(&self) -> &'static PermissionTable {
        self.table
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 解析当前用户的能力
    ///
    /// `role_hint` 只在兜底时使用（通常来自会话）。
    pub async fn resolve(&self, role_hint: Option<&str>) -> ResolvedAbilities {
        match tokio::time::timeout(self.timeout, self.source.fetch_abilities()).await {
            Ok(Ok(grant)) => {
                tracing::debug!(
                    count = grant.abilities.len(),
                    role = ?grant.role,
                    "Abilities fetched from server"
                );
                ResolvedAbilities {
                    origin: AbilityOrigin::Remote,
                    role: grant.role.or_else(|| role_hint.map(str::to_string)),
                    abilities: grant.abilities.into_iter().collect(),
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, role = ?role_hint, "Failed to fetch abilities, using static role table");
                self.fallback(role_hint)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    role = ?role_hint,
                    "Abilities fetch timed out, using static role table"
                );
                self.fallback(role_hint)
            }
        }
    }

    fn fallback(&self, role_hint: Option<&str>) -> ResolvedAbilities {
        ResolvedAbilities {
            origin: AbilityOrigin::StaticFallback,
            role: role_hint.map(str::to_string),
            abilities: role_hint
                .map(|role| self.table.abilities_for_role(role))
                .unwrap_or_default(),
        }
    }
}
