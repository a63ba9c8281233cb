//! 提示消息存储
//! 非阻塞、到期自动消失；接口错误的 `error` 字段原样作为标题

use crate::client::ClientError;
use crate::config::ClientConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub created_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl Toast {
    pub fn new(title: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            variant,
            created_at: Utc::now(),
            duration_ms: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 0 表示使用存储的默认时长
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// 接口错误转为提示
    pub fn from_client_error(err: &ClientError) -> Self {
        Toast::new(err.to_string(), ToastVariant::Destructive)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let elapsed = now.signed_duration_since(self.created_at).num_milliseconds();
        elapsed >= i64::try_from(self.duration_ms).unwrap_or(i64::MAX)
    }
}

pub struct ToastStore {
    toasts: Mutex<Vec<Toast>>,
    default_duration_ms: u64,
}

impl ToastStore {
    pub fn new(default_duration_ms: u64) -> Self {
        Self {
            toasts: Mutex::new(Vec::new()),
            default_duration_ms,
        }
    }

    /// 默认时长取 `client.toast_duration_ms`
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.toast_duration_ms)
    }

    pub fn default_duration_ms(&self) -> u64 {
        self.default_duration_ms
    }

    pub fn push(&self, mut toast: Toast) -> Uuid {
        if toast.duration_ms == 0 {
            toast.duration_ms = self.default_duration_ms;
        }
        let id = toast.id;
        self.lock().push(toast);
        id
    }

    /// 记录接口错误并展示
    pub fn error(&self, err: &ClientError) -> Uuid {
        tracing::error!(error = %err, "API call failed");
        self.push(Toast::from_client_error(err))
    }

    pub fn success(&self, title: impl Into<String>) -> Uuid {
        self.push(Toast::new(title, ToastVariant::Success))
    }

    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut toasts = self.lock();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    /// 清除过期提示并返回剩余的
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Toast> {
        let mut toasts = self.lock();
        toasts.retain(|t| !t.is_expired(now));
        toasts.clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
