//! 会话级能力状态
//!
//! 会话创建时处于 `Loading`。加载期间访问检查放行，避免导航闪烁；
//! 放行窗口以解析器超时为上限，超过后即使仍未加载完成也一律拒绝。
//! 加载完成后按解析结果严格判定。

use super::ability::AbilitySet;
use super::resolver::{AbilityResolver, ResolvedAbilities};
use crate::navigation::{visible_navigation, NavItem};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading { since: Instant },
    Resolved(ResolvedAbilities),
}

pub struct AbilitySession {
    resolver: Arc<AbilityResolver>,
    role_hint: Option<String>,
    loading_window: Duration,
    state: watch::Sender<SessionState>,
}

impl AbilitySession {
    pub fn new(resolver: Arc<AbilityResolver>, role_hint: Option<String>) -> Self {
        let loading_window = resolver.timeout();
        let (state, _) = watch::channel(SessionState::Loading {
            since: Instant::now(),
        });

        Self {
            resolver,
            role_hint,
            loading_window,
            state,
        }
    }

    /// 拉取并发布能力；并发调用时最后完成的结果生效
    ///
    /// 仍在加载时，放行窗口从本次拉取开始重新计时；已解析的会话在刷新期间保持原结果。
    pub async fn load(&self) -> ResolvedAbilities {
        self.state.send_if_modified(|state| match state {
            SessionState::Loading { since } => {
                *since = Instant::now();
                false
            }
            SessionState::Resolved(_) => false,
        });

        let resolved = self.resolver.resolve(self.role_hint.as_deref()).await;

        tracing::info!(
            origin = ?resolved.origin,
            role = ?resolved.role,
            count = resolved.abilities.len(),
            "Session abilities resolved"
        );

        self.state.send_replace(SessionState::Resolved(resolved.clone()));
        resolved
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Loading { .. })
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// 已解析的能力；加载中返回 None
    pub fn abilities(&self) -> Option<AbilitySet> {
        match &*self.state.borrow() {
            SessionState::Resolved(resolved) => Some(resolved.abilities.clone()),
            SessionState::Loading { .. } => None,
        }
    }

    /// 等待解析完成
    pub async fn resolved(&self) -> ResolvedAbilities {
        let mut rx = self.state.subscribe();
        loop {
            if let SessionState::Resolved(resolved) = &*rx.borrow_and_update() {
                return resolved.clone();
            }
            if rx.changed().await.is_err() {
                // 发送端随 self 存活，不会走到这里
                continue;
            }
        }
    }

    pub fn can_access_module(&self, module: &str) -> bool {
        self.check(|abilities| self.resolver.table().can_access_module(abilities, module))
    }

    pub fn has_ability(&self, ability: &str) -> bool {
        self.check(|abilities| abilities.contains(ability))
    }

    /// 按当前会话过滤导航树
    pub fn visible_navigation(&self, items: &[NavItem]) -> Vec<NavItem> {
        visible_navigation(items, &|module| self.can_access_module(module))
    }

    fn check(&self, decide: impl FnOnce(&AbilitySet) -> bool) -> bool {
        match &*self.state.borrow() {
            SessionState::Resolved(resolved) => decide(&resolved.abilities),
            SessionState::Loading { since } => {
                let within_window = since.elapsed() < self.loading_window;
                if !within_window {
                    tracing::debug!(
                        window_ms = self.loading_window.as_millis() as u64,
                        "Abilities still loading past window, denying"
                    );
                }
                within_window
            }
        }
    }
}
