//! 搜索输入防抖
//! 每次输入都会重置计时器，只有静默满一个周期后才发出最后一次输入。
//! 输入端关闭时丢弃尚未发出的值。

use crate::config::ClientConfig;
use std::time::Duration;
use tokio::sync::mpsc;

pub struct SearchDebouncer {
    tx: mpsc::UnboundedSender<String>,
}

impl SearchDebouncer {
    /// 启动防抖任务，返回输入端和输出端
    pub fn spawn(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();

        tokio::spawn(run(delay, rx, out_tx));

        (Self { tx }, out_rx)
    }

    /// 使用 `client.search_debounce_ms`
    pub fn from_config(config: &ClientConfig) -> (Self, mpsc::UnboundedReceiver<String>) {
        Self::spawn(Duration::from_millis(config.search_debounce_ms))
    }

    /// 输入一次；任务已退出时返回 false
    pub fn input(&self, value: impl Into<String>) -> bool {
        self.tx.send(value.into()).is_ok()
    }
}

async fn run(
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<String>,
    out: mpsc::UnboundedSender<String>,
) {
    while let Some(mut latest) = rx.recv().await {
        loop {
            tokio::select! {
                next = rx.recv() => match next {
                    Some(value) => latest = value,
                    None => return,
                },
                _ = tokio::time::sleep(delay) => {
                    tracing::trace!(query = %latest, "Debounced search emitted");
                    if out.send(latest).is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}
