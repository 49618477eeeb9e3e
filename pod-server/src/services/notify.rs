//! 通知分发服务
//!
//! 订阅调度器的生命周期事件广播，投递到外部通知渠道（短信、推送、
//! 取餐屏等）。分发完全在调度锁之外进行：投递慢或失败只影响通知，
//! 不影响分配决定。
//!
//! 投递失败重试一次；仍失败则丢弃并记录，等待下游通过看板轮询补偿。
//! 广播通道 lag（消费太慢被挤掉事件）同样只记录，看板是最终事实源。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use shared::seating::LifecycleEvent;

/// 通知渠道接口
///
/// 实现方负责具体的投递方式；调用方保证同一订单的事件按序投递。
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, event: &LifecycleEvent) -> anyhow::Result<()>;
}

/// 默认渠道：结构化日志输出
///
/// 生产部署把它换成真正的推送网关；日志本身也足够驱动取餐屏调试。
#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    async fn deliver(&self, event: &LifecycleEvent) -> anyhow::Result<()> {
        tracing::info!(
            order_id = %event.order_id,
            location_id = event.location_id,
            from = ?event.from,
            to = ?event.to,
            pods = ?event.pods,
            "Lifecycle notification"
        );
        Ok(())
    }
}

/// 通知分发服务
pub struct NotificationService {
    sink: Arc<dyn NotificationSink>,
    shutdown: CancellationToken,
    /// 重试前的等待
    retry_delay: Duration,
}

impl NotificationService {
    pub fn new(sink: Arc<dyn NotificationSink>, shutdown: CancellationToken) -> Self {
        Self {
            sink,
            shutdown,
            retry_delay: Duration::from_millis(500),
        }
    }

    /// 启动后台分发任务
    pub fn spawn(self, mut rx: broadcast::Receiver<LifecycleEvent>) {
        tokio::spawn(async move {
            tracing::debug!("Notification dispatcher started");
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        tracing::debug!("Notification dispatcher stopped");
                        break;
                    }
                    result = rx.recv() => match result {
                        Ok(event) => self.dispatch(&event).await,
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            // 事件被挤掉：下游靠看板轮询补偿
                            tracing::warn!(skipped, "Notification stream lagged, events dropped");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::debug!("Lifecycle channel closed, dispatcher exiting");
                            break;
                        }
                    }
                }
            }
        });
    }

    /// 投递一个事件，失败重试一次
    async fn dispatch(&self, event: &LifecycleEvent) {
        if let Err(first) = self.sink.deliver(event).await {
            tracing::warn!(order_id = %event.order_id, error = %first, "Notification delivery failed, retrying");
            tokio::time::sleep(self.retry_delay).await;
            if let Err(second) = self.sink.deliver(event).await {
                tracing::error!(order_id = %event.order_id, error = %second, "Notification dropped after retry");
            }
        }
    }
}
