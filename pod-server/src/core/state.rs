use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::{Config, Result};
use crate::seating::SeatingManager;
use crate::services::{NotificationService, NotificationSink, TracingSink};
use crate::venue::VenueDirectory;

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | venue | Arc<VenueDirectory> | 门店布局目录 |
/// | seating | Arc<SeatingManager> | 排位调度器 |
/// | shutdown | CancellationToken | 后台任务取消令牌 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 门店布局目录 (只读)
    pub venue: Arc<VenueDirectory>,
    /// 排位调度器
    pub seating: Arc<SeatingManager>,
    /// 后台任务取消令牌
    shutdown: CancellationToken,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 门店布局 (校验失败拒绝启动)
    /// 2. 排位调度器 (每个门店一个空的舱池和队列)
    pub fn initialize(config: &Config) -> Result<Self> {
        let venue = Arc::new(VenueDirectory::load(&config.layout_file())?);
        let seating = Arc::new(SeatingManager::new(venue.clone(), config));

        Ok(Self {
            config: config.clone(),
            venue,
            seating,
            shutdown: CancellationToken::new(),
        })
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用
    ///
    /// 启动的任务：
    /// - 通知分发器 (订阅生命周期事件)
    pub fn start_background_tasks(&self) {
        self.start_notification_dispatcher(Arc::new(TracingSink));
    }

    /// 用指定渠道启动通知分发器
    pub fn start_notification_dispatcher(&self, sink: Arc<dyn NotificationSink>) {
        let service = NotificationService::new(sink, self.shutdown.clone());
        service.spawn(self.seating.subscribe());
        tracing::debug!("Notification dispatcher registered");
    }

    /// 取消令牌 (graceful shutdown 用)
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("epoch", &self.seating.epoch())
            .field("locations", &self.venue.location_ids())
            .finish()
    }
}
