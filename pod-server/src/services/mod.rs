//! 服务层 - 调度核心之外的长生命周期组件

pub mod notify;

pub use notify::{NotificationService, NotificationSink, TracingSink};
