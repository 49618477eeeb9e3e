//! 排位调度核心
//!
//! - [`registry`]: 餐舱池与占用状态机
//! - [`queue`]: 等位队列 (FIFO + 类型跳过)
//! - [`turnover`]: 翻台时长滚动平均
//! - [`manager`]: 调度器本体，按门店串行化所有变更

pub mod manager;
pub mod queue;
pub mod registry;
pub mod turnover;

pub use manager::{NewOrder, SeatingError, SeatingManager, SeatingResult};
pub use queue::{QueueEntry, WaitQueue};
pub use registry::{PodRegistry, RegistryError};
pub use turnover::TurnoverTracker;
