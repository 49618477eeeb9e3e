use chrono_tz::Tz;
use thiserror::Error;

use shared::FulfillmentStatus;

use super::super::registry::RegistryError;

/// 调度器错误
///
/// 注意：排队 (QUEUED) 不是错误，是 [`shared::CheckInOutcome`] 的正常结果。
#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("Location not found: {0}")]
    LocationNotFound(i64),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Pod {pod} not found at location {location_id}")]
    PodNotFound { location_id: i64, pod: u32 },

    /// 营业时间外，附带下一个下单窗口起点 (Unix millis) 和业务时区
    #[error("Ordering is closed for this location")]
    OutOfWindow {
        next_open_millis: Option<i64>,
        timezone: Tz,
    },

    #[error("Arrival offset +{0} min is not available now")]
    InvalidArrivalOffset(u32),

    #[error("Party of {0} does not fit a pod (max 2 with a dual pair)")]
    PartyTooLarge(u32),

    /// 订单状态不允许该操作；状态机保持不变
    #[error("Order {order_id} is {status:?}, cannot {action}")]
    Conflict {
        order_id: String,
        status: FulfillmentStatus,
        action: &'static str,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type SeatingResult<T> = Result<T, SeatingError>;
