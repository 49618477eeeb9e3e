//! 营业时间 API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;
use serde::Serialize;

use crate::core::ServerState;
use crate::hours;
use crate::utils::{AppError, AppResponse, AppResult, ok};

/// 营业时间响应
#[derive(Debug, Serialize)]
pub struct HoursResponse {
    pub location_id: i64,
    /// 当前是否接受新订单
    pub accepting_orders: bool,
    /// 当前有效的到店偏移 (分钟)，窗口外为空
    pub arrival_offsets: Vec<u32>,
    /// 下一个下单窗口起点 (RFC3339, 业务时区)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_window_start: Option<String>,
}

/// GET /api/hours/:location_id - 当前下单窗口
pub async fn hours(
    State(state): State<ServerState>,
    Path(location_id): Path<i64>,
) -> AppResult<Json<AppResponse<HoursResponse>>> {
    let schedule = state
        .venue
        .schedule(location_id)
        .ok_or_else(|| AppError::NotFound(format!("Location {location_id} not found")))?;

    let now = Utc::now().with_timezone(&state.config.timezone);
    let accepting_orders = hours::can_accept_order(schedule, now);
    let arrival_offsets = hours::valid_arrival_offsets(schedule, now);
    let next_window_start = if accepting_orders {
        None
    } else {
        hours::next_window_start(schedule, now).map(|t| t.to_rfc3339())
    };

    Ok(ok(HoursResponse {
        location_id,
        accepting_orders,
        arrival_offsets,
        next_window_start,
    }))
}
