//! 签到 API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::seating::{CheckInOutcome, SeatingOrder};

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub order_id: String,
}

/// POST /api/checkin - 到店签到
///
/// 幂等：重复请求返回当前分配或当前队列位置。
pub async fn check_in(
    State(state): State<ServerState>,
    Json(payload): Json<CheckInRequest>,
) -> AppResult<Json<AppResponse<CheckInOutcome>>> {
    Ok(ok(state.seating.check_in(&payload.order_id)?))
}

/// POST /api/checkin/:order_id/confirm - 到舱确认
pub async fn confirm(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<SeatingOrder>>> {
    Ok(ok(state.seating.confirm_pod(&order_id)?))
}
