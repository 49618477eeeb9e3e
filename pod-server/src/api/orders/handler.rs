//! 订单 API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use shared::seating::{ArrivalPreference, SeatingOrder};

use crate::core::ServerState;
use crate::seating::NewOrder;
use crate::utils::{AppResponse, AppResult, ok};

/// 订单登记请求
///
/// 到达该接口的订单视为已完成支付（上游支付网关回调）。
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub location_id: i64,
    pub guest_name: String,
    #[serde(default)]
    pub guest_phone: Option<String>,
    pub party_size: u32,
    #[serde(default)]
    pub arrival: ArrivalPreference,
}

/// POST /api/orders - 登记已支付订单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<AppResponse<SeatingOrder>>> {
    let order = state.seating.register_paid_order(NewOrder {
        location_id: payload.location_id,
        guest_name: payload.guest_name,
        guest_phone: payload.guest_phone,
        party_size: payload.party_size,
        arrival: payload.arrival,
    })?;
    Ok(ok(order))
}

/// GET /api/orders/:order_id - 订单状态
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<SeatingOrder>>> {
    Ok(ok(state.seating.order_status(&order_id)?))
}

/// POST /api/orders/:order_id/ready - 厨房出餐完成
pub async fn ready(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<SeatingOrder>>> {
    Ok(ok(state.seating.mark_ready(&order_id)?))
}

/// POST /api/orders/:order_id/serving - 上餐
pub async fn serving(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<SeatingOrder>>> {
    Ok(ok(state.seating.mark_serving(&order_id)?))
}

/// POST /api/orders/:order_id/complete - 完成并释放舱位
pub async fn complete(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<SeatingOrder>>> {
    Ok(ok(state.seating.complete(&order_id)?))
}

/// POST /api/orders/:order_id/cancel - 取消订单
pub async fn cancel(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<AppResponse<SeatingOrder>>> {
    Ok(ok(state.seating.cancel(&order_id)?))
}
