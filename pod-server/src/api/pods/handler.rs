//! 餐舱 API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use shared::models::Pod;

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/pods/:location_id - 舱位快照
pub async fn list(
    State(state): State<ServerState>,
    Path(location_id): Path<i64>,
) -> AppResult<Json<AppResponse<Vec<Pod>>>> {
    Ok(ok(state.seating.pods(location_id)?))
}

/// 清洁完成响应
#[derive(Debug, Serialize)]
pub struct CleanedResponse {
    /// 该信号触发分配的订单 (如有)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_order: Option<String>,
}

/// POST /api/pods/:location_id/:pod/cleaned - 清洁完成信号
///
/// 舱位单元回到可用状态并立即重扫队列；重复信号是无操作成功。
pub async fn cleaned(
    State(state): State<ServerState>,
    Path((location_id, pod)): Path<(i64, u32)>,
) -> AppResult<Json<AppResponse<CleanedResponse>>> {
    let assigned_order = state.seating.cleaning_done(location_id, pod)?;
    Ok(ok(CleanedResponse { assigned_order }))
}

#[derive(Debug, Deserialize)]
pub struct ServiceRequest {
    /// true 停用，false 恢复
    pub out_of_service: bool,
}

/// POST /api/pods/:location_id/:pod/service - 停用/恢复舱位单元
pub async fn set_service(
    State(state): State<ServerState>,
    Path((location_id, pod)): Path<(i64, u32)>,
    Json(payload): Json<ServiceRequest>,
) -> AppResult<Json<AppResponse<Vec<Pod>>>> {
    Ok(ok(state
        .seating
        .set_pod_out_of_service(location_id, pod, payload.out_of_service)?))
}
