//! 排队看板 API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::seating::BoardView;

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/board/:location_id - 排队看板快照
pub async fn board(
    State(state): State<ServerState>,
    Path(location_id): Path<i64>,
) -> AppResult<Json<AppResponse<BoardView>>> {
    Ok(ok(state.seating.board(location_id)?))
}
