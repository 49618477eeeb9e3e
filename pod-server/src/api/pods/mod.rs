//! 餐舱 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/pods/{location_id} | GET | 舱位状态快照 |
//! | /api/pods/{location_id}/{pod}/cleaned | POST | 清洁完成信号 |
//! | /api/pods/{location_id}/{pod}/service | POST | 停用/恢复舱位单元 |

mod handler;

use axum::{Router, routing::{get, post}};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pods", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{location_id}", get(handler::list))
        .route("/{location_id}/{pod}/cleaned", post(handler::cleaned))
        .route("/{location_id}/{pod}/service", post(handler::set_service))
}
