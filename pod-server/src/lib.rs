//! Pod Server - 餐舱排位调度边缘节点
//!
//! # 架构概述
//!
//! 本模块是 Pod Server 的主入口，提供以下核心功能：
//!
//! - **排位调度** (`seating`): 餐舱分配、等位队列、订单生命周期
//! - **营业时间** (`hours`): 下单时间窗口判定
//! - **门店布局** (`venue`): 餐舱布局与营业时间表加载
//! - **通知分发** (`services/notify`): 生命周期事件外发
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! pod-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── hours/         # 营业时间闸门
//! ├── venue/         # 门店布局目录
//! ├── seating/       # 餐舱登记、队列、调度器
//! ├── services/      # 通知分发
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod hours;
pub mod routes;
pub mod seating;
pub mod services;
pub mod utils;
pub mod venue;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use seating::SeatingManager;
pub use utils::{AppError, AppResult};
pub use venue::VenueDirectory;

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____            __
   / __ \____  ____/ /
  / /_/ / __ \/ __  /
 / ____/ /_/ / /_/ /
/_/    \____/\__,_/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
