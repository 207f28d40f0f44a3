//! Pharmacy Server - 药品订购后台
//!
//! # 架构概述
//!
//! 单进程 HTTP 后台：用户注册/登录、药品目录（管理员维护）、
//! 带配送时间/价格协商的订单流程。三个实体集合整体驻留内存，
//! 每次变更后同步写回 JSON 快照文件。
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── db/            # JSON 快照网关、模型、仓储
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境：.env 加载 + 日志初始化
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____  __
   / __ \/ /_  ____ ______ ____ ___  ____ _______  __
  / /_/ / __ \/ __ `/ ___// __ `__ \/ __ `/ ___/ / / /
 / ____/ / / / /_/ / /   / / / / / / /_/ / /__/ /_/ /
/_/   /_/ /_/\__,_/_/   /_/ /_/ /_/\__,_/\___/\__, /
                                             /____/
    "#
    );
}
