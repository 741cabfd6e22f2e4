//! Society Server - 住宅小区收支账本服务
//!
//! # 架构概述
//!
//! - **账本** (`ledger`): 收入/支出汇总、余额调整与反推
//! - **数据库** (`db`): SQLite (sqlx) 存储与迁移
//! - **认证** (`auth`): Argon2 密码 + 不透明会话令牌
//! - **附件** (`storage`): 本地磁盘存储与签名下载 URL
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! society-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── auth/          # 会话认证、密码、中间件
//! ├── ledger/        # 金额换算、余额计算
//! ├── storage/       # 附件存储、签名 URL
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod ledger;
pub mod storage;
pub mod utils;

// Re-export 公共类型
pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState, build_app};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorBody, ErrorCategory, ErrorCode};

pub use utils::logger::init_logger_with_file;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 `.env`、准备工作目录并初始化日志
///
/// 返回加载好的配置 (已校验)
pub fn setup_environment() -> Result<Config, Box<dyn std::error::Error>> {
    // .env 缺失不是错误
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    config.validate()?;
    config.ensure_work_dir_structure()?;

    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   _____            _      __
  / ___/____  _____(_)__  / /___  __
  \__ \/ __ \/ ___/ / _ \/ __/ / / /
 ___/ / /_/ / /__/ /  __/ /_/ /_/ /
/____/\____/\___/_/\___/\__/\__, /
    __             __        /____/
   / /   ___  ____/ /___ ____  _____
  / /   / _ \/ __  / __ `/ _ \/ ___/
 / /___/  __/ /_/ / /_/ /  __/ /
/_____/\___/\__,_/\__, /\___/_/
                 /____/
    "#
    );
}
