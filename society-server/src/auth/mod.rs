//! 认证授权模块
//!
//! 会话认证、密码哈希和中间件：
//! - [`CurrentUser`] - 当前用户上下文
//! - [`session`] - 不透明会话令牌 (cookie / Bearer)
//! - [`require_auth`] - 认证中间件
//! - [`require_admin`] - 管理员中间件

pub mod extractor;
pub mod middleware;
pub mod password;
pub mod session;
pub mod user;

pub use middleware::{require_admin, require_auth};
pub use password::{hash_password, verify_password};
pub use user::CurrentUser;
