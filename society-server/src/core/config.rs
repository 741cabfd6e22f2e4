use std::path::PathBuf;

/// 服务器配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、附件、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | {WORK_DIR}/database/society.db | SQLite 数据库文件 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SESSION_TTL_HOURS | 168 | 会话有效期 (小时) |
/// | ADMIN_USERNAME | Admin | 管理员登录名 |
/// | ADMIN_PASSWORD | Admin123 | 管理员密码 |
/// | ATTACHMENT_SECRET | (dev default) | 附件签名 URL 的 HMAC 密钥 |
/// | SIGNED_URL_TTL_SECS | 900 | 附件签名 URL 有效期 (秒) |
/// | MAX_UPLOAD_BYTES | 10485760 | 单个附件最大字节数 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (none) | 日志目录，设置后按天滚动写文件 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/society HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、附件等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据库路径 (未设置时位于 work_dir/database)
    pub database_path: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 会话有效期 (小时)
    pub session_ttl_hours: i64,
    /// 管理员登录名
    pub admin_username: String,
    /// 管理员密码
    pub admin_password: String,
    /// 附件签名密钥
    pub attachment_secret: String,
    /// 附件签名 URL 有效期 (秒)
    pub signed_url_ttl_secs: i64,
    /// 单个附件最大字节数
    pub max_upload_bytes: usize,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
}

const DEV_ATTACHMENT_SECRET: &str = "dev-attachment-secret-change-me";
const DEV_ADMIN_PASSWORD: &str = "Admin123";

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            session_ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|h: &i64| *h > 0)
                .unwrap_or(24 * 7),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "Admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEV_ADMIN_PASSWORD.into()),
            attachment_secret: std::env::var("ATTACHMENT_SECRET")
                .unwrap_or_else(|_| DEV_ATTACHMENT_SECRET.into()),
            signed_url_ttl_secs: std::env::var("SIGNED_URL_TTL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(15 * 60),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10 * 1024 * 1024),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// 使用指定工作目录覆盖配置
    ///
    /// 常用于测试场景
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = None;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 数据库文件路径
    pub fn database_file(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => self.database_dir().join("society.db"),
        }
    }

    /// 附件根目录
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// 会话有效期 (毫秒)
    pub fn session_ttl_millis(&self) -> i64 {
        self.session_ttl_hours * 60 * 60 * 1000
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        if let Some(parent) = self.database_file().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::create_dir_all(self.uploads_dir())?;
        Ok(())
    }

    /// 生产环境下拒绝使用默认密钥
    pub fn validate(&self) -> Result<(), String> {
        if !self.is_production() {
            return Ok(());
        }
        if self.attachment_secret == DEV_ATTACHMENT_SECRET {
            return Err("ATTACHMENT_SECRET must be set in production".into());
        }
        if self.admin_password == DEV_ADMIN_PASSWORD {
            return Err("ADMIN_PASSWORD must be changed in production".into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_work_dir() {
        let config = Config::with_work_dir("/tmp/society-test");
        assert_eq!(
            config.database_file(),
            PathBuf::from("/tmp/society-test/database/society.db")
        );
        assert_eq!(
            config.uploads_dir(),
            PathBuf::from("/tmp/society-test/uploads")
        );
    }

    #[test]
    fn test_production_rejects_dev_secrets() {
        let mut config = Config::with_work_dir("/tmp/x");
        config.environment = "production".into();
        config.attachment_secret = DEV_ATTACHMENT_SECRET.into();
        assert!(config.validate().is_err());

        config.attachment_secret = "a-real-secret".into();
        config.admin_password = "a-real-password".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_ttl_millis() {
        let mut config = Config::with_work_dir("/tmp/x");
        config.session_ttl_hours = 2;
        assert_eq!(config.session_ttl_millis(), 7_200_000);
    }
}
