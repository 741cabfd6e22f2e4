use std::time::{Duration, Instant};

use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::session;
use crate::storage::{AttachmentStore, UrlSigner};

/// 过期会话清理间隔
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段均为廉价克隆 (连接池、路径、密钥)，可直接作为 axum State。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | attachments | AttachmentStore | 附件磁盘存储 |
/// | signer | UrlSigner | 附件签名 URL |
/// | started_at | Instant | 进程启动时刻 (运行时长) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据库服务
    pub db: DbService,
    /// 附件存储
    pub attachments: AttachmentStore,
    /// 附件下载签名
    pub signer: UrlSigner,
    /// 状态创建时刻
    pub started_at: Instant,
}

impl ServerState {
    /// 用已有数据库构造状态 (测试使用内存库)
    pub fn new(config: Config, db: DbService) -> Self {
        let attachments = AttachmentStore::new(config.uploads_dir(), config.max_upload_bytes);
        let signer = UrlSigner::new(&config.attachment_secret, config.signed_url_ttl_secs);
        Self {
            config,
            db,
            attachments,
            signer,
            started_at: Instant::now(),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (database/, uploads/)
    /// 2. 数据库 (默认 work_dir/database/society.db) 并执行迁移
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_file();
        let db = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.message))?;

        tracing::info!(database = %db_path.display(), "Database ready");
        Ok(Self::new(config.clone(), db))
    }

    /// 启动后台任务
    ///
    /// - 周期性清理过期会话
    pub fn start_background_tasks(&self) {
        let pool = self.pool().clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
            loop {
                interval.tick().await;
                match session::purge_expired(&pool, shared::util::now_millis()).await {
                    Ok(0) => {}
                    Ok(n) => tracing::info!(purged = n, "Expired sessions purged"),
                    Err(e) => tracing::warn!(error = %e, "Session purge failed"),
                }
            }
        });
    }

    /// 获取连接池
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// 运行时长 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// 会话有效期 (毫秒)
    pub fn session_ttl_millis(&self) -> i64 {
        self.config.session_ttl_millis()
    }

    /// 为已存储附件生成带签名的下载 URL
    pub fn attachment_url(&self, reference: Option<&str>) -> Option<String> {
        reference.map(|r| self.signer.url_for(r, shared::util::now_millis()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_uptime_counts_from_state_creation() {
        let db = DbService::in_memory().await.unwrap();
        let mut state = ServerState::new(Config::with_work_dir("/tmp/society-uptime"), db);
        assert_eq!(state.uptime_seconds(), 0);

        if let Some(earlier) = Instant::now().checked_sub(Duration::from_secs(90)) {
            state.started_at = earlier;
            assert!(state.uptime_seconds() >= 90);
        }
    }
}
