use society_server::db::{DbService, maintenance};
use society_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 配置, 工作目录, 日志)
    let config = setup_environment()?;

    // 2. 数据重置模式：清空后退出
    if std::env::args().skip(1).any(|arg| arg == "--reset-data") {
        let db = DbService::new(&config.database_file().to_string_lossy()).await?;
        let report = maintenance::clear_all(&db.pool).await?;
        println!(
            "Cleared {} sessions, {} receipts, {} expenses, {} users; balance adjustment reset",
            report.sessions, report.receipts, report.expenses, report.users
        );
        return Ok(());
    }

    print_banner();
    tracing::info!("Society server starting...");

    // 3. 初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器 (Server::run 会自动启动后台任务)
    let server = Server::new(state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
