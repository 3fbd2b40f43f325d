// --- School timetable service - entry point ---

use schoolhub::config::AppConfig;
use schoolhub::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // .env may set RUST_LOG, so load it before the logger
    let _ = dotenv::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("=== School timetable service (API) ===");
    let config = AppConfig::from_env();
    run_server(config).await
}
