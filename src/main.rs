use chef_proxy::{serve, ServerConfig};
use env_logger::Env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Missing .env is fine: variables may come from the real environment
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ServerConfig::load()?;
    serve(config).await
}
