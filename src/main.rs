use bidform_backend::app::app::App;
use bidform_backend::util::logger::Logger;
use dotenv::dotenv;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let _logger = Logger::new().expect("Failed to initialize logging");

    info!("🚀 Starting Bidform Backend Application");

    // Load environment variables from .env file
    match dotenv() {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = App::new().await;
    app.start().await;
}
