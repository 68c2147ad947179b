use std::sync::Arc;

use campus_hub::config::AppConfig;
use campus_hub::engine::llm_client::GeminiClient;
use campus_hub::ui::app::HubApp;
use tracing::error;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let gateway = match GeminiClient::new(&config.gateway) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create Gemini client: {:#}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CampusHub HubAI",
        options,
        Box::new(move |cc| Ok(Box::new(HubApp::new(cc, config, gateway)))),
    )
}
