use rgenai_studio::{
    logger::{self, LoggerConfig},
    ConsoleView, GenerationPageController, HttpWorkflowApi, ListOutcome, SelectOutcome,
    StudioConfig, SubmitOutcome, WorkflowApi,
};
use std::env;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let logger_config = LoggerConfig::from_env();
    let show_colors = logger_config.show_colors;
    logger::init_with_config(logger_config)?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = StudioConfig::from_env();
    logger::log_config_info(&config);

    let api = HttpWorkflowApi::new(&config)?;
    match api.health_check().await {
        Ok(true) => log::info!("✅ Server at {} is healthy", api.base_url()),
        Ok(false) => log::warn!("⚠️  Server at {} reports an unhealthy status", api.base_url()),
        Err(e) => log::warn!("⚠️  Health check failed: {}", e),
    }

    let view = Arc::new(ConsoleView::new(show_colors));
    let mut page = GenerationPageController::new(api.clone(), view.clone());

    if page.load_workflows().await == ListOutcome::Failed {
        return Ok(());
    }

    let workflow_id = match env::args().nth(1) {
        Some(id) => id,
        None => {
            log::info!("💡 Pass a workflow id to generate an image");
            return Ok(());
        }
    };

    if page.select_workflow(&workflow_id).await != SelectOutcome::Loaded {
        return Ok(());
    }

    match page.submit().await {
        SubmitOutcome::Generated { .. } => {}
        _ => return Ok(()),
    }

    page.download();
    if let Some(download) = view.take_download() {
        let bytes = api.fetch_image(&download.href).await?;
        std::fs::create_dir_all(&config.output_dir)?;
        let filename = if download.filename.is_empty() {
            "image.png"
        } else {
            download.filename.as_str()
        };
        let target = Path::new(&config.output_dir).join(filename);
        std::fs::write(&target, bytes)?;
        log::info!("💾 Image saved to: {}", target.display());
    }

    Ok(())
}
