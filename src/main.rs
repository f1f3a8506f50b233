use anyhow::{Context, Result};
use bikeboard::data::{default_date, load_dataset, resolve_data_path};
use bikeboard::logging;
use bikeboard::server::{DashboardServer, DashboardState};
use bikeboard::settings::DashboardSettings;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    let settings = DashboardSettings::from_env().context("Invalid configuration")?;
    logging::init(&settings);

    let path = resolve_data_path(&settings.data_path);
    let dataset = load_dataset(&path)
        .with_context(|| format!("Failed to load dataset from {}", path.display()))?;
    info!(
        rows = dataset.len(),
        "Loaded {} from {}",
        dataset.name(),
        path.display()
    );
    let dataset = Arc::new(dataset);

    // Static mode: render once and exit
    if let Some(output) = &settings.output {
        let mut state = DashboardState::new(dataset.clone(), settings.kmeans_config());
        let html = state.render_html(default_date(&dataset))?;
        std::fs::write(output, html)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Wrote dashboard to {}", output.display());
        return Ok(());
    }

    let server = DashboardServer::start(dataset, &settings)?;
    info!("Open http://{}/ in a browser", server.local_addr());
    server.wait();
    Ok(())
}
