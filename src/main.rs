use anyhow::Context;
use flatserve::config::Config;
use flatserve::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    std::fs::create_dir_all(&cfg.storage.root_dir).with_context(|| {
        format!(
            "Failed to create root directory {}",
            cfg.storage.root_dir.display()
        )
    })?;

    tokio::select! {
        res = server::listener::run(&cfg) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
