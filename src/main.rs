use anyhow::Result;
use hestia::driver::RateDriver;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the driver from the default configuration locations
    let mut driver =
        RateDriver::new().map_err(|e| anyhow::anyhow!("Failed to create driver: {}", e))?;

    info!(
        "Hestia tariff rate driver {} starting up",
        env!("APP_VERSION")
    );

    // Request a clean shutdown on ctrl-c
    let shutdown = driver.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown.send(());
        }
    });

    match driver.run().await {
        Ok(()) => {
            info!("Driver shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!("Driver failed with error: {}", e);
            Err(anyhow::anyhow!("Driver error: {}", e))
        }
    }
}
