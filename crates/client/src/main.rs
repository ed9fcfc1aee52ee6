use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use popdash_client::app;
use popdash_client::config::ClientConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they do not interleave with the tables on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "popdash_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    let cancel = CancellationToken::new();

    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received SIGINT (Ctrl-C), shutting down");
        }
        ctrl_c_cancel.cancel();
    });

    if let Err(e) = app::run(config, cancel).await {
        tracing::error!(error = %e, "Dashboard failed");
        std::process::exit(1);
    }
}
