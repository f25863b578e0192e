pub mod api;
pub mod cli;
pub mod editor;
pub mod error;
pub mod import;
pub mod model;
pub mod settings;
pub mod toast;
pub mod upload;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use cli::Cli;
use settings::Settings;
use toast::ToastQueue;

pub async fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("MAGDESK_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let toasts = ToastQueue::new();

    let result = match Settings::from_env().await {
        Ok(settings) => cli::execute(cli, settings, &toasts).await,
        Err(e) => Err(e),
    };

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            toasts.error(e.to_string(), None);
            ExitCode::FAILURE
        }
    };

    cli::drain_toasts(&toasts);
    code
}
