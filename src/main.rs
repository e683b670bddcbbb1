use std::process::ExitCode;

mod browser;
mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;

use browser::SystemBrowser;
use error::ServerError;

fn main() -> ExitCode {
    // Optional config file path (without extension) as the first argument
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_FILE.to_string());

    match run(&config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_fatal(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(config_path: &str) -> Result<(), ServerError> {
    let cfg = config::Config::load_from(config_path)?;
    logger::init(&cfg.logging)?;

    // Build the Tokio runtime, honouring the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), ServerError> {
    let server = server::startup(cfg, &SystemBrowser)?;

    let shutdown = server::ShutdownHandle::new();
    server::start_signal_handler(shutdown.clone());

    server.run(shutdown.subscribe()).await;
    Ok(())
}
