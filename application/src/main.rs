use std::{io, sync::OnceLock};

use application::{Args, Config, Context, Service, Shell};
use service::infra::Http;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::WARN)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::WARN)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config, api } = Args::parse().map_err(|e| {
        // Help and version are rendered through `clap::Error` as well.
        _ = e.print();
    })?;

    let Config {
        api: mut api_config,
        service,
        shell,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    if let Some(base_url) = api {
        api_config.base_url = base_url;
    }
    log::info!("using restaurant API at `{}`", api_config.base_url);

    let http = Http::new(&api_config.into()).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
    })?;
    let context = Context::new(Service::new(service.into(), http));

    Shell::new(context, shell)
        .map_err(|e| log::error!("failed to set up the terminal: {e}"))?
        .run()
        .await
        .map_err(|e| log::error!("shell failed: {e}"))
}
