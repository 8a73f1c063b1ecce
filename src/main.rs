//! Main entry point for the fbget CLI

use anyhow::{bail, Context};
use clap::Parser;
use fbget::cli::{output, Args};
use fbget::core::{Phase, SessionController, VariantTag};
use fbget::dispatch::{DownloadDispatcher, HttpTransferAgent};
use fbget::notify::NotificationCenter;
use fbget::resolve::{PlaceholderResolver, StaticResourceProvider};
use fbget::server::{self, AppState};
use fbget::utils::source_tag_of;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filename tag used when none can be derived from the submitted link
const SOURCE_TAG: &str = "facebook";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    info!("Starting fbget with args: {:?}", args);

    let resolver = build_resolver(&args);

    if args.serve {
        let state = AppState::new(Arc::new(resolver)).with_source_tag(SOURCE_TAG);
        server::serve(state, args.port)
            .await
            .context("API server failed")?;
        return Ok(());
    }

    let Some(url) = args.url.clone() else {
        bail!("Provide a media page URL, or run with --serve");
    };

    run_session(resolver, &args, &url).await
}

/// Drive one full session: analyze, select, download.
async fn run_session(
    resolver: PlaceholderResolver<StaticResourceProvider>,
    args: &Args,
    url: &str,
) -> anyhow::Result<()> {
    let tag = VariantTag::from_str(&args.quality)?;
    let source = source_tag_of(url).unwrap_or_else(|| SOURCE_TAG.to_string());
    let session = SessionController::new(
        resolver,
        DownloadDispatcher::new(HttpTransferAgent::new()).with_source_tag(source),
        NotificationCenter::with_ttl(args.notify_ttl_duration()),
    );

    if session.analyze(url).await != Phase::Resolved {
        output::render_notifications(session.notifications());
        bail!("Could not analyze {}", url);
    }

    let state = session.state().await;
    if let Some(descriptor) = &state.descriptor {
        output::print_descriptor(descriptor);
    }

    if args.list {
        output::render_notifications(session.notifications());
        return Ok(());
    }

    session.select_variant(tag).await;
    if session.download().await != Phase::Completed {
        output::render_notifications(session.notifications());
        bail!("Download of variant '{}' failed", tag);
    }

    let state = session.state().await;
    if let Some(record) = &state.last_download {
        output::print_completion(record);
    }
    output::render_notifications(session.notifications());
    Ok(())
}

fn build_resolver(args: &Args) -> PlaceholderResolver<StaticResourceProvider> {
    let resolver = match args.seed {
        Some(seed) => PlaceholderResolver::with_seed(StaticResourceProvider, seed),
        None => PlaceholderResolver::new(StaticResourceProvider),
    };
    resolver.with_analysis_delay(args.delay_duration())
}

/// Default log level when `RUST_LOG` is not set
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}
