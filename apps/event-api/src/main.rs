use anyhow::Result;
use clap::Parser;
use event_api::clock::SystemClock;
use event_api::{app, AppState, Config};
use event_queue::SqsQueue;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, layer::SubscriberExt, util::SubscriberInitExt, Layer};

const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();
	let config = Config::parse();
	config.validate().map_err(anyhow::Error::msg)?;

	init_tracing(&config)?;

	tracing::info!(environment = %config.environment, "🚀 Starting event API");

	let queue = SqsQueue::connect(&config.sqs_config()).await?;
	tracing::info!(queue_url = %config.sqs_queue_url, region = %config.sqs_region, "✅ Queue client ready");

	let state = AppState::new(Arc::new(queue), Arc::new(SystemClock), config.max_bulk_events);
	let app = app(state, &config);

	let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
	tracing::info!("listening on {}", listener.local_addr()?);

	let shutdown_token = CancellationToken::new();
	tokio::spawn(wait_for_shutdown_signal(shutdown_token.clone()));

	let server_token = shutdown_token.clone();
	axum::serve(listener, app)
		.with_graceful_shutdown(async move {
			server_token.cancelled().await;
		})
		.await?;

	tracing::info!("🛑 Event API stopped");
	Ok(())
}

async fn wait_for_shutdown_signal(token: CancellationToken) {
	let ctrl_c = async {
		tokio::signal::ctrl_c().await.ok();
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			}
			Err(e) => {
				tracing::warn!(error = %e, "Failed to install SIGTERM handler");
				std::future::pending::<()>().await;
			}
		}
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		() = ctrl_c => tracing::info!("Received Ctrl+C, initiating shutdown..."),
		() = terminate => tracing::info!("Received SIGTERM, initiating shutdown..."),
	}

	token.cancel();
}

fn init_tracing(config: &Config) -> Result<()> {
	let filter = config
		.rust_log
		.as_deref()
		.and_then(|directives| EnvFilter::try_new(directives).ok())
		.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(
				tracing_subscriber::fmt::layer()
					.event_format(tracing_subscriber::fmt::format().pretty())
					.with_filter(filter),
			)
		})
		.try_init()?;

	Ok(())
}
