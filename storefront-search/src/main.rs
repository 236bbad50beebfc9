use clap::Parser;

use storefront_search::config::CliArgs;
use storefront_search::engine::SearchEngine;
use storefront_search::repository::MemoryCatalog;
use storefront_search::server::SearchServer;
use storefront_search::transport::NdjsonTransport;

fn main() {
	let args = CliArgs::parse();

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
		)
		.init();

	let catalog = MemoryCatalog::default();
	if let Some(path) = &args.catalog {
		match catalog.load_file(path) {
			Ok(count) => tracing::info!(count, path = %path, "catalog loaded"),
			Err(e) => {
				tracing::error!("Failed to load catalog {}: {}", path, e);
				std::process::exit(1);
			}
		}
	}

	let engine = SearchEngine::new(args.search_config());
	let mut server = SearchServer::new(NdjsonTransport::new(), engine, catalog);

	tracing::info!("storefront-search-engine ready");

	if let Err(e) = server.run() {
		tracing::error!("Server error: {}", e);
		std::process::exit(1);
	}
}
