use clap::Parser;
use medbot_index::utils::{logger, validation::Validate};
use medbot_index::{
    CliConfig, FastEmbedder, IndexEngine, IndexPipeline, PdfDirectorySource, PineconeStore,
    TomlConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    if dotenvy::dotenv().is_ok() {
        tracing::debug!("Loaded environment from .env");
    }
    config.resolve_api_key();

    if let Some(path) = config.config.clone() {
        let file_config = TomlConfig::from_file(&path)?;
        file_config.apply_to(&mut config);
        tracing::info!("Applied config file: {}", path);
    }

    tracing::info!("Starting medbot-index CLI");
    if config.verbose {
        tracing::debug!(
            "Config: data_dir={}, index={}, namespace={:?}, chunk_size={}, chunk_overlap={}, batch_size={}",
            config.data_dir,
            config.index_name,
            config.namespace,
            config.chunk_size,
            config.chunk_overlap,
            config.batch_size
        );
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // Downloads all-MiniLM-L6-v2 on the first run; cached afterwards.
    tracing::info!("Loading embedding model...");
    let embedder = match FastEmbedder::new() {
        Ok(embedder) => embedder,
        Err(e) => {
            tracing::error!("❌ Failed to load embedding model: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let source = PdfDirectorySource::new(config.data_dir.clone());
    let store = PineconeStore::new(
        config.controller_url.clone(),
        config.api_key().to_string(),
        config.index_name.clone(),
        config.namespace.clone(),
    );

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = IndexPipeline::new(source, embedder, store, config);
    let mut engine = IndexEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Index build completed successfully!");
            println!("✅ Index build completed successfully!");
            println!(
                "📦 {} chunks upserted (index created: {}, author record appended: {})",
                report.chunks_upserted, report.index_created, report.author_record_added
            );
        }
        Err(e) => {
            tracing::error!("❌ Index build failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
