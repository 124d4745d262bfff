use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vendx_api::RestApi;
use vendx_core::LinguisticResources;
use vendx_pipeline::{QualificationConfig, QualificationEngine};
use vendx_storage::{load_catalog, FsVectorStore};

/// Vendor qualification service
#[derive(Parser, Debug)]
#[command(name = "vendx")]
#[command(about = "Rank software vendors against a category and capability list", long_about = None)]
struct Args {
    /// Path to the vendor catalog CSV
    #[arg(short, long)]
    catalog: PathBuf,

    /// Directory for persisted vectorizers
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Minimum best-feature similarity to qualify a vendor
    #[arg(long, default_value_t = 0.6)]
    relevance_threshold: f32,

    /// Category-similarity gate; gating is off unless set
    #[arg(long)]
    prequalify_threshold: Option<f32>,

    /// Size of the returned shortlist
    #[arg(long, default_value_t = 10)]
    top_n: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting vendx v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    let records = load_catalog(&args.catalog)?;
    info!("Loaded {} catalog rows", records.len());

    let store = Arc::new(FsVectorStore::new(&args.data_dir)?);
    let resources = Arc::new(LinguisticResources::english());
    let config = QualificationConfig {
        relevance_threshold: args.relevance_threshold,
        prequalify_threshold: args.prequalify_threshold,
        top_n: args.top_n,
        ..Default::default()
    };

    let engine = Arc::new(QualificationEngine::ingest(
        records, store, resources, config,
    )?);
    info!("Catalog vectorized and persisted");

    let engine_http = engine.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(engine_http, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("vendx started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
