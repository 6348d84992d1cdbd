use std::io::BufRead;
use std::sync::atomic::Ordering;

use crossbeam_channel::bounded;
use log::{error, info, warn};

use scenesync::{
    load_config, Config, PlacementBatch, PlacementQuery, ProjectWriter, SceneDocument,
    SyncService, UpdateTable,
};

fn main() {
    init_logging();

    info!("Starting scenesync v{}", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load config from '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let document = match SceneDocument::load(config.input_path()) {
        Ok(document) => document,
        Err(e) => {
            error!("Failed to load project file: {}. Abort.", e);
            std::process::exit(1);
        }
    };

    let table = UpdateTable::new(config.update_items.clone());
    if table.is_empty() {
        warn!("Update table is empty; every placement entry will be ignored");
    }
    info!(
        "Bridging placement topic '{}' (query topic '{}')",
        config.placement_topic, config.query_topic
    );

    let writer = ProjectWriter::new(config.output_path(), config.overwrite_output);
    let service = SyncService::new(document, table, writer);

    let shutdown = service.shutdown_flag();
    if let Err(e) = ctrlc::set_handler(move || shutdown.store(true, Ordering::Relaxed)) {
        warn!("Failed to install Ctrl-C handler: {}", e);
    }

    let (batch_tx, batch_rx) = bounded::<PlacementBatch>(16);
    let (query_tx, query_rx) = bounded::<PlacementQuery>(16);

    let worker = std::thread::spawn(move || service.run(batch_rx, query_rx));

    // Batches arrive as JSON lines on stdin, one batch per line, in the
    // shape the placement topic carries.
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read from stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<PlacementBatch>(&line) {
            Ok(batch) => {
                if batch_tx.send(batch).is_err() {
                    // Service stopped; nothing left to feed.
                    break;
                }
            }
            Err(e) => warn!("Ignoring malformed batch message: {}", e),
        }
    }

    drop(batch_tx);
    drop(query_tx);
    if worker.join().is_err() {
        error!("Sync service thread panicked");
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        // Route the service loop's `log` records through the subscriber.
        let _ = tracing_log::LogTracer::init();
    }
}
