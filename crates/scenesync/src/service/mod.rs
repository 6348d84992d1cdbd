//! Channel-driven dispatch: one batch at a time, through the storage
//! write, before the next message is taken.
//!
//! The transport hands batches over a channel and serializes dispatch by
//! construction; nothing here suspends mid-mutation, so the
//! prune-before-insert invariant holds without locking.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{select, Receiver, Sender};
use log::{debug, error, info, warn};

use crate::config::UpdateTable;
use crate::document::SceneDocument;
use crate::placement::{PlacedObject, PlacementBatch};
use crate::storage::ProjectWriter;
use crate::updater::{apply_batch, BatchOutcome};

/// A placement query carrying its reply channel.
pub struct PlacementQuery {
    pub reply: Sender<Vec<PlacedObject>>,
}

/// Owns the split document and applies batches to it for the process
/// lifetime.
pub struct SyncService {
    document: SceneDocument,
    table: UpdateTable,
    writer: ProjectWriter,
    shutdown: Arc<AtomicBool>,
}

impl SyncService {
    pub fn new(document: SceneDocument, table: UpdateTable, writer: ProjectWriter) -> Self {
        Self {
            document,
            table,
            writer,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops [`SyncService::run`] when set.
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Handles one inbound batch: mutate, merge, persist.
    ///
    /// A storage failure is logged and survived; the accumulated document
    /// state is carried forward and lands on disk with the next
    /// successful write.
    pub fn handle_batch(&mut self, batch: &PlacementBatch) -> BatchOutcome {
        info!("Subscribed placement batch with {} entries", batch.objects.len());

        let outcome = apply_batch(&mut self.document, &self.table, batch);
        debug!(
            "Batch applied: {} inserted, {} unconfigured, {} without container",
            outcome.inserted, outcome.unconfigured, outcome.missing_container
        );

        let merged = self.document.merge();
        if let Err(e) = self.writer.write(&merged) {
            error!("Failed to persist project file: {}. Write skipped.", e);
        }

        outcome
    }

    /// Serves batches and placement queries until the shutdown flag is
    /// set or the batch channel disconnects.
    pub fn run(mut self, batches: Receiver<PlacementBatch>, queries: Receiver<PlacementQuery>) {
        info!("Placement sync service started");
        let mut queries = queries;

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                info!("Shutdown requested, stopping service");
                break;
            }

            let mut queries_disconnected = false;
            select! {
                recv(batches) -> msg => match msg {
                    Ok(batch) => {
                        self.handle_batch(&batch);
                    }
                    Err(_) => {
                        debug!("Batch channel disconnected");
                        break;
                    }
                },
                recv(queries) -> msg => match msg {
                    Ok(query) => {
                        let snapshot = self.document.placements();
                        if query.reply.send(snapshot).is_err() {
                            warn!("Placement query reply channel closed");
                        }
                    }
                    Err(_) => {
                        debug!("Query channel disconnected");
                        queries_disconnected = true;
                    }
                },
                default(Duration::from_millis(100)) => {}
            }

            // Queries are optional; a closed query channel must not stop
            // batch handling, but a disconnected receiver is always ready,
            // so it is swapped for one that never delivers.
            if queries_disconnected {
                queries = crossbeam_channel::never();
            }
        }

        info!("Placement sync service stopped");
    }
}
