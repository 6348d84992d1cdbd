pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod service;
pub mod storage;
pub mod updater;

pub use config::{load_config, load_config_from_str, Config, UpdateRule, UpdateTable};
pub use document::{InsertOutcome, SceneDocument};
pub use error::{ConfigError, DocumentError, Result, SceneSyncError, StorageError};
pub use geometry::Quaternion;
pub use placement::{ObjectPlacement, PlacedObject, PlacementBatch, Point, Pose};
pub use service::{PlacementQuery, SyncService};
pub use storage::ProjectWriter;
pub use updater::{apply_batch, BatchOutcome};
