pub mod controller;
pub mod item;

pub use controller::{apply_batch, BatchOutcome};
