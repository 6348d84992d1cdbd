pub mod sections;
pub mod tree;

pub use sections::SceneDocument;
pub use tree::{insert_into, insert_under, prune_matching, InsertOutcome};
