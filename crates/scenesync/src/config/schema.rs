use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the input and output project files.
    #[serde(default = "default_project_dir")]
    pub project_dir: PathBuf,
    #[serde(default = "default_input_file")]
    pub input_project_file: String,
    #[serde(default = "default_output_file")]
    pub output_project_file: String,
    /// Replace the output file in place instead of moving the previous
    /// one out of the way first.
    #[serde(default)]
    pub overwrite_output: bool,
    #[serde(default = "default_placement_topic")]
    pub placement_topic: String,
    #[serde(default = "default_query_topic")]
    pub query_topic: String,
    /// Quasi-static objects tracked by this node.
    #[serde(default)]
    pub update_items: Vec<UpdateRule>,
}

fn default_project_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scenesync")
}

fn default_input_file() -> String {
    "scene_input.cnoid".to_string()
}

fn default_output_file() -> String {
    "scene_output.cnoid".to_string()
}

fn default_placement_topic() -> String {
    "/simulator_bridge/object_location".to_string()
}

fn default_query_topic() -> String {
    "/simulator_bridge/get_object_location".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_dir: default_project_dir(),
            input_project_file: default_input_file(),
            output_project_file: default_output_file(),
            overwrite_output: false,
            placement_topic: default_placement_topic(),
            query_topic: default_query_topic(),
            update_items: Vec::new(),
        }
    }
}

impl Config {
    pub fn input_path(&self) -> PathBuf {
        self.project_dir.join(&self.input_project_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.project_dir.join(&self.output_project_file)
    }
}

/// One entry of the quasi-static object update table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRule {
    /// Identity carried by inbound placement entries.
    pub name: String,
    /// Model file recorded in every rebuilt item node.
    pub body_file: String,
    /// Name of the container item that receives new instances.
    pub top_layer: String,
    /// Prefix used both for instance names and for removal matching.
    pub update_object: String,
    /// Height offset applied to every placement of this object.
    #[serde(default)]
    pub offset_z: f64,
}

/// Ordered update-rule table with first-match lookup.
#[derive(Debug, Clone, Default)]
pub struct UpdateTable {
    rules: Vec<UpdateRule>,
}

impl UpdateTable {
    pub fn new(rules: Vec<UpdateRule>) -> Self {
        Self { rules }
    }

    /// First rule whose `name` equals `identity`. `None` is a normal
    /// outcome that callers branch on, not an error.
    pub fn get(&self, identity: &str) -> Option<&UpdateRule> {
        self.rules.iter().find(|rule| rule.name == identity)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
