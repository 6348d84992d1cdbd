//! Shared harness for integration tests: a temporary project directory
//! seeded with a realistic scene project file, plus builders for update
//! tables and placement batches.

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

use scenesync::{
    ObjectPlacement, PlacementBatch, Point, Pose, ProjectWriter, Quaternion, SceneDocument,
    UpdateRule, UpdateTable,
};

/// A scene project with a nested container, one pre-existing tracked
/// instance, and every passthrough section populated.
pub const SAMPLE_PROJECT: &str = r#"optionalPlugins: [Body, PoseSeq]
items:
  id: 0
  name: RootItem
  plugin: Base
  class: RootItem
  children:
    - id: 1
      name: World
      plugin: Body
      class: WorldItem
      data:
        collision_detection: false
      children:
        - id: 2
          name: FreeSpace
          plugin: Base
          class: FolderItem
          children:
            - id: 3
              name: Table-120x120-0
              plugin: Body
              class: BodyItem
              is_checked: true
              data:
                file: ${SHARE}/LICTiA/model/Table-120x120.body
                format: CHOREONOID-BODY
                rootPosition: [0.0, 0.0, 0.72]
                rootAttitude: [1, 0, 0, 0, 1, 0, 0, 0, 1]
                initialPosition: [0.0, 0.0, 0.72]
                initialAttitude: [1, 0, 0, 0, 1, 0, 0, 0, 1]
views:
  - id: 0
    plugin: Base
    class: ItemTreeView
    mounted: true
  - id: 1
    plugin: Body
    class: BodyLinkView
toolbars:
  TimeBar:
    current_time: 0.0
Body:
  KinematicFaultChecker:
    checkJointPositions: true
viewAreas:
  - type: embedded
    tabs: true
layoutOfToolBars:
  rows:
    - - name: FileBar
        x: 0
        priority: 0
"#;

pub struct SceneHarness {
    pub temp_dir: TempDir,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl SceneHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let input_path = temp_dir.path().join("scene_input.cnoid");
        let output_path = temp_dir.path().join("scene_output.cnoid");
        std::fs::write(&input_path, SAMPLE_PROJECT).expect("seed project file");

        Self {
            temp_dir,
            input_path,
            output_path,
        }
    }

    pub fn load(&self) -> SceneDocument {
        SceneDocument::load(&self.input_path).expect("load project")
    }

    pub fn writer(&self, overwrite: bool) -> ProjectWriter {
        ProjectWriter::new(&self.output_path, overwrite)
    }

    pub fn read_output(&self) -> serde_yaml::Value {
        let content = std::fs::read_to_string(&self.output_path).expect("read output");
        serde_yaml::from_str(&content).expect("parse output")
    }
}

pub fn standard_table() -> UpdateTable {
    UpdateTable::new(vec![
        UpdateRule {
            name: "Table".to_string(),
            body_file: "${SHARE}/LICTiA/model/Table-120x120.body".to_string(),
            top_layer: "FreeSpace".to_string(),
            update_object: "Table-120x120".to_string(),
            offset_z: 0.72,
        },
        UpdateRule {
            name: "Chair".to_string(),
            body_file: "${SHARE}/LICTiA/model/Office_chair.body".to_string(),
            top_layer: "FreeSpace".to_string(),
            update_object: "Office_chair".to_string(),
            offset_z: 0.45,
        },
    ])
}

pub fn batch_of(entries: &[(&str, f64, f64)]) -> PlacementBatch {
    PlacementBatch {
        objects: entries
            .iter()
            .map(|(name, x, y)| ObjectPlacement {
                name: name.to_string(),
                new_pose: Pose {
                    position: Point {
                        x: *x,
                        y: *y,
                        z: 0.0,
                    },
                    orientation: Quaternion::IDENTITY,
                },
            })
            .collect(),
    }
}

/// Finds the `children` list of the container called `name` in a parsed
/// output document.
pub fn container_children(root: &serde_yaml::Value, name: &str) -> Vec<serde_yaml::Value> {
    fn find<'a>(node: &'a serde_yaml::Value, name: &str) -> Option<&'a serde_yaml::Value> {
        match node {
            serde_yaml::Value::Sequence(elements) => elements.iter().find_map(|e| find(e, name)),
            serde_yaml::Value::Mapping(_) => {
                if node.get("name").and_then(serde_yaml::Value::as_str) == Some(name) {
                    Some(node)
                } else {
                    node.get("children").and_then(|c| find(c, name))
                }
            }
            _ => None,
        }
    }

    let items = root.get("items").expect("items section");
    let children = items.get("children").expect("item subtree");
    find(children, name)
        .and_then(|n| n.get("children"))
        .and_then(serde_yaml::Value::as_sequence)
        .cloned()
        .unwrap_or_default()
}

pub fn item_names(children: &[serde_yaml::Value]) -> Vec<String> {
    children
        .iter()
        .filter_map(|item| item.get("name").and_then(serde_yaml::Value::as_str))
        .map(str::to_string)
        .collect()
}
