//! Splitting a loaded project into editable and passthrough sections, and
//! reassembling the full document for persistence.

use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::{debug, info};

use crate::error::DocumentError;
use crate::placement::PlacedObject;
use crate::updater::item::BODY_ITEM_CLASS;

const ITEMS_KEY: &str = "items";
const CHILDREN_KEY: &str = "children";
const VIEWS_KEY: &str = "views";
const TOOLBARS_KEY: &str = "toolbars";
const BODY_KEY: &str = "Body";
const VIEW_AREAS_KEY: &str = "viewAreas";
const TOOLBAR_LAYOUT_KEY: &str = "layoutOfToolBars";

/// A scene project decomposed into the item subtree this crate mutates
/// and the sections it carries through untouched.
///
/// Created once at bootstrap and kept for the process lifetime; every
/// batch mutates the item subtree in place and [`SceneDocument::merge`]
/// reassembles the full document for the storage writer.
#[derive(Debug, Clone)]
pub struct SceneDocument {
    /// Top-level entries outside the known sections, in original order.
    header: Mapping,
    /// The `items` mapping minus its `children` list.
    items_meta: Mapping,
    /// The editable item subtree.
    item_children: Vec<Value>,
    views: Option<Value>,
    toolbars: Option<Value>,
    body: Option<Value>,
    view_areas: Option<Value>,
    toolbar_layout: Option<Value>,
}

impl SceneDocument {
    /// Reads and splits the project file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DocumentError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let root: Value = serde_yaml::from_str(&content).map_err(|e| DocumentError::ParseYaml {
            path: path.to_path_buf(),
            source: e,
        })?;
        info!("Loaded project file '{}'", path.display());

        Self::split(root)
    }

    /// Decomposes a parsed document root into its sections.
    ///
    /// The `items` mapping is required; each passthrough section is
    /// optional. A missing `items.children` list is an empty item
    /// subtree, not an error.
    pub fn split(root: Value) -> Result<Self, DocumentError> {
        let root = match root {
            Value::Mapping(map) => map,
            _ => return Err(DocumentError::NotAMapping),
        };

        let mut header = Mapping::new();
        let mut items: Option<Mapping> = None;
        let mut views = None;
        let mut toolbars = None;
        let mut body = None;
        let mut view_areas = None;
        let mut toolbar_layout = None;

        for (key, value) in root {
            match key.as_str() {
                Some(ITEMS_KEY) => match value {
                    Value::Mapping(map) => items = Some(map),
                    _ => return Err(DocumentError::MissingItems),
                },
                Some(VIEWS_KEY) => views = Some(value),
                Some(TOOLBARS_KEY) => toolbars = Some(value),
                Some(BODY_KEY) => body = Some(value),
                Some(VIEW_AREAS_KEY) => view_areas = Some(value),
                Some(TOOLBAR_LAYOUT_KEY) => toolbar_layout = Some(value),
                _ => {
                    header.insert(key, value);
                }
            }
        }

        let items = items.ok_or(DocumentError::MissingItems)?;
        let mut items_meta = Mapping::new();
        let mut item_children = Vec::new();
        for (key, value) in items {
            if key.as_str() == Some(CHILDREN_KEY) {
                match value {
                    Value::Sequence(children) => item_children = children,
                    _ => return Err(DocumentError::MalformedChildren),
                }
            } else {
                items_meta.insert(key, value);
            }
        }

        debug!(
            "Project split: {} root items, {} passthrough sections",
            item_children.len(),
            [&views, &toolbars, &body, &view_areas, &toolbar_layout]
                .iter()
                .filter(|section| section.is_some())
                .count()
        );

        Ok(Self {
            header,
            items_meta,
            item_children,
            views,
            toolbars,
            body,
            view_areas,
            toolbar_layout,
        })
    }

    /// Reassembles the full document: header entries first, then the
    /// items mapping with the current item subtree, then each passthrough
    /// section that was present at load, in their canonical order.
    pub fn merge(&self) -> Value {
        let mut root = self.header.clone();

        let mut items = self.items_meta.clone();
        items.insert(
            Value::from(CHILDREN_KEY),
            Value::Sequence(self.item_children.clone()),
        );
        root.insert(Value::from(ITEMS_KEY), Value::Mapping(items));

        let sections = [
            (VIEWS_KEY, &self.views),
            (TOOLBARS_KEY, &self.toolbars),
            (BODY_KEY, &self.body),
            (VIEW_AREAS_KEY, &self.view_areas),
            (TOOLBAR_LAYOUT_KEY, &self.toolbar_layout),
        ];
        for (key, section) in sections {
            if let Some(section) = section {
                root.insert(Value::from(key), section.clone());
            }
        }

        Value::Mapping(root)
    }

    /// The item subtree root list.
    pub fn items(&self) -> &[Value] {
        &self.item_children
    }

    pub fn items_mut(&mut self) -> &mut Vec<Value> {
        &mut self.item_children
    }

    /// Read-only snapshot of every body item currently in the tree, for
    /// the placement query channel.
    pub fn placements(&self) -> Vec<PlacedObject> {
        fn collect(nodes: &[Value], out: &mut Vec<PlacedObject>) {
            for node in nodes {
                if node.get("class").and_then(Value::as_str) == Some(BODY_ITEM_CLASS) {
                    if let Some(placed) = PlacedObject::from_item(node) {
                        out.push(placed);
                    }
                }
                if let Some(children) = node.get(CHILDREN_KEY).and_then(Value::as_sequence) {
                    collect(children, out);
                }
            }
        }

        let mut placements = Vec::new();
        collect(&self.item_children, &mut placements);
        placements
    }
}
