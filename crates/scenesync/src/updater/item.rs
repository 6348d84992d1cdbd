//! Construction of replacement body item nodes.

use serde_yaml::{Mapping, Value};

use crate::config::UpdateRule;
use crate::geometry::Quaternion;

pub const BODY_PLUGIN: &str = "Body";
pub const BODY_ITEM_CLASS: &str = "BodyItem";
pub const BODY_FORMAT: &str = "CHOREONOID-BODY";

/// Builds one body item mapping for a placement, in the key layout the
/// project format expects.
///
/// `sequence_id` is the 1-based position of the placement within its
/// batch; `instance_no` numbers the instances of one object group, so the
/// node is named `{update_object}-{instance_no}`. The z coordinate comes
/// from the rule's offset, and the orientation matrix is written to both
/// the root and the initial attitude fields.
pub fn build_item(
    rule: &UpdateRule,
    sequence_id: u64,
    instance_no: usize,
    x: f64,
    y: f64,
    orientation: Quaternion,
) -> Value {
    let position = [x, y, rule.offset_z];
    let attitude = orientation.rotation_matrix();

    let mut data = Mapping::new();
    data.insert("file".into(), rule.body_file.clone().into());
    data.insert("format".into(), BODY_FORMAT.into());
    data.insert("rootPosition".into(), number_seq(&position));
    data.insert("rootAttitude".into(), number_seq(&attitude));
    data.insert("initialPosition".into(), number_seq(&position));
    data.insert("initialAttitude".into(), number_seq(&attitude));
    data.insert("fix_root".into(), true.into());
    data.insert("collisionDetection".into(), true.into());
    data.insert("selfCollisionDetection".into(), false.into());
    data.insert("lock_location".into(), false.into());
    data.insert("scene_sensitive".into(), true.into());
    data.insert("zmp".into(), number_seq(&[0.0, 0.0, 0.0]));

    let mut item = Mapping::new();
    item.insert("id".into(), sequence_id.into());
    item.insert(
        "name".into(),
        format!("{}-{}", rule.update_object, instance_no).into(),
    );
    item.insert("plugin".into(), BODY_PLUGIN.into());
    item.insert("class".into(), BODY_ITEM_CLASS.into());
    item.insert("is_checked".into(), true.into());
    item.insert("data".into(), Value::Mapping(data));

    Value::Mapping(item)
}

fn number_seq(values: &[f64]) -> Value {
    Value::Sequence(values.iter().map(|v| Value::from(*v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_rule() -> UpdateRule {
        UpdateRule {
            name: "Table".to_string(),
            body_file: "/models/table.body".to_string(),
            top_layer: "FreeSpace".to_string(),
            update_object: "Table-120x120".to_string(),
            offset_z: 0.72,
        }
    }

    #[test]
    fn item_layout_matches_project_format() {
        let item = build_item(&table_rule(), 1, 0, 1.0, 2.0, Quaternion::IDENTITY);

        let keys: Vec<_> = item
            .as_mapping()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["id", "name", "plugin", "class", "is_checked", "data"]);

        assert_eq!(item.get("id").unwrap().as_u64(), Some(1));
        assert_eq!(item.get("name").unwrap().as_str(), Some("Table-120x120-0"));
        assert_eq!(item.get("plugin").unwrap().as_str(), Some("Body"));
        assert_eq!(item.get("class").unwrap().as_str(), Some("BodyItem"));
        assert_eq!(item.get("is_checked").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn data_block_carries_placement_and_flags() {
        let item = build_item(&table_rule(), 3, 1, 1.0, 2.0, Quaternion::IDENTITY);
        let data = item.get("data").unwrap();

        assert_eq!(data.get("file").unwrap().as_str(), Some("/models/table.body"));
        assert_eq!(data.get("format").unwrap().as_str(), Some("CHOREONOID-BODY"));

        let position: Vec<f64> = data
            .get("rootPosition")
            .unwrap()
            .as_sequence()
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();
        assert_eq!(position, vec![1.0, 2.0, 0.72]);
        assert_eq!(data.get("initialPosition"), data.get("rootPosition"));
        assert_eq!(data.get("initialAttitude"), data.get("rootAttitude"));

        assert_eq!(data.get("fix_root").unwrap().as_bool(), Some(true));
        assert_eq!(data.get("collisionDetection").unwrap().as_bool(), Some(true));
        assert_eq!(
            data.get("selfCollisionDetection").unwrap().as_bool(),
            Some(false)
        );
        assert_eq!(data.get("lock_location").unwrap().as_bool(), Some(false));
        assert_eq!(data.get("scene_sensitive").unwrap().as_bool(), Some(true));

        let zmp = data.get("zmp").unwrap().as_sequence().unwrap();
        assert_eq!(zmp.len(), 3);
    }

    #[test]
    fn attitude_is_flattened_row_major() {
        let half = std::f64::consts::FRAC_1_SQRT_2;
        let quarter_turn = Quaternion {
            w: half,
            x: 0.0,
            y: 0.0,
            z: half,
        };
        let item = build_item(&table_rule(), 1, 0, 0.0, 0.0, quarter_turn);

        let attitude: Vec<f64> = item
            .get("data")
            .unwrap()
            .get("rootAttitude")
            .unwrap()
            .as_sequence()
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();

        let expected = [0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        for (a, e) in attitude.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-12);
        }
    }
}
