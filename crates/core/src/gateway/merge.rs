//! Folding supplementary query results back into the primary page blocks.

use std::collections::HashMap;

use serde_json::{Map, Value};

use page_content_path::as_i64;

use crate::block::{ContentBlock, SectionKind};

const THERAPY_LISTS: [&str; 2] = ["Therapy", "therapies"];

/// Replace every block of `kind` with its enriched copy: the one with the
/// same id, else the first enriched block. No enriched blocks is a no-op.
pub fn replace_blocks(
    blocks: Vec<ContentBlock>,
    kind: SectionKind,
    enriched: &[ContentBlock],
) -> Vec<ContentBlock> {
    let Some(first) = enriched.first() else {
        return blocks;
    };
    blocks
        .into_iter()
        .map(|block| {
            if block.kind() != Some(kind) {
                return block;
            }
            let replacement = enriched
                .iter()
                .find(|e| e.id.is_some() && e.id == block.id)
                .unwrap_or(first);
            replacement.clone()
        })
        .collect()
}

/// Distinct therapy ids referenced by therapy sections, in page order.
pub fn therapy_ids(blocks: &[ContentBlock]) -> Vec<i64> {
    let mut ids = Vec::new();
    for block in blocks.iter().filter(|b| b.kind() == Some(SectionKind::Therapies)) {
        let Some(items) = THERAPY_LISTS
            .iter()
            .find_map(|key| block.fields.get(*key).and_then(Value::as_array))
        else {
            continue;
        };
        for id in items.iter().filter_map(|item| item.get("id").and_then(as_i64)) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Index therapy entries by id, flattening `attributes` envelopes.
pub fn index_therapies(entries: Vec<Value>) -> HashMap<i64, Map<String, Value>> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let Value::Object(mut obj) = entry else {
                return None;
            };
            let id = obj.get("id").and_then(as_i64)?;
            if let Some(Value::Object(attrs)) = obj.remove("attributes") {
                obj.extend(attrs);
            }
            Some((id, obj))
        })
        .collect()
}

/// Shallow-merge enriched therapy entries over the matching list items.
/// Items without an enriched counterpart are left untouched.
pub fn merge_therapies(
    blocks: Vec<ContentBlock>,
    therapies: &HashMap<i64, Map<String, Value>>,
) -> Vec<ContentBlock> {
    if therapies.is_empty() {
        return blocks;
    }
    blocks
        .into_iter()
        .map(|mut block| {
            if block.kind() != Some(SectionKind::Therapies) {
                return block;
            }
            for key in THERAPY_LISTS {
                if let Some(Value::Array(items)) = block.fields.get_mut(key) {
                    for item in items.iter_mut() {
                        merge_item(item, therapies);
                    }
                    break;
                }
            }
            block
        })
        .collect()
}

fn merge_item(item: &mut Value, therapies: &HashMap<i64, Map<String, Value>>) {
    let Some(id) = item.get("id").and_then(as_i64) else {
        return;
    };
    let (Some(enriched), Value::Object(target)) = (therapies.get(&id), item) else {
        return;
    };
    for (key, value) in enriched {
        target.insert(key.clone(), value.clone());
    }
    target.insert("id".into(), Value::from(id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slider(id: i64, marker: &str) -> ContentBlock {
        ContentBlock::new("dynamic-zone.slider-section", json!({"id": id, "marker": marker}))
    }

    #[test]
    fn replace_by_id_then_first() {
        let blocks = vec![
            slider(1, "plain-1"),
            ContentBlock::new("dynamic-zone.hero", json!({"id": 1})),
            slider(9, "plain-9"),
        ];
        let enriched = vec![slider(5, "rich-5"), slider(1, "rich-1")];
        let merged = replace_blocks(blocks, SectionKind::Slider, &enriched);
        assert_eq!(merged[0].fields["marker"], "rich-1");
        assert_eq!(merged[1].kind(), Some(SectionKind::Hero));
        assert_eq!(merged[2].fields["marker"], "rich-5");
    }

    #[test]
    fn nothing_enriched_keeps_blocks() {
        let blocks = vec![slider(1, "plain")];
        assert_eq!(replace_blocks(blocks.clone(), SectionKind::Slider, &[]), blocks);
    }

    #[test]
    fn therapy_ids_are_distinct_and_ordered() {
        let blocks = vec![
            ContentBlock::new("dynamic-zone.therapy-section", json!({"Therapy": [{"id": 3}, {"id": 1}]})),
            ContentBlock::new("dynamic-zone.therapy-section", json!({"therapies": [{"id": 1}, {"id": 4}, {}]})),
        ];
        assert_eq!(therapy_ids(&blocks), vec![3, 1, 4]);
    }

    #[test]
    fn therapies_are_shallow_merged() {
        let blocks = vec![ContentBlock::new(
            "dynamic-zone.therapy-section",
            json!({"Therapy": [
                {"id": 3, "name": "CAR-T", "order": 1},
                {"id": 8, "name": "Proton"}
            ]}),
        )];
        let index = index_therapies(vec![json!({
            "id": 3,
            "attributes": {"name": "CAR-T Cell Therapy", "featuredImage": {"url": "/uploads/cart.png"}}
        })]);
        let merged = merge_therapies(blocks, &index);
        let items = merged[0].fields["Therapy"].as_array().unwrap();
        assert_eq!(items[0]["name"], "CAR-T Cell Therapy");
        assert_eq!(items[0]["order"], 1);
        assert_eq!(items[0]["featuredImage"]["url"], "/uploads/cart.png");
        assert_eq!(items[1], json!({"id": 8, "name": "Proton"}));
    }
}
