//! Conversion of raw host objects into [`MenuRecord`]s.
//!
//! Normalization never fails: missing or malformed attributes fall back to their
//! defaults so one bad object cannot break the whole batch.

use std::collections::HashMap;

use navtree_types::{AttributeMapping, AttributeSource, MENU_NAME_PLACEHOLDER, MenuRecord};
use serde_json::Value;
use tracing::warn;

/// Lookup from host object id to resource object.
pub type ResourceIndex<'a, R> = HashMap<&'a str, &'a R>;

/// Indexes resource objects by their host id. Later duplicates win.
pub fn index_resources<R: AttributeSource>(resources: &[R]) -> ResourceIndex<'_, R> {
    resources.iter().map(|resource| (resource.object_id(), resource)).collect()
}

/// Normalizes every menu object, joining each with its linked resource.
///
/// One record is produced per object. A missing menu id degrades to the empty
/// string like any other missing field.
pub fn normalize_menu_records<M, R>(menus: &[M], resources: &[R], mapping: &AttributeMapping) -> Vec<MenuRecord>
where
    M: AttributeSource,
    R: AttributeSource,
{
    let index = index_resources(resources);
    menus
        .iter()
        .map(|menu| {
            let record = normalize_menu_record(menu, &index, mapping);
            if record.menu_id.is_empty() {
                warn!(guid = menu.object_id(), "Menu object has no menu id");
            }
            record
        })
        .collect()
}

/// Builds one record from a menu object and the resource index.
pub fn normalize_menu_record<M, R>(menu: &M, resources: &ResourceIndex<'_, R>, mapping: &AttributeMapping) -> MenuRecord
where
    M: AttributeSource,
    R: AttributeSource,
{
    let text = |name: &str| menu.attribute(name).and_then(value_as_string);
    let resource = resource_id(menu.attribute(&mapping.resource_association)).and_then(|id| resources.get(id.as_str()));
    let resource_text = |name: &str| resource.and_then(|resource| resource.attribute(name)).and_then(value_as_string);

    let menu_name = text(&mapping.menu_name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| MENU_NAME_PLACEHOLDER.to_string());

    MenuRecord {
        menu_id: text(&mapping.menu_id).unwrap_or_default(),
        menu_name,
        parent_menu_id: text(&mapping.parent_menu_id).filter(|id| !id.is_empty()),
        depth: menu.attribute(&mapping.depth).and_then(value_as_f64).map(depth_from).unwrap_or(0),
        sort_no: menu
            .attribute(&mapping.sort_no)
            .and_then(value_as_f64)
            .filter(|sort_no| sort_no.is_finite())
            .unwrap_or(0.0),
        display_yn: text(&mapping.display_yn),
        enabled_tf: !matches!(menu.attribute(&mapping.enabled), Some(Value::Bool(false))),
        resource_name: resource_text(&mapping.resource_name),
        resource_type: resource_text(&mapping.resource_type),
        page_url: resource_text(&mapping.page_url),
        icon_class: resource_text(&mapping.icon_class),
        guid: Some(menu.object_id().to_string()).filter(|guid| !guid.is_empty()),
    }
}

/// Extracts the linked resource id from an association value. Collections yield
/// their first element.
fn resource_id(association: Option<&Value>) -> Option<String> {
    let id = match association? {
        Value::Array(items) => items.first().and_then(value_as_string),
        other => value_as_string(other),
    };
    id.filter(|id| !id.is_empty())
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn depth_from(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}
