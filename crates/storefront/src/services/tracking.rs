//! Event tracking.
//!
//! Events are logged and recorded as Sentry breadcrumbs so they show up in
//! the trail of later error reports. There is no analytics pipeline.

use tracing::info;

use crate::error::add_breadcrumb;

/// Breadcrumb category for tracked events.
pub const TRACKING_CATEGORY: &str = "analytics";

/// Record a named event with arbitrary data.
pub fn track_event(name: &str, data: &serde_json::Value) {
    info!(event_name = name, data = %data, "Event tracked");

    let fields = match data {
        serde_json::Value::Object(map) => Some(map.clone()),
        serde_json::Value::Null => None,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("value".to_string(), other.clone());
            Some(map)
        }
    };
    add_breadcrumb(TRACKING_CATEGORY, name, fields.as_ref());
}
