//! Resource display helpers. Pure presentation, no I/O.

use serde_json::Value;

const NO_NAME: &str = "(no name)";

/// Resolves a resource's display name.
///
/// Falls through `properties.title` (a string, or a per-locale map whose
/// values are joined with " / "), then top-level `title`, then `name`, then
/// a placeholder. When `properties` exists, the top-level fields are not
/// consulted.
pub fn display_name(resource: &Value) -> String {
    let mut name = String::new();

    if let Some(properties) = resource.get("properties") {
        match properties.get("title") {
            Some(Value::String(title)) => name = title.clone(),
            Some(Value::Object(locales)) => {
                name = locales
                    .values()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" / ");
            }
            _ => {}
        }
    } else if let Some(title) = non_empty_str(resource.get("title")) {
        name = title.to_string();
    } else if let Some(plain) = non_empty_str(resource.get("name")) {
        name = plain.to_string();
    }

    if name.is_empty() {
        NO_NAME.to_string()
    } else {
        name
    }
}

/// Sorts resources by display name, for listings.
pub fn sort_by_display_name(resources: &mut [Value]) {
    resources.sort_by_key(display_name);
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
