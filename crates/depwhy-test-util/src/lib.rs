//! Shared test utilities for the depwhy workspace.
//!
//! `xtask` needs `normalize_nondeterministic` at runtime (not behind `#[cfg(test)]`), so this
//! lives in its own crate.

use serde_json::Value;
use std::path::PathBuf;

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// 1. **Root-only**: `tool.version` becomes `"__VERSION__"` only when the root object is an
///    analysis envelope (has `schema`, `tool`, `verdict`, `issues` and `explanations`).
/// 2. **Recursive**: `started_at` and `finished_at` become `"__TIMESTAMP__"` at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "verdict", "issues", "explanations"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("name")
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// `<workspace>/tests/fixtures`, resolved from a crate's manifest directory.
pub fn fixtures_dir(manifest_dir: &str) -> PathBuf {
    let mut dir = PathBuf::from(manifest_dir);
    // crates/<name> -> workspace root; xtask -> workspace root
    while !dir.join("tests").join("fixtures").is_dir() {
        if !dir.pop() {
            break;
        }
    }
    dir.join("tests").join("fixtures")
}
