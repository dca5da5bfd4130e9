//! Field-by-field merging of configuration tiers.

use serde_json::Value;

/// Merge `overlay` onto `base`, with `overlay` winning.
///
/// Objects merge key by key, recursively. Any other overlay value replaces the
/// base value, except `null`, which leaves the base untouched so that an empty
/// YAML key does not erase a lower tier.
///
/// # Example
/// ```
/// use serde_json::json;
/// use controls_merge::config::deep_merge;
///
/// let defaults = json!({"output": {"style": "pretty", "indent": 2}});
/// let user = json!({"output": {"indent": 4}});
/// assert_eq!(
///     deep_merge(defaults, user),
///     json!({"output": {"style": "pretty", "indent": 4}})
/// );
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Fold [`deep_merge`] over tiers ordered lowest priority first.
pub fn deep_merge_all(tiers: impl IntoIterator<Item = Value>) -> Value {
    tiers.into_iter().fold(Value::Null, deep_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overlay_sets_single_field() {
        let base = json!({"limits": {"max_bytes": 100, "max_depth": 64}});
        let overlay = json!({"limits": {"max_depth": 8}});
        assert_eq!(
            deep_merge(base, overlay),
            json!({"limits": {"max_bytes": 100, "max_depth": 8}})
        );
    }

    #[test]
    fn test_null_keeps_lower_tier() {
        let base = json!({"output": {"style": "compact"}});
        let overlay = json!({"output": {"style": null}});
        assert_eq!(deep_merge(base, overlay), json!({"output": {"style": "compact"}}));
    }

    #[test]
    fn test_scalar_replaces_object() {
        let base = json!({"output": {"style": "pretty"}});
        let overlay = json!({"output": "compact"});
        assert_eq!(deep_merge(base, overlay), json!({"output": "compact"}));
    }

    #[test]
    fn test_merge_all_later_tiers_win() {
        let tiers = vec![
            json!({"output": {"style": "pretty", "indent": 2}}),
            json!({"output": {"indent": 4}}),
            json!({"output": {"style": "compact"}, "limits": {"max_depth": 10}}),
        ];
        assert_eq!(
            deep_merge_all(tiers),
            json!({
                "output": {"style": "compact", "indent": 4},
                "limits": {"max_depth": 10}
            })
        );
    }

    #[test]
    fn test_merge_all_empty_is_null() {
        assert_eq!(deep_merge_all(Vec::new()), Value::Null);
    }
}
