use serde_json::Value;

/// Resolve a nested field path, yielding `None` as soon as any intermediate
/// field is absent or the wrong shape. The timeline payloads are schema-loose,
/// so every field access in this crate goes through these helpers instead of
/// assuming a structure.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(*key))
}

/// Mutable variant of [`lookup`].
pub fn lookup_mut<'a>(value: &'a mut Value, path: &[&str]) -> Option<&'a mut Value> {
    path.iter().try_fold(value, |node, key| node.get_mut(*key))
}

/// Resolve a nested path to a string field.
pub fn lookup_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(value, path).and_then(Value::as_str)
}

/// Truthiness in the upstream payload's sense: a marker field counts as set
/// unless it is absent, `null`, or `false`. A `"promoted": false` flag must
/// not classify an entry as an ad.
pub fn truthy(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null) | Some(Value::Bool(false)))
}
