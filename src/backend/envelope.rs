use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const RESULT_SUCCESS: &str = "success";

const FAILURE_FIELDS: [&str; 4] = ["error", "errors", "message", "detail"];

/// Accepts `{ "result": "success", ... }` and rejects everything else.
pub fn open(body: Value) -> Result<Value> {
    if body.get("result").and_then(Value::as_str) == Some(RESULT_SUCCESS) {
        return Ok(body);
    }

    let reason = FAILURE_FIELDS
        .iter()
        .filter_map(|field| body.get(*field))
        .find(|value| !value.is_null())
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| body.to_string());

    return Err(anyhow!("backend rejected request: {reason}"));
}

pub fn take<T: DeserializeOwned>(body: &mut Value, field: &str) -> Result<T> {
    let value = body
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| anyhow!("backend response is missing `{field}`"))?;

    let parsed = serde_json::from_value(value)
        .with_context(|| format!("backend response has a malformed `{field}`"))?;

    return Ok(parsed);
}
