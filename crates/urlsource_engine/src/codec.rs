//! Text form of a [`RequestConfig`] for the host's settings store.
//!
//! The format is a single JSON object:
//!
//! ```json
//! {"url":"…","method":"GET","body":"","output_type":"JSON",
//!  "output_json_path":"/a","output_xpath":"","output_regex":"",
//!  "output_regex_flags":"","output_regex_group":"","headers":{"Accept":"…"}}
//! ```
//!
//! Headers are stored as a name → value object, so repeated header names do
//! not survive a round trip: the last value wins and keeps the position of
//! the first occurrence.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use source_logging::source_warn;

use crate::{OutputType, RequestConfig};

#[derive(Debug, Serialize, Deserialize)]
struct PersistedRequest {
    url: String,
    method: String,
    body: String,
    output_type: String,
    output_json_path: String,
    output_xpath: String,
    output_regex: String,
    output_regex_flags: String,
    output_regex_group: String,
    headers: Map<String, Value>,
}

pub fn serialize_request(config: &RequestConfig) -> String {
    let mut headers = Map::new();
    for (name, value) in &config.headers {
        headers.insert(name.clone(), Value::String(value.clone()));
    }

    let persisted = PersistedRequest {
        url: config.url.clone(),
        method: config.method.clone(),
        body: config.body.clone(),
        output_type: config.output_type.as_str().to_string(),
        output_json_path: config.output_json_path.clone(),
        output_xpath: config.output_xpath.clone(),
        output_regex: config.output_regex.clone(),
        output_regex_flags: config.output_regex_flags.clone(),
        output_regex_group: config.output_regex_group.clone(),
        headers,
    };

    // A struct of strings and a string map cannot fail to serialize.
    serde_json::to_string(&persisted).unwrap_or_default()
}

/// Reads a config back. Anything that is not exactly the persisted shape
/// yields [`RequestConfig::default`].
pub fn deserialize_request(text: &str) -> RequestConfig {
    match try_deserialize(text) {
        Ok(config) => config,
        Err(reason) => {
            source_warn!("Failed to parse persisted request data: {}", reason);
            RequestConfig::default()
        }
    }
}

fn try_deserialize(text: &str) -> Result<RequestConfig, String> {
    let persisted: PersistedRequest =
        serde_json::from_str(text).map_err(|err| err.to_string())?;

    let headers = persisted
        .headers
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(value) => Ok((name, value)),
            other => Err(format!("header {name:?} has non-string value {other}")),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RequestConfig {
        url: persisted.url,
        method: persisted.method,
        body: persisted.body,
        headers,
        output_type: OutputType::from(persisted.output_type),
        output_json_path: persisted.output_json_path,
        output_xpath: persisted.output_xpath,
        output_regex: persisted.output_regex,
        output_regex_flags: persisted.output_regex_flags,
        output_regex_group: persisted.output_regex_group,
    })
}
