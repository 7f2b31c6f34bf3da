use serde_json::Value;

use crate::error::ParseError;
use crate::extract::Extractor;

/// Resolves an RFC 6901 JSON pointer and returns the compact text of the hit.
///
/// A string leaf comes back without its surrounding quotes; every other
/// value keeps its literal JSON form.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPointerExtractor;

impl Extractor for JsonPointerExtractor {
    fn extract(&self, body: &str, selector: &str) -> Result<String, ParseError> {
        let document: Value = serde_json::from_str(body)
            .map_err(|err| ParseError::BodyMalformed(err.to_string()))?;

        if selector.is_empty() {
            return Ok(document.to_string());
        }
        if !selector.starts_with('/') {
            return Err(ParseError::InvalidSelector(format!(
                "JSON pointer {selector:?} must be empty or start with '/'"
            )));
        }

        let value = document.pointer(selector).ok_or_else(|| {
            ParseError::SelectorNotFound(format!("JSON pointer {selector:?} not found"))
        })?;
        Ok(strip_string_quotes(value.to_string()))
    }
}

fn strip_string_quotes(text: String) -> String {
    if text.len() > 1 && text.starts_with('"') && text.ends_with('"') {
        text[1..text.len() - 1].to_string()
    } else {
        text
    }
}
