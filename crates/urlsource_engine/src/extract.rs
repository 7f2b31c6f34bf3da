use crate::error::ParseError;
use crate::select_json::JsonPointerExtractor;
use crate::select_text::RegexExtractor;
use crate::select_xml::XPathExtractor;
use crate::{OutputType, RequestConfig};

/// One extraction strategy. Implementations are stateless; an empty selector
/// always means "the whole body".
pub trait Extractor: Send + Sync {
    fn extract(&self, body: &str, selector: &str) -> Result<String, ParseError>;
}

/// Picks the extractor for `config.output_type` and applies its selector.
///
/// An unrecognized output type fails before the body is looked at.
pub fn select(body: &str, config: &RequestConfig) -> Result<String, ParseError> {
    match &config.output_type {
        OutputType::Json => JsonPointerExtractor.extract(body, &config.output_json_path),
        OutputType::Xml | OutputType::Html => XPathExtractor.extract(body, &config.output_xpath),
        OutputType::Text => RegexExtractor.extract(body, &config.output_regex),
        OutputType::Unrecognized(raw) => Err(ParseError::InvalidOutputType(raw.clone())),
    }
}
