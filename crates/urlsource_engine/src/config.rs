use std::fmt;
use std::str::FromStr;

/// Which extraction strategy the pipeline applies to a response body.
///
/// Anything other than the four recognized names is kept verbatim in
/// [`OutputType::Unrecognized`] so it survives persistence and fails at
/// dispatch time instead of at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputType {
    Json,
    Xml,
    Html,
    Text,
    Unrecognized(String),
}

impl Default for OutputType {
    fn default() -> Self {
        OutputType::Unrecognized(String::new())
    }
}

impl OutputType {
    pub fn as_str(&self) -> &str {
        match self {
            OutputType::Json => "JSON",
            OutputType::Xml => "XML",
            OutputType::Html => "HTML",
            OutputType::Text => "Text",
            OutputType::Unrecognized(raw) => raw,
        }
    }
}

impl From<&str> for OutputType {
    fn from(value: &str) -> Self {
        match value {
            "JSON" => OutputType::Json,
            "XML" => OutputType::Xml,
            "HTML" => OutputType::Html,
            "Text" => OutputType::Text,
            other => OutputType::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for OutputType {
    fn from(value: String) -> Self {
        OutputType::from(value.as_str())
    }
}

impl FromStr for OutputType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OutputType::from(s))
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to perform one request and pick a value out of its body.
///
/// Only one selector is consulted per call: `output_json_path` for JSON,
/// `output_xpath` for XML and HTML, `output_regex` for Text. An empty
/// selector means "the whole body".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestConfig {
    pub url: String,
    pub method: String,
    pub body: String,
    /// Sent in order; repeated names are all sent.
    pub headers: Vec<(String, String)>,
    pub output_type: OutputType,
    pub output_json_path: String,
    pub output_xpath: String,
    pub output_regex: String,
    /// Persisted but not consulted by extraction.
    pub output_regex_flags: String,
    /// Persisted but not consulted by extraction.
    pub output_regex_group: String,
}

impl RequestConfig {
    pub fn new(url: impl Into<String>, output_type: OutputType) -> Self {
        Self {
            url: url.into(),
            method: "GET".to_string(),
            output_type,
            ..Self::default()
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Stores `selector` in the field the current output type reads.
    /// Unrecognized output types have no selector and ignore it.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        let selector = selector.into();
        match self.output_type {
            OutputType::Json => self.output_json_path = selector,
            OutputType::Xml | OutputType::Html => self.output_xpath = selector,
            OutputType::Text => self.output_regex = selector,
            OutputType::Unrecognized(_) => {}
        }
        self
    }

    /// The selector consulted for the configured output type.
    pub fn active_selector(&self) -> Option<&str> {
        match self.output_type {
            OutputType::Json => Some(self.output_json_path.as_str()),
            OutputType::Xml | OutputType::Html => Some(self.output_xpath.as_str()),
            OutputType::Text => Some(self.output_regex.as_str()),
            OutputType::Unrecognized(_) => None,
        }
    }
}
