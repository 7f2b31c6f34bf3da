//! URL source engine: request execution, value extraction and config persistence.
mod codec;
mod config;
mod decode;
mod error;
mod extract;
mod persist;
mod pipeline;
mod response;
mod select_json;
mod select_text;
mod select_xml;
mod transport;
mod worker;

pub use codec::{deserialize_request, serialize_request};
pub use config::{OutputType, RequestConfig};
pub use decode::{decode_body, DecodedBody};
pub use error::{
    ParseError, PipelineError, TransportError, TransportFailureKind, FAILURE_STATUS,
    SUCCESS_STATUS,
};
pub use extract::{select, Extractor};
pub use persist::{load_request_config, save_request_config, AtomicFileWriter, PersistError};
pub use pipeline::{run, run_with, run_with_settings};
pub use response::{Extraction, Response};
pub use select_json::JsonPointerExtractor;
pub use select_text::RegexExtractor;
pub use select_xml::XPathExtractor;
pub use transport::{ReqwestTransport, Transport, TransportOutput, TransportSettings, USER_AGENT};
pub use worker::{RequestCompleted, RequestId, RequestWorker};
