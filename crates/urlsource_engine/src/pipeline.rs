use source_logging::source_info;

use crate::decode::decode_body;
use crate::error::{PipelineError, TransportError, TransportFailureKind};
use crate::extract::select;
use crate::response::{Extraction, Response};
use crate::transport::{ReqwestTransport, Transport, TransportSettings};
use crate::RequestConfig;

/// Performs one request with the default transport settings, blocking the
/// calling thread until the exchange and extraction are finished.
pub fn run(config: &RequestConfig) -> Response {
    run_with_settings(config, TransportSettings::default())
}

/// Blocking variant of [`run_with`] using a [`ReqwestTransport`] built from
/// `settings`.
///
/// When called from a thread that already drives a tokio runtime, the
/// request runs on a short-lived helper thread, since a runtime cannot be
/// blocked on from inside another one.
pub fn run_with_settings(config: &RequestConfig, settings: TransportSettings) -> Response {
    if tokio::runtime::Handle::try_current().is_err() {
        return block_on_request(config, settings);
    }

    let joined = std::thread::scope(|scope| {
        scope
            .spawn(move || block_on_request(config, settings))
            .join()
    });
    joined.unwrap_or_else(|_| {
        let err = TransportError::new(
            TransportFailureKind::Init,
            "request thread terminated unexpectedly",
        );
        source_info!("Failed to send request: {}", err);
        Response::from(Err(PipelineError::Transport(err)))
    })
}

fn block_on_request(config: &RequestConfig, settings: TransportSettings) -> Response {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let err = TransportError::new(
                TransportFailureKind::Init,
                format!("failed to start request runtime: {err}"),
            );
            source_info!("Failed to send request: {}", err);
            return Response::from(Err(PipelineError::Transport(err)));
        }
    };
    let transport = ReqwestTransport::new(settings);
    runtime.block_on(run_with(&transport, config))
}

/// Runs transport, decoding and extraction for `config`.
///
/// Every completed HTTP exchange counts as a success at this layer,
/// whatever its status line says; only transport failures and extraction
/// failures produce [`Response::Failure`].
pub async fn run_with(transport: &dyn Transport, config: &RequestConfig) -> Response {
    Response::from(execute(transport, config).await)
}

async fn execute(
    transport: &dyn Transport,
    config: &RequestConfig,
) -> Result<Extraction, PipelineError> {
    let output = transport.execute(config).await.map_err(|err| {
        source_info!("Failed to send request: {}", err);
        PipelineError::from(err)
    })?;

    let decoded = decode_body(&output.bytes, output.content_type.as_deref());
    let body_parsed = select(&decoded.text, config).map_err(|err| {
        source_info!(
            "Failed to extract {} output from {}: {}",
            config.output_type,
            config.url,
            err
        );
        PipelineError::from(err)
    })?;

    Ok(Extraction {
        body: decoded.text,
        body_parsed,
    })
}
