use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use source_logging::{source_debug, source_error, source_warn};

use crate::error::{PipelineError, TransportError, TransportFailureKind};
use crate::pipeline::run_with;
use crate::transport::{ReqwestTransport, TransportSettings};
use crate::{RequestConfig, Response};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCompleted {
    pub request_id: RequestId,
    pub response: Response,
}

struct Submission {
    request_id: RequestId,
    config: RequestConfig,
}

/// Runs pipeline invocations on a background thread for hosts that cannot
/// block. Submissions are handled one at a time, in order.
///
/// Dropping the worker closes its queue; the thread exits once the request
/// in flight, if any, has finished.
pub struct RequestWorker {
    submit_tx: mpsc::Sender<Submission>,
    completed_rx: mpsc::Receiver<RequestCompleted>,
}

impl RequestWorker {
    pub fn new(settings: TransportSettings) -> Self {
        let (submit_tx, submit_rx) = mpsc::channel::<Submission>();
        let (completed_tx, completed_rx) = mpsc::channel();

        thread::spawn(move || {
            let transport = ReqwestTransport::new(settings);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build();
            let runtime = match runtime {
                Ok(runtime) => Some(runtime),
                Err(err) => {
                    source_error!("Failed to start request worker runtime: {}", err);
                    None
                }
            };

            while let Ok(Submission { request_id, config }) = submit_rx.recv() {
                source_debug!("Request {} started for {}", request_id, config.url);
                let response = match runtime.as_ref() {
                    Some(runtime) => runtime.block_on(run_with(&transport, &config)),
                    None => Response::from(Err(PipelineError::Transport(TransportError::new(
                        TransportFailureKind::Init,
                        "request worker runtime unavailable",
                    )))),
                };
                if completed_tx
                    .send(RequestCompleted {
                        request_id,
                        response,
                    })
                    .is_err()
                {
                    break;
                }
            }
        });

        Self {
            submit_tx,
            completed_rx,
        }
    }

    /// Queues a request. Returns `false` when the worker thread is gone and
    /// the request will never complete.
    pub fn submit(&self, request_id: RequestId, config: RequestConfig) -> bool {
        match self.submit_tx.send(Submission { request_id, config }) {
            Ok(()) => true,
            Err(_) => {
                source_warn!("Request {} dropped: worker thread has stopped", request_id);
                false
            }
        }
    }

    pub fn try_recv(&self) -> Option<RequestCompleted> {
        self.completed_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<RequestCompleted> {
        self.completed_rx.recv_timeout(timeout).ok()
    }
}
