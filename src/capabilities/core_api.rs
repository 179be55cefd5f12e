use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::{Application, ApplicationSlug};

/// Outcome of a slug lookup, as delivered by the shell.
pub type LookupResult = Result<Application, LookupError>;

/// Requests this core issues against the console's read API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LookupOperation {
    ReadBySlug { slug: ApplicationSlug },
}

impl Operation for LookupOperation {
    type Output = LookupResult;
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum LookupError {
    #[error("no application with slug {slug}")]
    NotFound { slug: ApplicationSlug },

    #[error("transport failure: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("undecodable response body: {message}")]
    InvalidBody { message: String },
}

impl LookupError {
    /// Classifies an HTTP-level outcome. Shell adapters call this so every
    /// platform maps failures identically: 404 means the slug does not
    /// resolve, anything else non-2xx is a transport fault whose message is
    /// taken from the `{"detail": ...}` envelope when the body carries one.
    #[must_use]
    pub fn from_status(slug: &ApplicationSlug, status: u16, body: &[u8]) -> Self {
        if status == 404 {
            return Self::NotFound { slug: slug.clone() };
        }
        Self::Transport {
            status: Some(status),
            message: error_detail(body)
                .unwrap_or_else(|| format!("request failed with status {status}")),
        }
    }

    /// Whether retrying the same lookup can plausibly succeed. Server-side
    /// and connection-level faults are retryable; a missing slug or a body
    /// the core cannot decode is not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::InvalidBody { .. } => false,
            Self::Transport {
                status: Some(status),
                ..
            } => *status == 408 || *status == 429 || *status >= 500,
            Self::Transport { status: None, .. } => true,
        }
    }
}

/// Decodes a success body into the application record, for shell adapters.
/// Decode failures surface as `InvalidBody` and end up in the error branch
/// rather than panicking a shell.
pub fn decode_application(body: &[u8]) -> LookupResult {
    serde_json::from_slice(body).map_err(|err| LookupError::InvalidBody {
        message: err.to_string(),
    })
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    detail: Option<String>,
}

fn error_detail(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorEnvelope>(body).ok()?.detail
}

/// Capability giving the core access to the console's read API.
#[derive(Clone)]
pub struct CoreApi<E> {
    context: CapabilityContext<LookupOperation, E>,
}

impl<Ev> Capability<Ev> for CoreApi<Ev> {
    type Operation = LookupOperation;
    type MappedSelf<MappedEv> = CoreApi<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        CoreApi::new(self.context.map_event(f))
    }
}

impl<Ev> CoreApi<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<LookupOperation, Ev>) -> Self {
        Self { context }
    }

    /// Asks the shell to read the application addressed by `slug`. The
    /// outcome re-enters `update` as the event built by `make_event`.
    pub fn read_by_slug<F>(&self, slug: ApplicationSlug, make_event: F)
    where
        Ev: Send,
        F: FnOnce(LookupResult) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context
                .request_from_shell(LookupOperation::ReadBySlug { slug })
                .await;
            context.update_app(make_event(result));
        });
    }
}
