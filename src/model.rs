use thiserror::Error;

use crate::application::{Application, ApplicationSlug, SlugError};
use crate::capabilities::core_api::LookupError;

/// Monotonic counter tagging in-flight lookups.
///
/// Every key assignment bumps the counter; a completion is applied only if it
/// carries the current value, so a superseded lookup can never overwrite the
/// entity resolved for a newer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Where the screen stands between instantiation and a settled lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Unresolved,
    Resolved(Application),
    Failed(AppError),
}

/// Complete state of the detail screen: the key that drove the last lookup,
/// the staleness guard, and the resolution discriminant the renderer matches
/// on. Entity fields are only reachable through the `Resolved` arm.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    slug: Option<ApplicationSlug>,
    generation: Generation,
    resolution: Resolution,
}

impl Model {
    /// Records a key assignment: bumps the generation, remembers the slug and
    /// drops any previously resolved entity. Returns the generation the caller
    /// must tag the outgoing lookup with.
    pub fn begin_lookup(&mut self, slug: ApplicationSlug) -> Generation {
        self.generation = self.generation.next();
        self.slug = Some(slug);
        self.resolution = Resolution::Unresolved;
        self.generation
    }

    /// Whether a completion tagged with `generation` belongs to the lookup
    /// currently in flight. False for anything stale, and for completions
    /// arriving before any lookup was begun.
    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.slug.is_some() && generation == self.generation
    }

    /// Applies a successful completion. The record must carry the slug the
    /// lookup was issued for; anything else is a service integrity fault and
    /// lands in the error branch instead of resolving.
    pub fn complete(&mut self, requested: &ApplicationSlug, application: Application) {
        if application.slug == *requested {
            self.resolution = Resolution::Resolved(application);
        } else {
            self.resolution = Resolution::Failed(AppError::SlugMismatch {
                requested: requested.clone(),
                received: application.slug,
            });
        }
    }

    pub fn fail(&mut self, error: AppError) {
        self.resolution = Resolution::Failed(error);
    }

    #[must_use]
    pub fn slug(&self) -> Option<&ApplicationSlug> {
        self.slug.as_ref()
    }

    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    #[must_use]
    pub fn application(&self) -> Option<&Application> {
        match &self.resolution {
            Resolution::Resolved(application) => Some(application),
            Resolution::Unresolved | Resolution::Failed(_) => None,
        }
    }
}

/// Screen-level failure, the payload of `Resolution::Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("application {slug} was not found")]
    NotFound { slug: ApplicationSlug },

    #[error("application lookup failed: {message}")]
    Lookup { message: String, retryable: bool },

    #[error("invalid application slug {given:?}: {reason}")]
    InvalidSlug { given: String, reason: String },

    #[error("lookup for {requested} returned a record for {received}")]
    SlugMismatch {
        requested: ApplicationSlug,
        received: ApplicationSlug,
    },
}

impl AppError {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Application not found",
            Self::Lookup { .. } => "Lookup failed",
            Self::InvalidSlug { .. } => "Invalid application slug",
            Self::SlugMismatch { .. } => "Unexpected lookup result",
        }
    }

    #[must_use]
    pub fn user_facing_message(&self) -> String {
        match self {
            Self::NotFound { slug } => {
                format!("No application exists with slug '{slug}'. It may have been deleted.")
            }
            Self::Lookup {
                message,
                retryable: true,
            } => {
                format!("The application could not be loaded: {message}. Please try again.")
            }
            Self::Lookup {
                message,
                retryable: false,
            } => format!("The application could not be loaded: {message}."),
            Self::InvalidSlug { given, .. } => {
                format!("'{given}' is not a valid application slug.")
            }
            Self::SlugMismatch { .. } => {
                "The server returned a different application than requested.".to_string()
            }
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::InvalidSlug { .. } => false,
            Self::Lookup { retryable, .. } => *retryable,
            Self::SlugMismatch { .. } => true,
        }
    }
}

impl From<SlugError> for AppError {
    fn from(err: SlugError) -> Self {
        Self::InvalidSlug {
            given: err.given,
            reason: err.reason.to_string(),
        }
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        let retryable = err.is_retryable();
        match err {
            LookupError::NotFound { slug } => Self::NotFound { slug },
            LookupError::Transport {
                status: Some(status),
                message,
            } => Self::Lookup {
                message: format!("{message} (status {status})"),
                retryable,
            },
            LookupError::Transport {
                status: None,
                message,
            } => Self::Lookup { message, retryable },
            LookupError::InvalidBody { message } => Self::Lookup {
                message: format!("the response could not be decoded: {message}"),
                retryable,
            },
        }
    }
}
