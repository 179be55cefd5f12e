use crate::application::ApplicationSlug;
use crate::capabilities::core_api::LookupResult;
use crate::model::Generation;

/// Everything that can happen to the screen, whether from the shell's router
/// or from a settling capability request.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The router assigned the key for this screen.
    SlugChanged { slug: String },

    /// A lookup settled. Carries the generation and slug that initiated it so
    /// stale completions can be told apart from the current one.
    ApplicationLoaded {
        generation: Generation,
        slug: ApplicationSlug,
        result: Box<LookupResult>,
    },

    /// The user asked to retry after a failed lookup.
    RetryRequested,
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SlugChanged { .. } => "slug_changed",
            Self::ApplicationLoaded { .. } => "application_loaded",
            Self::RetryRequested => "retry_requested",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_stable() {
        assert_eq!(
            Event::SlugChanged {
                slug: "app1".into()
            }
            .name(),
            "slug_changed"
        );
        assert_eq!(Event::RetryRequested.name(), "retry_requested");
    }

    #[test]
    fn event_stays_small() {
        // Completion payloads are boxed so the enum stays cheap to move
        // through the capability channels.
        assert!(std::mem::size_of::<Event>() <= 64);
    }
}
