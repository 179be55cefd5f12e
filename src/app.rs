use tracing::{debug, warn};

use crate::application::ApplicationSlug;
use crate::capabilities::Capabilities;
use crate::event::Event;
use crate::model::Model;
use crate::view::{self, ViewModel};

/// The application detail screen core.
#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        match event {
            Event::SlugChanged { slug } => match ApplicationSlug::new(slug) {
                Ok(slug) => {
                    Self::start_lookup(model, caps, slug);
                    caps.render.render();
                }
                Err(err) => {
                    warn!(error = %err, "rejecting slug assignment");
                    model.fail(err.into());
                    caps.render.render();
                }
            },

            Event::ApplicationLoaded {
                generation,
                slug,
                result,
            } => {
                // Last key wins: completions of superseded lookups change
                // nothing and trigger no render.
                if !model.is_current(generation) {
                    debug!(
                        slug = %slug,
                        generation = generation.value(),
                        current = model.generation().value(),
                        "discarding stale lookup completion"
                    );
                    return;
                }
                match *result {
                    Ok(application) => {
                        if application.slug != slug {
                            warn!(
                                requested = %slug,
                                received = %application.slug,
                                "lookup returned a record for a different slug"
                            );
                        }
                        model.complete(&slug, application);
                    }
                    Err(err) => {
                        warn!(slug = %slug, error = %err, "application lookup failed");
                        model.fail(err.into());
                    }
                }
                caps.render.render();
            }

            Event::RetryRequested => {
                if let Some(slug) = model.slug().cloned() {
                    Self::start_lookup(model, caps, slug);
                    caps.render.render();
                } else {
                    debug!("retry requested before any slug was set");
                }
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        view::project(model)
    }
}

impl App {
    fn start_lookup(model: &mut Model, caps: &Capabilities, slug: ApplicationSlug) {
        let generation = model.begin_lookup(slug.clone());
        debug!(slug = %slug, generation = generation.value(), "issuing application lookup");
        caps.core_api
            .read_by_slug(slug.clone(), move |result| Event::ApplicationLoaded {
                generation,
                slug,
                result: Box::new(result),
            });
    }
}
