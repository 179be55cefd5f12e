pub mod core_api;

pub use self::core_api::{decode_application, CoreApi, LookupError, LookupOperation, LookupResult};

pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

/// Everything the shell wires into the core. The derived `Effect` enum is the
/// surface shells service: render requests and core API lookups.
#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub core_api: CoreApi<Event>,
}
