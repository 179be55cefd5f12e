#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod application;
pub mod capabilities;
pub mod event;
pub mod model;
pub mod view;

pub use app::App;
pub use application::{
    Application, ApplicationPk, ApplicationSlug, ProviderPk, ProviderRef, SlugError,
};
pub use capabilities::{
    decode_application, Capabilities, CoreApi, Effect, LookupError, LookupOperation, LookupResult,
};
pub use event::Event;
pub use model::{AppError, Generation, Model, Resolution};
pub use view::{ViewModel, ViewState};
