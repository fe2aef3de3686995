//! Client-side route dispatch.
//!
//! A [`Dispatcher`] matches locations against a [`RouteTable`] and runs the
//! first matching handler, which records the active view in a shared
//! current-route cell. Navigation history is injected through [`History`].

pub mod config;
pub mod error;
pub mod event;
pub mod history;
pub mod presets;
pub mod router;
pub mod state;

pub use error::{Error, Result};

pub use config::{HistoryMode, NavConfig, RootTarget};
pub use event::NavEvent;
pub use history::{History, MemoryHistory};
pub use presets::{standard_dispatcher, standard_table};
pub use router::{handler, CurrentRoute, Dispatch, Dispatcher, Handler, Params, RouteContext, RouteTable};
pub use state::Entity;
