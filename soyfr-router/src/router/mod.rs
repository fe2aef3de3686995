//! Router module.
//!
//! Path patterns, the route table and the dispatcher that ties them to the
//! current route and session history.

pub mod dispatcher;
pub mod pattern;
pub mod table;

pub use dispatcher::{normalize, Dispatch, Dispatcher};
pub use pattern::{Params, PathPattern, Segment};
pub use table::{handler, CurrentRoute, Handler, RouteContext, RouteTable};
