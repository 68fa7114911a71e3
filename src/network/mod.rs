//! Airport-domain layer over the generic graph.
//!
//! [`Network`] is the facade the loader, exporter, and CLI talk to. It
//! owns the graph and its undo history, names every mutation, and fans
//! change events out to subscribers. The payload types [`Airport`] and
//! [`Route`] carry the domain's duplicate rules in their equality impls.

mod airport;
mod events;
mod facade;

pub use airport::{Airport, GeoPoint, Route};
pub use events::NetworkEvent;
pub use facade::{LoadReport, Network, NetworkError};
