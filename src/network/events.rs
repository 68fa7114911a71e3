//! Change notifications emitted by the network facade.

use core::fmt;

/// A committed mutation of the airport network.
///
/// Events are emitted after the change is applied and recorded; observers
/// see them in mutation order and cannot veto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    /// An airport was inserted.
    AirportAdded {
        /// Code of the new airport.
        code: String,
    },
    /// An airport and its incident routes were removed.
    AirportRemoved {
        /// Code of the removed airport.
        code: String,
    },
    /// A route was inserted.
    RouteAdded {
        /// Code of one endpoint.
        origin: String,
        /// Code of the other endpoint.
        destination: String,
    },
    /// A route was removed.
    RouteRemoved {
        /// Code of one endpoint.
        origin: String,
        /// Code of the other endpoint.
        destination: String,
    },
    /// A dataset replaced the whole network.
    Loaded {
        /// Airports inserted by the load.
        airports: usize,
        /// Routes inserted by the load.
        routes: usize,
    },
    /// The network was emptied.
    Cleared,
    /// An undo replaced the live graph with a snapshot.
    Restored {
        /// Label of the mutation that was rolled back.
        operation: String,
    },
}

/// Registered mutation listeners.
///
/// Listeners live on the facade, not the graph: undo replaces the graph
/// wholesale, and a hook stored inside it would vanish with every restore.
#[derive(Default)]
pub(crate) struct Subscribers {
    listeners: Vec<Box<dyn FnMut(&NetworkEvent)>>,
}

impl Subscribers {
    pub(crate) fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, listener: impl FnMut(&NetworkEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub(crate) fn emit(&mut self, event: &NetworkEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
