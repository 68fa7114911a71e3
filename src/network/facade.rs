//! The airport network facade.
//!
//! [`Network`] wraps a `Graph<Airport, Route>` together with a [`History`]
//! and exposes the graph's operations as named business actions. Every
//! mutator follows the same discipline: validate, capture a snapshot,
//! apply, record the snapshot under an operation label, then emit one
//! [`NetworkEvent`]. Failed validations leave both the graph and the
//! history untouched.
//!
//! Name arguments are matched case-insensitively against airport codes and
//! names, first match in insertion order.

use tracing::{debug, warn};

use crate::graph::{
    analytics::{
        average_edge_weight, degree_percentage, isolated_vertices, max_edge_by_weight,
        min_edge_by_weight,
    },
    EdgeId, Graph, GraphError, VertexId,
};
use crate::history::{History, HistoryError, Snapshot};
use crate::network::airport::{Airport, Route};
use crate::network::events::{NetworkEvent, Subscribers};
use crate::path::{farthest_pair, shortest_path, PathResult};

use thiserror::Error;

/// Failure modes of the network facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// No airport matches the requested name or code.
    #[error("no airport named `{name}`")]
    UnknownAirport {
        /// The name as given by the caller.
        name: String,
    },
    /// An airport with the same name already exists.
    #[error("an airport named `{name}` already exists")]
    DuplicateAirport {
        /// The conflicting name.
        name: String,
    },
    /// The two airports are not joined by any route.
    #[error("no route joins `{origin}` and `{destination}`")]
    UnknownRoute {
        /// Code of one requested endpoint.
        origin: String,
        /// Code of the other requested endpoint.
        destination: String,
    },
    /// The two airports are already joined by a route.
    #[error("a route already joins `{origin}` and `{destination}`")]
    DuplicateRoute {
        /// Code of one endpoint.
        origin: String,
        /// Code of the other endpoint.
        destination: String,
    },
    /// A structural operation failed in the underlying container.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The undo stack was empty.
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Outcome of a bulk dataset load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Airports inserted.
    pub airports: usize,
    /// Routes inserted.
    pub routes: usize,
    /// Records skipped: duplicate airports, routes naming unknown codes,
    /// and duplicate route pairs.
    pub skipped: usize,
}

/// An undoable airport network over a labeled graph.
#[derive(Debug, Default)]
pub struct Network {
    graph: Graph<Airport, Route>,
    history: History<Airport, Route>,
    subscribers: Subscribers,
}

impl Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            history: History::new(),
            subscribers: Subscribers::new(),
        }
    }

    /// Borrows the underlying graph for direct queries.
    pub fn graph(&self) -> &Graph<Airport, Route> {
        &self.graph
    }

    /// Registers a listener invoked after every committed mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&NetworkEvent) + 'static) {
        self.subscribers.push(listener);
    }

    fn resolve(&self, name: &str) -> Result<VertexId, NetworkError> {
        self.graph
            .find_vertex_by(|airport| {
                airport.code.eq_ignore_ascii_case(name) || airport.name.eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| NetworkError::UnknownAirport {
                name: name.to_owned(),
            })
    }

    /// Adds an airport.
    ///
    /// # Errors
    /// [`NetworkError::DuplicateAirport`] if an airport with the same
    /// name (case-insensitive) exists.
    pub fn add_airport(&mut self, airport: Airport) -> Result<VertexId, NetworkError> {
        let snapshot = Snapshot::capture(&self.graph);
        let code = airport.code.clone();
        let name = airport.name.clone();
        let id = match self.graph.insert_vertex(airport) {
            Ok(id) => id,
            Err(GraphError::DuplicateVertex) => {
                return Err(NetworkError::DuplicateAirport { name })
            }
            Err(other) => return Err(other.into()),
        };
        self.history.record(snapshot, format!("add airport {code}"));
        debug!(code = %code, "airport added");
        self.subscribers.emit(&NetworkEvent::AirportAdded { code });
        Ok(id)
    }

    /// Removes the airport matching `name` along with its routes, returning
    /// its payload.
    ///
    /// # Errors
    /// [`NetworkError::UnknownAirport`] if nothing matches.
    pub fn remove_airport(&mut self, name: &str) -> Result<Airport, NetworkError> {
        let id = self.resolve(name)?;
        let snapshot = Snapshot::capture(&self.graph);
        let airport = self.graph.remove_vertex(id)?;
        self.history
            .record(snapshot, format!("remove airport {}", airport.code));
        debug!(code = %airport.code, "airport removed");
        self.subscribers.emit(&NetworkEvent::AirportRemoved {
            code: airport.code.clone(),
        });
        Ok(airport)
    }

    /// Finds the airport matching `name` (code or full name).
    pub fn find_airport(&self, name: &str) -> Option<VertexId> {
        self.graph.find_vertex_by(|airport| {
            airport.code.eq_ignore_ascii_case(name) || airport.name.eq_ignore_ascii_case(name)
        })
    }

    /// Borrows the payload behind an airport handle.
    ///
    /// # Errors
    /// [`NetworkError::Graph`] if the handle is stale or foreign.
    pub fn airport(&self, id: VertexId) -> Result<&Airport, NetworkError> {
        Ok(self.graph.vertex(id)?)
    }

    /// All airports, in insertion order.
    pub fn airports(&self) -> impl Iterator<Item = &Airport> + '_ {
        self.graph.vertex_entries().map(|(_, airport)| airport)
    }

    /// Number of airports.
    pub fn airport_count(&self) -> usize {
        self.graph.num_vertices()
    }

    /// Adds a route of `distance` between two airports named `from` and `to`.
    ///
    /// # Errors
    /// [`NetworkError::UnknownAirport`] if either name resolves to nothing;
    /// [`NetworkError::DuplicateRoute`] if the pair is already joined.
    pub fn add_route(&mut self, from: &str, to: &str, distance: u32) -> Result<EdgeId, NetworkError> {
        let u = self.resolve(from)?;
        let v = self.resolve(to)?;
        let origin = self.graph.vertex(u)?.code.clone();
        let destination = self.graph.vertex(v)?.code.clone();

        let snapshot = Snapshot::capture(&self.graph);
        let route = Route::new(origin.clone(), destination.clone(), distance);
        let id = match self.graph.insert_edge(u, v, route) {
            Ok(id) => id,
            Err(GraphError::DuplicateEdge) => {
                return Err(NetworkError::DuplicateRoute {
                    origin,
                    destination,
                })
            }
            Err(other) => return Err(other.into()),
        };
        self.history
            .record(snapshot, format!("add route {origin}-{destination}"));
        debug!(origin = %origin, destination = %destination, distance, "route added");
        self.subscribers.emit(&NetworkEvent::RouteAdded {
            origin,
            destination,
        });
        Ok(id)
    }

    /// Removes the route joining `from` and `to`, returning its payload.
    ///
    /// # Errors
    /// [`NetworkError::UnknownAirport`] if either name resolves to nothing;
    /// [`NetworkError::UnknownRoute`] if the pair is not joined.
    pub fn remove_route(&mut self, from: &str, to: &str) -> Result<Route, NetworkError> {
        let u = self.resolve(from)?;
        let v = self.resolve(to)?;
        let origin = self.graph.vertex(u)?.code.clone();
        let destination = self.graph.vertex(v)?.code.clone();
        let Some(edge) = self.graph.edge_between(u, v)? else {
            return Err(NetworkError::UnknownRoute {
                origin,
                destination,
            });
        };

        let snapshot = Snapshot::capture(&self.graph);
        let route = self.graph.remove_edge(edge)?;
        self.history
            .record(snapshot, format!("remove route {origin}-{destination}"));
        debug!(origin = %origin, destination = %destination, "route removed");
        self.subscribers.emit(&NetworkEvent::RouteRemoved {
            origin,
            destination,
        });
        Ok(route)
    }

    /// Finds the route joining `from` and `to`, if both names resolve and
    /// the pair is joined.
    pub fn route_between(&self, from: &str, to: &str) -> Option<EdgeId> {
        let u = self.find_airport(from)?;
        let v = self.find_airport(to)?;
        self.graph.edge_between(u, v).ok().flatten()
    }

    /// Borrows the payload behind a route handle.
    ///
    /// # Errors
    /// [`NetworkError::Graph`] if the handle is stale or foreign.
    pub fn route(&self, id: EdgeId) -> Result<&Route, NetworkError> {
        Ok(self.graph.edge(id)?)
    }

    /// All routes, each exactly once.
    pub fn routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.graph.edge_entries().map(|(_, route)| route)
    }

    /// Number of routes.
    pub fn route_count(&self) -> usize {
        self.graph.num_edges()
    }

    /// Computes the least-distance path between two named airports.
    ///
    /// # Errors
    /// [`NetworkError::UnknownAirport`] if either name resolves to nothing.
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<PathResult<u32>, NetworkError> {
        let u = self.resolve(from)?;
        let v = self.resolve(to)?;
        Ok(shortest_path(&self.graph, u, v)?)
    }

    /// Finds the pair of connected airports whose shortest path is the most
    /// costly in the whole network.
    pub fn farthest_airports(&self) -> PathResult<u32> {
        farthest_pair(&self.graph)
    }

    /// Resolves a path's hops to airport codes, skipping stale handles.
    pub fn path_codes(&self, result: &PathResult<u32>) -> Vec<String> {
        result
            .hops()
            .iter()
            .filter_map(|&hop| self.graph.vertex(hop).ok())
            .map(|airport| airport.code.clone())
            .collect()
    }

    /// Share of airports whose route count lies in `min..=max`, as a
    /// percentage. Pass `usize::MAX` as `max` for an open upper bound.
    pub fn connection_percentage(&self, min: usize, max: usize) -> f64 {
        degree_percentage(&self.graph, min..=max)
    }

    /// Mean route distance, or `None` when the network has no routes.
    pub fn average_route_distance(&self) -> Option<f64> {
        average_edge_weight(&self.graph)
    }

    /// The longest route, or `None` when the network has no routes.
    pub fn longest_route(&self) -> Option<(EdgeId, &Route)> {
        let id = max_edge_by_weight(&self.graph)?;
        Some((id, self.graph.get_edge(id)?))
    }

    /// The shortest route, or `None` when the network has no routes.
    pub fn shortest_route(&self) -> Option<(EdgeId, &Route)> {
        let id = min_edge_by_weight(&self.graph)?;
        Some((id, self.graph.get_edge(id)?))
    }

    /// Airports with no routes, sorted by code.
    pub fn isolated_airports(&self) -> Vec<&Airport> {
        let mut isolated: Vec<&Airport> = isolated_vertices(&self.graph)
            .into_iter()
            .filter_map(|id| self.graph.vertex(id).ok())
            .collect();
        isolated.sort_by(|a, b| a.code.cmp(&b.code));
        isolated
    }

    /// The `k` best-connected airports with their route counts, degree
    /// descending, insertion order on ties.
    pub fn most_connected(&self, k: usize) -> Vec<(&Airport, usize)> {
        self.graph
            .rank_by_degree()
            .into_iter()
            .take(k)
            .filter_map(|(id, degree)| self.graph.vertex(id).ok().map(|airport| (airport, degree)))
            .collect()
    }

    /// Replaces the whole network with a dataset's records.
    ///
    /// The previous state is captured once, so a single undo reverts the
    /// entire load. Duplicate airports, routes naming unknown codes, and
    /// duplicate route pairs are skipped and tallied, not fatal.
    pub fn load<A, R>(&mut self, airports: A, routes: R) -> LoadReport
    where
        A: IntoIterator<Item = Airport>,
        R: IntoIterator<Item = Route>,
    {
        let snapshot = Snapshot::capture(&self.graph);
        self.graph.clear();

        let mut report = LoadReport::default();
        for airport in airports {
            let code = airport.code.clone();
            match self.graph.insert_vertex(airport) {
                Ok(_) => report.airports += 1,
                Err(_) => {
                    warn!(code = %code, "skipping duplicate airport record");
                    report.skipped += 1;
                }
            }
        }
        for route in routes {
            let origin = route.origin.clone();
            let destination = route.destination.clone();
            let endpoints = (
                self.graph
                    .find_vertex_by(|a| a.code.eq_ignore_ascii_case(&route.origin)),
                self.graph
                    .find_vertex_by(|a| a.code.eq_ignore_ascii_case(&route.destination)),
            );
            let (Some(u), Some(v)) = endpoints else {
                warn!(origin = %origin, destination = %destination, "skipping route with unknown endpoint");
                report.skipped += 1;
                continue;
            };
            match self.graph.insert_edge(u, v, route) {
                Ok(_) => report.routes += 1,
                Err(_) => {
                    warn!(origin = %origin, destination = %destination, "skipping duplicate route record");
                    report.skipped += 1;
                }
            }
        }

        self.history.record(snapshot, "load dataset");
        debug!(
            airports = report.airports,
            routes = report.routes,
            skipped = report.skipped,
            "dataset loaded"
        );
        self.subscribers.emit(&NetworkEvent::Loaded {
            airports: report.airports,
            routes: report.routes,
        });
        report
    }

    /// Empties the network. Undoable like any other mutation.
    pub fn clear(&mut self) {
        let snapshot = Snapshot::capture(&self.graph);
        self.graph.clear();
        self.history.record(snapshot, "clear network");
        debug!("network cleared");
        self.subscribers.emit(&NetworkEvent::Cleared);
    }

    /// Rolls back the most recent mutation, returning its label.
    ///
    /// # Errors
    /// [`NetworkError::History`] if nothing has been recorded.
    pub fn undo(&mut self) -> Result<String, NetworkError> {
        let operation = self.history.undo(&mut self.graph)?;
        debug!(operation = %operation, "state restored");
        self.subscribers.emit(&NetworkEvent::Restored {
            operation: operation.clone(),
        });
        Ok(operation)
    }

    /// Number of undoable mutations.
    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn small() -> Network {
        let mut network = Network::new();
        network
            .add_airport(Airport::new("LIS", "Lisboa"))
            .unwrap();
        network.add_airport(Airport::new("POR", "Porto")).unwrap();
        network.add_route("Lisboa", "Porto", 400).unwrap();
        network
    }

    #[test]
    fn duplicate_airport_is_rejected_by_name() {
        let mut network = small();
        let err = network
            .add_airport(Airport::new("XXX", "lisboa"))
            .unwrap_err();
        assert_eq!(
            err,
            NetworkError::DuplicateAirport {
                name: "lisboa".to_owned()
            }
        );
        assert_eq!(network.airport_count(), 2);
    }

    #[test]
    fn names_and_codes_resolve_case_insensitively() {
        let network = small();
        assert!(network.find_airport("lis").is_some());
        assert!(network.find_airport("PORTO").is_some());
        assert!(network.find_airport("Madrid").is_none());
    }

    #[test]
    fn duplicate_route_is_rejected_in_both_orientations() {
        let mut network = small();
        let err = network.add_route("Porto", "Lisboa", 9000).unwrap_err();
        assert_eq!(
            err,
            NetworkError::DuplicateRoute {
                origin: "POR".to_owned(),
                destination: "LIS".to_owned()
            }
        );
        assert_eq!(network.route_count(), 1);
    }

    #[test]
    fn route_to_unknown_airport_fails() {
        let mut network = small();
        let err = network.add_route("Lisboa", "Madrid", 500).unwrap_err();
        assert_eq!(
            err,
            NetworkError::UnknownAirport {
                name: "Madrid".to_owned()
            }
        );
    }

    #[test]
    fn removing_an_airport_drops_its_routes() {
        let mut network = small();
        let removed = network.remove_airport("Lisboa").unwrap();
        assert_eq!(removed.code, "LIS");
        assert_eq!(network.airport_count(), 1);
        assert_eq!(network.route_count(), 0);
    }

    #[test]
    fn undo_returns_operation_labels_in_reverse() {
        let mut network = small();
        network.add_airport(Airport::new("ANK", "Ankara")).unwrap();
        assert_eq!(network.undo().unwrap(), "add airport ANK");
        assert_eq!(network.undo().unwrap(), "add route LIS-POR");
        assert_eq!(network.undo().unwrap(), "add airport POR");
        assert_eq!(network.undo().unwrap(), "add airport LIS");
        assert_eq!(network.airport_count(), 0);
        assert_eq!(
            network.undo(),
            Err(NetworkError::History(HistoryError::Empty))
        );
    }

    #[test]
    fn failed_mutations_record_no_history() {
        let mut network = small();
        let depth = network.history_depth();
        let _ = network.add_airport(Airport::new("XXX", "Lisboa"));
        let _ = network.add_route("Lisboa", "Porto", 1);
        let _ = network.remove_airport("Madrid");
        assert_eq!(network.history_depth(), depth);
    }

    #[test]
    fn events_fire_after_commit() {
        let seen: Rc<RefCell<Vec<NetworkEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let mut network = Network::new();
        let sink = Rc::clone(&seen);
        network.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        network.add_airport(Airport::new("LIS", "Lisboa")).unwrap();
        let _ = network.add_airport(Airport::new("XXX", "Lisboa"));
        network.clear();
        network.undo().unwrap();

        let log = seen.borrow();
        assert_eq!(
            log.as_slice(),
            &[
                NetworkEvent::AirportAdded {
                    code: "LIS".to_owned()
                },
                NetworkEvent::Cleared,
                NetworkEvent::Restored {
                    operation: "clear network".to_owned()
                },
            ]
        );
    }

    #[test]
    fn load_replaces_everything_and_tallies_skips() {
        let mut network = small();
        let report = network.load(
            vec![
                Airport::new("AAA", "Alfa"),
                Airport::new("BBB", "Bravo"),
                Airport::new("CCC", "alfa"),
            ],
            vec![
                Route::new("AAA", "BBB", 100),
                Route::new("AAA", "ZZZ", 200),
                Route::new("BBB", "AAA", 300),
            ],
        );
        assert_eq!(
            report,
            LoadReport {
                airports: 2,
                routes: 1,
                skipped: 3
            }
        );
        assert_eq!(network.airport_count(), 2);
        assert!(network.find_airport("Lisboa").is_none());

        network.undo().unwrap();
        assert_eq!(network.airport_count(), 2);
        assert!(network.find_airport("Lisboa").is_some());
        assert_eq!(network.route_count(), 1);
    }
}
