//! Road network over named locations.

use std::collections::HashMap;

use ordered_float::OrderedFloat;
use petgraph::algo::{astar, dijkstra, min_spanning_tree};
use petgraph::data::FromElements;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::error::RoutingError;

/// Fallback edge weight applied when a traffic update cycle carries no
/// reading for an edge.
pub const DEFAULT_PENALTY_WEIGHT: f64 = 10.0;

/// A bulk edge-weight update, keyed by location pair.
///
/// Key orientation does not matter when the update is applied: `(u, v)` and
/// `(v, u)` address the same undirected edge.
pub type EdgeWeights = HashMap<(String, String), f64>;

/// An undirected, simple, weighted graph over named locations.
///
/// Nodes are created implicitly when first referenced by an edge. Edge
/// topology is fixed after setup in normal operation; only weights change,
/// through [`apply_weight_updates`](RoadNetwork::apply_weight_updates).
///
/// # Examples
///
/// ```
/// use fleet_routing::graph::RoadNetwork;
///
/// let mut network = RoadNetwork::new();
/// network.add_edge("A", "B", 1.0).unwrap();
/// network.add_edge("B", "C", 1.0).unwrap();
///
/// let (path, cost) = network.shortest_path("A", "C").unwrap();
/// assert_eq!(path, vec!["A", "B", "C"]);
/// assert_eq!(cost, 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    graph: UnGraph<String, f64>,
    nodes: HashMap<String, NodeIndex>,
}

impl Default for RoadNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadNetwork {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            nodes: HashMap::new(),
        }
    }

    /// Builds a network from `(u, v, weight)` triples.
    pub fn from_edges<I, S>(edges: I) -> Result<Self, RoutingError>
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: AsRef<str>,
    {
        let mut network = Self::new();
        for (u, v, weight) in edges {
            network.add_edge(u.as_ref(), v.as_ref(), weight)?;
        }
        Ok(network)
    }

    /// Inserts a location if absent and returns its index. Idempotent.
    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        match self.nodes.get(id) {
            Some(&index) => index,
            None => {
                let index = self.graph.add_node(id.to_string());
                self.nodes.insert(id.to_string(), index);
                index
            }
        }
    }

    /// Adds the undirected edge `u`–`v`, creating missing endpoints.
    ///
    /// Overwrites the weight of an existing edge between the same pair, so
    /// the graph stays simple. Rejects negative or non-finite weights with
    /// [`RoutingError::InvalidEdgeWeight`], leaving the network unmodified.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: f64) -> Result<(), RoutingError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(RoutingError::InvalidEdgeWeight {
                from: u.to_string(),
                to: v.to_string(),
                weight,
            });
        }
        let u_index = self.add_node(u);
        let v_index = self.add_node(v);
        self.graph.update_edge(u_index, v_index, weight);
        Ok(())
    }

    /// Returns `true` if the location is a node of the network.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of locations.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Weight of the edge `u`–`v`, if both locations exist and are adjacent.
    pub fn edge_weight(&self, u: &str, v: &str) -> Option<f64> {
        let u_index = *self.nodes.get(u)?;
        let v_index = *self.nodes.get(v)?;
        let edge = self.graph.find_edge(u_index, v_index)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Sum of all edge weights. Diagnostic companion to
    /// [`minimum_spanning_tree`](RoadNetwork::minimum_spanning_tree).
    pub fn total_weight(&self) -> f64 {
        self.graph.edge_weights().copied().sum()
    }

    /// Minimum total edge-weight distance from `from` to every reachable
    /// location, via single-source Dijkstra.
    ///
    /// The result includes `from` itself at distance zero. Unreachable
    /// locations are simply absent, not an error.
    pub fn shortest_path_lengths(
        &self,
        from: &str,
    ) -> Result<HashMap<String, f64>, RoutingError> {
        let start = self.index_of(from)?;
        let costs = dijkstra(&self.graph, start, None, |edge| {
            OrderedFloat(*edge.weight())
        });
        Ok(costs
            .into_iter()
            .map(|(index, cost)| (self.graph[index].clone(), cost.into_inner()))
            .collect())
    }

    /// Minimum-weight path from `from` to `to`, with its total weight.
    ///
    /// Returns [`RoutingError::NoPath`] when `to` is unreachable from
    /// `from`, and [`RoutingError::UnknownLocation`] when either endpoint
    /// is not a node of the network.
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<(Vec<String>, f64), RoutingError> {
        let start = self.index_of(from)?;
        let goal = self.index_of(to)?;
        let (cost, path) = astar(
            &self.graph,
            start,
            |index| index == goal,
            |edge| OrderedFloat(*edge.weight()),
            |_| OrderedFloat(0.0),
        )
        .ok_or_else(|| RoutingError::NoPath {
            from: from.to_string(),
            to: to.to_string(),
        })?;
        let names = path.into_iter().map(|index| self.graph[index].clone()).collect();
        Ok((names, cost.into_inner()))
    }

    /// Spanning subgraph connecting all locations with minimum total edge
    /// weight (a forest when the network is disconnected).
    ///
    /// Used for diagnostics and exposed analysis, not on the assignment
    /// critical path.
    pub fn minimum_spanning_tree(&self) -> RoadNetwork {
        let mst = UnGraph::<String, f64>::from_elements(min_spanning_tree(&self.graph));
        let nodes = mst
            .node_indices()
            .map(|index| (mst[index].clone(), index))
            .collect();
        RoadNetwork { graph: mst, nodes }
    }

    /// Overwrites every edge weight from a traffic update set.
    ///
    /// Full-replace policy, not a merge: an edge present in `updates`
    /// (either key orientation) takes that weight; every other edge falls
    /// back to [`DEFAULT_PENALTY_WEIGHT`]. An update set that omits an edge
    /// therefore forgets any previously observed smaller weight.
    ///
    /// The whole set is validated before any mutation; a negative or
    /// non-finite weight rejects the call with
    /// [`RoutingError::InvalidEdgeWeight`] and the network is left unchanged.
    pub fn apply_weight_updates(&mut self, updates: &EdgeWeights) -> Result<(), RoutingError> {
        for ((u, v), &weight) in updates {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RoutingError::InvalidEdgeWeight {
                    from: u.clone(),
                    to: v.clone(),
                    weight,
                });
            }
        }
        for edge in self.graph.edge_indices() {
            let Some((u_index, v_index)) = self.graph.edge_endpoints(edge) else {
                continue;
            };
            let u = self.graph[u_index].clone();
            let v = self.graph[v_index].clone();
            let weight = updates
                .get(&(u.clone(), v.clone()))
                .or_else(|| updates.get(&(v, u)))
                .copied()
                .unwrap_or(DEFAULT_PENALTY_WEIGHT);
            if let Some(slot) = self.graph.edge_weight_mut(edge) {
                *slot = weight;
            }
        }
        Ok(())
    }

    /// Resets every edge to [`DEFAULT_PENALTY_WEIGHT`].
    ///
    /// Equivalent to applying an empty update set; the recovery step when a
    /// traffic cycle yields no usable data.
    pub fn reset_weights(&mut self) {
        for weight in self.graph.edge_weights_mut() {
            *weight = DEFAULT_PENALTY_WEIGHT;
        }
    }

    fn index_of(&self, id: &str) -> Result<NodeIndex, RoutingError> {
        self.nodes
            .get(id)
            .copied()
            .ok_or_else(|| RoutingError::UnknownLocation(id.to_string()))
    }
}
