//! Ising models built from weighted graphs.
//!
//! A graph with edge weights `w_uv` becomes the spin model
//! `E(s) = Σ w_uv s_u s_v` with no linear term. Under this encoding an
//! edge contributes `-w_uv` when cut and `+w_uv` otherwise, so for the total
//! weight `W` the cut value of an assignment is `(W - E(s)) / 2`.

use crate::error::{Error, Result};
use crate::graph::{NodeId, WeightedGraph};
use crate::sample::Spin;
use std::collections::BTreeMap;

/// Binary quadratic model over spin variables.
#[derive(Debug, Clone, PartialEq)]
pub struct IsingModel {
    variables: Vec<NodeId>,
    couplings: Vec<(NodeId, NodeId, f64)>,
    total_weight: f64,
}

impl IsingModel {
    /// One coupling per edge, equal to the edge weight.
    pub fn from_graph(graph: &WeightedGraph) -> Self {
        let couplings: Vec<_> = graph.edges().collect();
        let total_weight = couplings.iter().map(|&(_, _, w)| w).sum();
        Self {
            variables: graph.nodes().collect(),
            couplings,
            total_weight,
        }
    }

    /// Variables in increasing order.
    pub fn variables(&self) -> &[NodeId] {
        &self.variables
    }

    /// Couplings `(u, v, J_uv)` with `u < v`.
    pub fn couplings(&self) -> &[(NodeId, NodeId, f64)] {
        &self.couplings
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_interactions(&self) -> usize {
        self.couplings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.couplings.is_empty()
    }

    /// Sum of the weights of the graph the model was built from.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Energy of a spin assignment.
    pub fn energy(&self, spins: &BTreeMap<NodeId, Spin>) -> Result<f64> {
        let spin = |v: NodeId| {
            spins
                .get(&v)
                .map(|s| f64::from(s.value()))
                .ok_or(Error::MissingVariable(v))
        };
        self.couplings
            .iter()
            .map(|&(u, v, j)| -> Result<f64> { Ok(j * spin(u)? * spin(v)?) })
            .sum()
    }

    /// Position of each variable in `variables()`.
    pub(crate) fn index(&self) -> BTreeMap<NodeId, usize> {
        self.variables.iter().enumerate().map(|(i, &v)| (v, i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Weighting;

    fn triangle() -> WeightedGraph {
        WeightedGraph::from_reader("1.0,0,1\n2.0,1,2\n1.5,0,2\n".as_bytes(), Weighting::Weighted)
            .unwrap()
    }

    #[test]
    fn one_coupling_per_edge() {
        let model = IsingModel::from_graph(&triangle());
        assert_eq!(model.variables(), &[0, 1, 2]);
        assert_eq!(model.couplings(), &[(0, 1, 1.0), (0, 2, 1.5), (1, 2, 2.0)]);
        assert_eq!(model.total_weight(), 4.5);
    }

    #[test]
    fn total_weight_ignores_edge_order() {
        let edges = [(0, 1, 0.1), (1, 2, 0.2), (2, 3, 0.3), (3, 0, 0.4), (0, 2, 0.5)];
        let forward = IsingModel::from_graph(&WeightedGraph::new(edges).unwrap());
        let backward =
            IsingModel::from_graph(&WeightedGraph::new(edges.into_iter().rev()).unwrap());
        assert_eq!(forward.total_weight(), backward.total_weight());
        assert!((forward.total_weight() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn energy_of_assignment() {
        let model = IsingModel::from_graph(&triangle());
        let spins = [(0, Spin::Down), (1, Spin::Up), (2, Spin::Down)]
            .into_iter()
            .collect();
        // 0-1 cut, 1-2 cut, 0-2 not cut
        assert_eq!(model.energy(&spins).unwrap(), -1.0 - 2.0 + 1.5);
    }

    #[test]
    fn missing_variable() {
        let model = IsingModel::from_graph(&triangle());
        let spins = [(0, Spin::Down), (1, Spin::Up)].into_iter().collect();
        assert!(matches!(model.energy(&spins), Err(Error::MissingVariable(2))));
    }

    #[test]
    fn empty_graph_gives_empty_model() {
        let model = IsingModel::from_graph(&WeightedGraph::default());
        assert!(model.is_empty());
        assert_eq!(model.total_weight(), 0.);
        assert_eq!(model.energy(&BTreeMap::new()).unwrap(), 0.);
    }
}
