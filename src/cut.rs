//! From solver samples to cut partitions.

use crate::error::Result;
use crate::graph::{NodeId, WeightedGraph};
use crate::sample::{Sample, SampleSet, Spin};
use log::*;
use std::collections::BTreeSet;
use std::fmt;

/// Cut value of a sample of energy `energy` for a graph of total weight `w`.
///
/// Only valid for models built by `IsingModel::from_graph`.
pub fn cut_value(w: f64, energy: f64) -> f64 {
    (w - energy) / 2.
}

/// The partition described by one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct CutResult {
    /// Nodes with spin -1, in increasing order.
    pub s0: Vec<NodeId>,
    /// Nodes with spin +1, in increasing order.
    pub s1: Vec<NodeId>,
    pub energy: f64,
    pub cut_value: f64,
}

impl CutResult {
    pub fn from_sample(sample: &Sample, w: f64) -> Result<Self> {
        let mut s0 = Vec::new();
        let mut s1 = Vec::new();
        for (node, spin) in sample.spins()? {
            match spin {
                Spin::Down => s0.push(node),
                Spin::Up => s1.push(node),
            }
        }
        Ok(Self {
            s0,
            s1,
            energy: sample.energy,
            cut_value: cut_value(w, sample.energy),
        })
    }

    /// Side of `v`, if `v` is part of the sample.
    pub fn side(&self, v: NodeId) -> Option<Spin> {
        if self.s0.binary_search(&v).is_ok() {
            Some(Spin::Down)
        } else if self.s1.binary_search(&v).is_ok() {
            Some(Spin::Up)
        } else {
            None
        }
    }

    /// Returns `true` if the edge `uv` has its ends on different sides.
    pub fn crosses(&self, u: NodeId, v: NodeId) -> bool {
        matches!((self.side(u), self.side(v)), (Some(a), Some(b)) if a != b)
    }

    /// Total weight of the edges of `graph` crossing the partition.
    pub fn crossing_weight(&self, graph: &WeightedGraph) -> f64 {
        graph
            .edges()
            .filter(|&(u, v, _)| self.crosses(u, v))
            .map(|(_, _, w)| w)
            .sum()
    }

    /// Every node of the sample, each on exactly one side.
    pub fn nodes(&self) -> BTreeSet<NodeId> {
        self.s0.iter().chain(&self.s1).copied().collect()
    }
}

impl fmt::Display for CutResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "S0: {:?}", self.s0)?;
        writeln!(f, "S1: {:?}", self.s1)?;
        writeln!(f, "Ising energy: {}", self.energy)?;
        write!(f, "MaxCut value: {}", self.cut_value)
    }
}

/// Cuts of all samples of a solver call, in solver order.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub cuts: Vec<CutResult>,
}

impl Extraction {
    /// The first cut, which is the best one by the solver ordering.
    pub fn best(&self) -> Option<&CutResult> {
        self.cuts.first()
    }

    pub fn into_best(self) -> Option<CutResult> {
        self.cuts.into_iter().next()
    }
}

/// Turn every sample into a cut.
///
/// Any sample with a value outside {-1, +1} makes the whole extraction fail.
pub fn extract(samples: &SampleSet, w: f64) -> Result<Extraction> {
    let cuts = samples
        .iter()
        .map(|sample| CutResult::from_sample(sample, w))
        .collect::<Result<Vec<_>>>()?;
    for (i, cut) in cuts.iter().enumerate() {
        info!("Sample {i}:\n{cut}");
    }
    if cuts.is_empty() {
        warn!("Solver returned no sample");
    }
    Ok(Extraction { cuts })
}
