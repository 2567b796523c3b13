//! Spin assignments returned by solvers.

use crate::error::{Error, Result};
use crate::graph::NodeId;
use std::collections::BTreeMap;

/// A spin variable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Spin {
    Down,
    Up,
}

impl Spin {
    pub fn value(self) -> i8 {
        match self {
            Spin::Down => -1,
            Spin::Up => 1,
        }
    }
}

impl TryFrom<i8> for Spin {
    type Error = i8;

    fn try_from(value: i8) -> std::result::Result<Self, i8> {
        match value {
            -1 => Ok(Spin::Down),
            1 => Ok(Spin::Up),
            v => Err(v),
        }
    }
}

/// One solver answer: a raw value per node and the energy the solver reports.
///
/// Values are kept as returned; they are only checked to be spins when the
/// sample is turned into a cut.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub assignment: BTreeMap<NodeId, i8>,
    pub energy: f64,
}

impl Sample {
    pub fn new(assignment: BTreeMap<NodeId, i8>, energy: f64) -> Self {
        Self { assignment, energy }
    }

    pub fn from_spins(spins: &BTreeMap<NodeId, Spin>, energy: f64) -> Self {
        Self {
            assignment: spins.iter().map(|(&v, s)| (v, s.value())).collect(),
            energy,
        }
    }

    /// The assignment as spins, failing on the first value outside {-1, +1}.
    pub fn spins(&self) -> Result<BTreeMap<NodeId, Spin>> {
        self.assignment
            .iter()
            .map(|(&node, &value)| {
                Spin::try_from(value)
                    .map(|s| (node, s))
                    .map_err(|value| Error::Domain {
                        node,
                        value: value.into(),
                    })
            })
            .collect()
    }
}

/// Samples of one solver call, lowest energy first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Wrap samples as given by a solver, which lists them best first.
    ///
    /// The order is not checked: the first sample is taken as the best.
    /// Use `from_unsorted` when the order is not known.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Sort by increasing energy; samples of equal energy keep their order.
    pub fn from_unsorted(mut samples: Vec<Sample>) -> Self {
        samples.sort_by(|a, b| a.energy.total_cmp(&b.energy));
        Self { samples }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl IntoIterator for SampleSet {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}
