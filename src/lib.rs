//!MaxCut of weighted graphs through their
//![Ising model](https://en.wikipedia.org/wiki/Ising_model).
//!
//!A graph read from a `weight,node1,node2` edge list becomes the spin model
//!`E(s) = Σ w_uv s_u s_v`. A solver returns assignments lowest energy
//!first, and each one is read back as a cut of value `(W - E) / 2` where `W`
//!is the total edge weight.
//!
//!# Example
//!
//!```rust,no_run
//!extern crate ising_cut;
//!
//!use ising_cut::*;
//!
//!pub fn main() -> Result<()> {
//!    let graph = WeightedGraph::load("graph.txt", Weighting::Weighted)?;
//!    let model = IsingModel::from_graph(&graph);
//!    let w = model.total_weight();
//!
//!    // Writes a WCNF file and calls `akmaxsat` on it.
//!    let samples = MaxSat::default().solve(&model)?;
//!
//!    if let Some(best) = extract(&samples, w)?.into_best() {
//!        println!("cut value {} with S0 = {:?}", best.cut_value, best.s0);
//!    }
//!    Ok(())
//!}
//!```
//!

#![warn(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    //unused_qualifications,
    unused_labels,
    //unused_results
)]

pub mod config;
pub mod cut;
pub mod draw;
mod error;
pub mod graph;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod sample;
pub mod solver;
pub mod wcnf;

pub use crate::config::Config;
pub use crate::cut::{CutResult, Extraction, cut_value, extract};
pub use crate::error::{Error, Result};
pub use crate::graph::{NodeId, WeightedGraph, Weighting};
pub use crate::model::IsingModel;
pub use crate::persist::{DirectoryLayout, PathResolver, ResultRecord, RunParams, persist};
pub use crate::sample::{Sample, SampleSet, Spin};
pub use crate::solver::{MaxSat, Solver};

#[macro_use]
extern crate serde_derive;

use env_logger::{Builder, Env};
use log::LevelFilter;

fn init_log(level: LevelFilter) {
    // RUST_LOG takes precedence over `level`.
    let _ = Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_target(false)
        .try_init();
}
pub fn init_default_log() {
    init_log(LevelFilter::Info)
}
pub fn init_debug_log() {
    init_log(LevelFilter::Trace)
}
