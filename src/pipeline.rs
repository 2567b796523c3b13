//! One run is Load → Build → Solve → Extract → Persist; a batch is one run
//! per seed.

use crate::config::Config;
use crate::cut::{CutResult, extract};
use crate::draw;
use crate::error::Result;
use crate::graph::WeightedGraph;
use crate::model::IsingModel;
use crate::persist::{PathResolver, RunParams, Written, persist};
use crate::solver::Solver;
use log::*;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub params: RunParams,
    pub total_weight: f64,
    pub num_samples: usize,
    pub best: Option<CutResult>,
    pub written: Written,
}

/// Solve the graph of `params` and save the results.
///
/// Errors while loading the graph leave no file behind. When `draw_svg` is set
/// and there is a result, an svg of the best cut is written next to the
/// record.
pub fn run<R>(
    params: &RunParams,
    resolver: &R,
    solver: &dyn Solver,
    draw_svg: bool,
) -> Result<RunReport>
where
    R: PathResolver + ?Sized,
{
    let graph = WeightedGraph::load(resolver.graph_path(params), params.weighting())?;
    let model = IsingModel::from_graph(&graph);
    let total_weight = model.total_weight();
    info!("Total edge weight W={}", total_weight);
    let samples = solver.solve(&model)?;
    info!("Number of samples returned: {}", samples.len());
    let best = extract(&samples, total_weight)?.into_best();
    let written = persist(resolver, params, total_weight, best.as_ref(), solver.method())?;
    if let (true, Some(best), Some(record)) = (draw_svg, &best, &written.record) {
        let path = record.with_extension("svg");
        draw::save_cut(&path, &graph, best)?;
        debug!("Drew {}", path.display());
    }
    Ok(RunReport {
        params: *params,
        total_weight,
        num_samples: samples.len(),
        best,
        written,
    })
}

/// Run every seed of `config` with `solver`, stopping at the first error.
pub fn run_batch(config: &Config, solver: &dyn Solver) -> Result<Vec<RunReport>> {
    let layout = config.layout();
    let mut reports = Vec::new();
    for params in config.runs() {
        info!(
            "Running {} for N={}, k={}, seed={}, weighted={}",
            solver.method(),
            params.n,
            params.k,
            params.seed,
            params.weighted
        );
        reports.push(run(&params, &layout, solver, config.draw)?);
    }
    Ok(reports)
}
