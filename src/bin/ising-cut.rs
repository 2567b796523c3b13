//! # ising-cut
//!
//! Solve MaxCut on a batch of edge-list graphs and save the best cut of
//! each one as a JSON record.

use clap::Parser;
use ising_cut::config::parse_seeds;
use ising_cut::pipeline::run_batch;
use ising_cut::*;
use log::*;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone)]
struct Seeds(Vec<u64>);

fn seeds(s: &str) -> std::result::Result<Seeds, String> {
    parse_seeds(s).map(Seeds)
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file; other options override its fields
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of nodes
    #[arg(short)]
    n: Option<usize>,
    /// Degree
    #[arg(short)]
    k: Option<usize>,
    /// Seeds, as `a..b`, `a..=b` or `a,b,c`
    #[arg(long, value_parser = seeds)]
    seeds: Option<Seeds>,
    /// Read the weight column of the edge lists
    #[arg(long, conflicts_with = "unweighted")]
    weighted: bool,
    /// Give every edge weight 1
    #[arg(long)]
    unweighted: bool,
    /// Root of the graph directory tree
    #[arg(long)]
    graphs: Option<PathBuf>,
    /// Root of the output directory tree
    #[arg(long)]
    output: Option<PathBuf>,
    /// MaxSAT solver executable
    #[arg(long)]
    solver_cmd: Option<String>,
    /// Extra argument passed to the solver before the instance file
    #[arg(long = "solver-arg", allow_hyphen_values = true)]
    solver_args: Vec<String>,
    /// Method name stored in the result records
    #[arg(long)]
    method: Option<String>,
    /// Also draw the best cut as svg
    #[arg(long)]
    draw: bool,
    /// Log everything
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(n) = self.n {
            config.n = n
        }
        if let Some(k) = self.k {
            config.k = k
        }
        if let Some(Seeds(seeds)) = &self.seeds {
            config.seeds = seeds.clone()
        }
        if self.weighted {
            config.weighted = true
        }
        if self.unweighted {
            config.weighted = false
        }
        if let Some(dir) = &self.graphs {
            config.graphs_dir = dir.clone()
        }
        if let Some(dir) = &self.output {
            config.output_dir = dir.clone()
        }
        if let Some(cmd) = &self.solver_cmd {
            config.solver.command = cmd.clone()
        }
        if !self.solver_args.is_empty() {
            config.solver.args = self.solver_args.clone()
        }
        if let Some(method) = &self.method {
            config.solver.method = method.clone()
        }
        config.draw |= self.draw;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.debug {
        init_debug_log()
    } else {
        init_default_log()
    }
    let config = match args.config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("{:?}", config);
    match run_batch(&config, &config.solver) {
        Ok(reports) => {
            for report in reports {
                match &report.best {
                    Some(best) => info!(
                        "seed {}: W={} energy={} cut={}",
                        report.params.seed, report.total_weight, best.energy, best.cut_value
                    ),
                    None => info!("seed {}: no result", report.params.seed),
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
