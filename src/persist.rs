//! Writing run results: the total weight as plain text and the best cut as
//! a JSON record.

use crate::cut::CutResult;
use crate::error::Result;
use crate::graph::Weighting;
use log::*;
use serde::Serialize;
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Parameters identifying one run: graph size, degree and seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunParams {
    pub n: usize,
    pub k: usize,
    pub seed: u64,
    pub weighted: bool,
}

impl RunParams {
    pub fn weighting(&self) -> Weighting {
        self.weighted.into()
    }

    /// `N<n>_k<k>_seed<seed>_seedb<seed>`, shared by every file of the run.
    pub fn file_tag(&self) -> String {
        format!(
            "N{}_k{}_seed{}_seedb{}",
            self.n, self.k, self.seed, self.seed
        )
    }
}

/// Where the input graph and the outputs of a run live.
pub trait PathResolver {
    fn graph_path(&self, params: &RunParams) -> PathBuf;
    fn weight_sum_path(&self, params: &RunParams) -> PathBuf;
    fn record_path(&self, params: &RunParams) -> PathBuf;
}

/// Files grouped by size and degree:
///
/// ```text
/// <graphs>/<N>/<k>/graph_N<N>_k<k>_seed<s>_seedb<s>.txt
/// <output>/<N>/<k>/sumweights_N<N>_k<k>_seed<s>_seedb<s>.txt
/// <output>/<N>/<k>/<prefix>_N<N>_k<k>_seed<s>_seedb<s>_<weighted|unweighted>.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    pub graphs: PathBuf,
    pub output: PathBuf,
    pub record_prefix: String,
}

impl DirectoryLayout {
    fn output_dir(&self, params: &RunParams) -> PathBuf {
        self.output
            .join(params.n.to_string())
            .join(params.k.to_string())
    }
}

impl PathResolver for DirectoryLayout {
    fn graph_path(&self, params: &RunParams) -> PathBuf {
        self.graphs
            .join(params.n.to_string())
            .join(params.k.to_string())
            .join(format!("graph_{}.txt", params.file_tag()))
    }
    fn weight_sum_path(&self, params: &RunParams) -> PathBuf {
        self.output_dir(params)
            .join(format!("sumweights_{}.txt", params.file_tag()))
    }
    fn record_path(&self, params: &RunParams) -> PathBuf {
        self.output_dir(params).join(format!(
            "{}_{}_{}.json",
            self.record_prefix,
            params.file_tag(),
            params.weighting().label()
        ))
    }
}

/// The JSON summary of a run with a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(rename = "N")]
    pub n: usize,
    pub k: usize,
    pub seed: u64,
    pub weighted: bool,
    #[serde(rename = "W")]
    pub total_weight: f64,
    pub ising_energy: f64,
    pub maxcut_value: f64,
    pub method: String,
}

impl ResultRecord {
    pub fn new(params: &RunParams, total_weight: f64, best: &CutResult, method: &str) -> Self {
        Self {
            n: params.n,
            k: params.k,
            seed: params.seed,
            weighted: params.weighted,
            total_weight,
            ising_energy: best.energy,
            maxcut_value: best.cut_value,
            method: method.to_string(),
        }
    }

    /// Write as JSON indented by four spaces.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut w, formatter);
        self.serialize(&mut ser)?;
        w.flush()?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let buf = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(buf)?)
    }
}

/// Write `w` alone on a line, always with a decimal point.
pub fn write_weight_sum<P: AsRef<Path>>(path: P, w: f64) -> Result<()> {
    fs::write(path, format!("{w:?}\n"))?;
    Ok(())
}

/// Files produced by `persist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub weight_sum: PathBuf,
    /// `None` when there was no result to record.
    pub record: Option<PathBuf>,
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Write the total weight file, and the result record if there is a best cut.
///
/// Existing files are overwritten.
pub fn persist<R>(
    resolver: &R,
    params: &RunParams,
    total_weight: f64,
    best: Option<&CutResult>,
    method: &str,
) -> Result<Written>
where
    R: PathResolver + ?Sized,
{
    let weight_sum = resolver.weight_sum_path(params);
    create_parent(&weight_sum)?;
    write_weight_sum(&weight_sum, total_weight)?;
    info!(
        "Saved total edge weight W={} to {}",
        total_weight,
        weight_sum.display()
    );
    let record = match best {
        Some(best) => {
            let path = resolver.record_path(params);
            create_parent(&path)?;
            info!("Saving results to {}", path.display());
            ResultRecord::new(params, total_weight, best, method).write(&path)?;
            Some(path)
        }
        None => {
            warn!("No energy data found. Nothing to save.");
            None
        }
    };
    Ok(Written { weight_sum, record })
}
