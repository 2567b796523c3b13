//! Batch configuration.

use crate::error::{Error, Result};
use crate::persist::{DirectoryLayout, RunParams};
use crate::solver::MaxSat;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A batch of runs over seeds for one graph size and degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of nodes of the graphs.
    pub n: usize,
    /// Degree of the graphs.
    pub k: usize,
    pub seeds: Vec<u64>,
    pub weighted: bool,
    pub graphs_dir: PathBuf,
    pub output_dir: PathBuf,
    /// File name prefix of the result records.
    pub record_prefix: String,
    /// External MaxSAT solver and its options.
    pub solver: MaxSat,
    /// Also write an svg picture of the best cut next to each record.
    pub draw: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            n: 10,
            k: 3,
            seeds: vec![2],
            weighted: true,
            graphs_dir: PathBuf::from("graphs"),
            output_dir: PathBuf::from("solutions/random_regular"),
            record_prefix: "akmaxdata".into(),
            solver: MaxSat::default(),
            draw: false,
        }
    }
}

impl Config {
    /// Read a JSON configuration; missing fields take their default value.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn layout(&self) -> DirectoryLayout {
        DirectoryLayout {
            graphs: self.graphs_dir.clone(),
            output: self.output_dir.clone(),
            record_prefix: self.record_prefix.clone(),
        }
    }

    /// One set of parameters per seed, in order.
    pub fn runs(&self) -> impl Iterator<Item = RunParams> + '_ {
        self.seeds.iter().map(|&seed| RunParams {
            n: self.n,
            k: self.k,
            seed,
            weighted: self.weighted,
        })
    }
}

/// Parse `a..b` (end excluded), `a..=b`, or a comma-separated list of seeds.
pub fn parse_seeds(s: &str) -> std::result::Result<Vec<u64>, String> {
    let num = |x: &str| {
        x.trim()
            .parse::<u64>()
            .map_err(|e| format!("invalid seed {x:?}: {e}"))
    };
    if let Some((a, b)) = s.split_once("..=") {
        Ok((num(a)?..=num(b)?).collect())
    } else if let Some((a, b)) = s.split_once("..") {
        Ok((num(a)?..num(b)?).collect())
    } else {
        s.split(',').map(num).collect()
    }
}
