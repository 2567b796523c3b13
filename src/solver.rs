//! The solver seam, and the external MaxSAT backend behind it.

use crate::error::{Error, Result};
use crate::model::IsingModel;
use crate::sample::{Sample, SampleSet};
use crate::wcnf::{DEFAULT_SCALE, SolverOutput, WcnfInstance};
use log::*;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

/// A MaxCut/Ising backend.
///
/// Implementations must return samples lowest energy first, assign -1 or +1
/// to every variable of the model and report energies of the model as
/// built by `IsingModel::from_graph`.
pub trait Solver {
    /// Identifier stored as `method` in result records.
    fn method(&self) -> &str;
    fn solve(&self, model: &IsingModel) -> Result<SampleSet>;
}

/// A model without variables has a single, empty, assignment.
fn trivial(model: &IsingModel) -> Option<SampleSet> {
    if model.num_variables() == 0 {
        Some(SampleSet::new(vec![Sample::new(Default::default(), 0.)]))
    } else {
        None
    }
}

/// External weighted MaxSAT solver (AKMaxSAT by default).
///
/// The model is written as a WCNF file, the solver is called as
/// `command args... <file>`, and its `v` line is read back.
/// The energy of the returned sample is recomputed on the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxSat {
    pub command: String,
    pub args: Vec<String>,
    pub method: String,
    pub scale: f64,
    /// Where to write the instance; a temporary file, removed after the
    /// call, if unset.
    pub instance_path: Option<PathBuf>,
}

impl Default for MaxSat {
    fn default() -> Self {
        Self {
            command: "akmaxsat".into(),
            args: Vec::new(),
            method: "AKMaxSAT".into(),
            scale: DEFAULT_SCALE,
            instance_path: None,
        }
    }
}

impl MaxSat {
    /// Write `instance` where the solver will read it.
    ///
    /// Without a configured path the file is a temporary one, removed when
    /// the returned handle is dropped.
    fn write_instance(
        &self,
        instance: &WcnfInstance,
    ) -> Result<(PathBuf, Option<NamedTempFile>)> {
        if let Some(path) = &self.instance_path {
            instance.write(path)?;
            return Ok((path.clone(), None));
        }
        let file = tempfile::Builder::new()
            .prefix("ising-cut-")
            .suffix(".wcnf")
            .tempfile()?;
        let mut w = BufWriter::new(file.as_file());
        instance.write_to(&mut w)?;
        w.flush()?;
        drop(w);
        Ok((file.path().to_path_buf(), Some(file)))
    }
}

impl Solver for MaxSat {
    fn method(&self) -> &str {
        &self.method
    }

    fn solve(&self, model: &IsingModel) -> Result<SampleSet> {
        if let Some(set) = trivial(model) {
            return Ok(set);
        }
        let instance = WcnfInstance::encode(model, self.scale)?;
        let (path, _scratch) = self.write_instance(&instance)?;
        debug!("Wrote {} ({} clauses)", path.display(), instance.clauses().len());
        let mut command = Command::new(&self.command);
        command.args(&self.args).arg(&path);
        info!("Calling {}", self.command);
        debug!("command: {:?}", command);
        let mut child = command
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Solver(format!("cannot run {}: {e}", self.command)))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Solver("no standard output".into()))?;
        let output = SolverOutput::parse(BufReader::new(stdout), instance.num_vars());
        let status = child.wait()?;
        debug!("{} exited with {}", self.command, status);
        let output = output?;
        let Some(values) = output.model else {
            return Err(Error::Solver(if output.is_unsatisfiable() {
                "instance reported unsatisfiable".into()
            } else {
                format!("{} returned no model ({status})", self.command)
            }));
        };
        let spins = instance.spins(&values);
        let energy = model.energy(&spins)?;
        if let Some(cost) = output.cost {
            debug!(
                "Solver cost {} gives energy {}, recomputed {}",
                cost,
                instance.energy_from_cost(cost),
                energy
            );
        }
        if let Some(status) = &output.status {
            info!("{}: {}", self.command, status);
        }
        Ok(SampleSet::new(vec![Sample::from_spins(&spins, energy)]))
    }
}
