//! Weighted MaxSAT encoding of Ising models (DIMACS WCNF) and parsing of
//! MaxSAT solver output.
//!
//! A coupling `J s_u s_v` is encoded by two soft clauses of weight
//! `2|J|` (scaled to an integer):
//! * `J > 0`: `(x_u ∨ x_v)` and `(¬x_u ∨ ¬x_v)`, one of which is falsified
//!   when `s_u = s_v`;
//! * `J < 0`: `(x_u ∨ ¬x_v)` and `(¬x_u ∨ x_v)`, one of which is falsified
//!   when `s_u ≠ s_v`.
//!
//! Hence `E(s) = -Σ|J| + cost(x) / scale`, with `x_v` true iff `s_v = +1`.

use crate::error::{Error, Result};
use crate::graph::NodeId;
use crate::model::IsingModel;
use crate::sample::Spin;
use log::*;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

/// Default factor applied to clause weights before rounding to integers.
pub const DEFAULT_SCALE: f64 = 1e6;

/// A soft clause: weight and DIMACS literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftClause {
    pub weight: u64,
    pub lits: [i64; 2],
}

impl Display for SoftClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} 0", self.weight, self.lits[0], self.lits[1])
    }
}

/// MaxSAT instance equivalent to an Ising model.
#[derive(Debug, Clone)]
pub struct WcnfInstance {
    /// Node of each DIMACS variable; variable `i` is `variables[i - 1]`.
    variables: Vec<NodeId>,
    clauses: Vec<SoftClause>,
    /// Energy of an assignment falsifying no clause.
    offset: f64,
    scale: f64,
    top: u64,
}

impl WcnfInstance {
    /// Fails if `scale` is not a positive finite number, or if the scaled
    /// weights do not fit in `u64` once summed.
    pub fn encode(model: &IsingModel, scale: f64) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.) {
            return Err(Error::Solver(format!(
                "clause weight scale must be positive, got {scale}"
            )));
        }
        let index = model.index();
        let lit = |v: NodeId| index[&v] as i64 + 1;
        let mut clauses = Vec::with_capacity(2 * model.num_interactions());
        let mut offset = 0.;
        let mut top: u64 = 1;
        for &(u, v, j) in model.couplings() {
            offset -= j.abs();
            let scaled = (2. * j.abs() * scale).round();
            let too_large = || {
                Error::Solver(format!(
                    "coupling {u}-{v} of weight {j} too large for scale {scale}"
                ))
            };
            // u64::MAX as f64 rounds up to 2^64
            if scaled >= u64::MAX as f64 {
                return Err(too_large());
            }
            let weight = scaled as u64;
            if weight == 0 {
                trace!("Coupling {u}-{v} rounds to weight 0, skipped");
                continue;
            }
            top = weight
                .checked_mul(2)
                .and_then(|w| top.checked_add(w))
                .ok_or_else(too_large)?;
            let (a, b) = (lit(u), lit(v));
            let pairs = if j > 0. {
                [[a, b], [-a, -b]]
            } else {
                [[a, -b], [-a, b]]
            };
            clauses.extend(pairs.into_iter().map(|lits| SoftClause { weight, lits }));
        }
        Ok(Self {
            variables: model.variables().to_vec(),
            clauses,
            offset,
            scale,
            top,
        })
    }

    pub fn clauses(&self) -> &[SoftClause] {
        &self.clauses
    }

    /// Weight strictly above the sum of all soft weights, marking hard clauses.
    pub fn top(&self) -> u64 {
        self.top
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Ising energy corresponding to a MaxSAT cost, up to rounding.
    pub fn energy_from_cost(&self, cost: u64) -> f64 {
        self.offset + cost as f64 / self.scale
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "c Ising model, offset {} scale {}", self.offset, self.scale)?;
        writeln!(
            w,
            "p wcnf {} {} {}",
            self.num_vars(),
            self.clauses.len(),
            self.top()
        )?;
        for clause in &self.clauses {
            writeln!(w, "{}", clause)?;
        }
        Ok(())
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w)?;
        w.flush()
    }

    /// Spins of a MaxSAT model; `true` is +1.
    pub fn spins(&self, values: &[bool]) -> BTreeMap<NodeId, Spin> {
        self.variables
            .iter()
            .zip(values)
            .map(|(&v, &x)| (v, if x { Spin::Up } else { Spin::Down }))
            .collect()
    }
}

/// What a MaxSAT solver printed on its standard output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverOutput {
    /// Text after `s`, e.g. `OPTIMUM FOUND`.
    pub status: Option<String>,
    /// Last cost announced on an `o` line.
    pub cost: Option<u64>,
    /// Value of each variable, if a `v` line was printed.
    pub model: Option<Vec<bool>>,
}

impl SolverOutput {
    /// Parse competition-style output for an instance with `num_vars`
    /// variables. The model is read either as a list of literals or as a
    /// single string of `0`/`1`. Variables not mentioned are false.
    pub fn parse<R: BufRead>(reader: R, num_vars: usize) -> Result<Self> {
        let mut out = Self::default();
        let mut tokens: Vec<String> = Vec::new();
        let mut has_model = false;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            let (tag, rest) = line.split_once(' ').unwrap_or((line, ""));
            match tag {
                "s" => out.status = Some(rest.trim().to_string()),
                "o" => {
                    let cost = rest.trim().parse::<u64>().map_err(|e| {
                        Error::Solver(format!("invalid cost line {line:?}: {e}"))
                    })?;
                    out.cost = Some(cost)
                }
                "v" => {
                    has_model = true;
                    tokens.extend(rest.split_whitespace().map(String::from))
                }
                "c" | "" => trace!("{}", line),
                _ => debug!("Unrecognized solver output: {}", line),
            }
        }
        if has_model {
            out.model = Some(read_model(&tokens, num_vars)?);
        }
        Ok(out)
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.status.as_deref() == Some("UNSATISFIABLE")
    }
}

fn read_model(tokens: &[String], num_vars: usize) -> Result<Vec<bool>> {
    if let [bits] = tokens {
        if bits.len() == num_vars && bits.chars().all(|c| c == '0' || c == '1') {
            return Ok(bits.chars().map(|c| c == '1').collect());
        }
    }
    let mut values = vec![false; num_vars];
    for token in tokens {
        let lit: i64 = token
            .parse()
            .map_err(|e| Error::Solver(format!("invalid literal {token:?}: {e}")))?;
        if lit == 0 {
            continue;
        }
        let var = lit.unsigned_abs() as usize;
        if var > num_vars {
            return Err(Error::Solver(format!(
                "literal {lit} out of range (instance has {num_vars} variables)"
            )));
        }
        values[var - 1] = lit > 0;
    }
    Ok(values)
}
