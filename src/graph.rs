//! Weighted undirected graphs and the `weight,node1,node2` edge-list format.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use log::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Node identifier as written in edge-list files.
pub type NodeId = i64;

/// Whether the weight column of an edge list is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weighting {
    Weighted,
    /// The weight column must be present but every edge gets weight 1.
    Unweighted,
}

impl Weighting {
    /// `"weighted"` or `"unweighted"`.
    pub fn label(self) -> &'static str {
        match self {
            Weighting::Weighted => "weighted",
            Weighting::Unweighted => "unweighted",
        }
    }
}

impl From<bool> for Weighting {
    fn from(weighted: bool) -> Self {
        if weighted {
            Weighting::Weighted
        } else {
            Weighting::Unweighted
        }
    }
}

/// Undirected graph with a floating-point weight on each edge.
///
/// Edges are stored under the normalized key `(min(u, v), max(u, v))`,
/// so `(1, 0)` and `(0, 1)` denote the same edge. Adding an edge twice keeps
/// the last weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedGraph {
    nodes: BTreeSet<NodeId>,
    edges: BTreeMap<(NodeId, NodeId), f64>,
}

fn key(u: NodeId, v: NodeId) -> (NodeId, NodeId) {
    if u <= v { (u, v) } else { (v, u) }
}

impl WeightedGraph {
    /// Create a graph from a list of `(u, v, weight)` triples.
    ///
    /// Fails on self-loops, reporting the position of the offending triple
    /// (starting at 1) as its line.
    pub fn new<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        let mut g = Self::default();
        for (i, (u, v, w)) in edges.into_iter().enumerate() {
            if u == v {
                return Err(Error::parse(i + 1, format!("self-loop on node {u}")));
            }
            g.insert(u, v, w);
        }
        Ok(g)
    }

    fn insert(&mut self, u: NodeId, v: NodeId, weight: f64) {
        let _ = self.nodes.insert(u);
        let _ = self.nodes.insert(v);
        if let Some(old) = self.edges.insert(key(u, v), weight) {
            debug!("Edge {u}-{v} given twice, weight {old} replaced by {weight}");
        }
    }

    /// Load an edge list from `path`.
    ///
    /// Files ending in `.gz` are decompressed on the fly.
    pub fn load<P: AsRef<Path>>(path: P, weighting: Weighting) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        debug!("Loading {} ({})", path.display(), weighting.label());
        let g = Self::from_reader(BufReader::new(reader), weighting)?;
        info!(
            "Loaded {}: {} nodes, {} edges",
            path.display(),
            g.node_count(),
            g.edge_count()
        );
        Ok(g)
    }

    /// Parse an edge list, one `weight,node1,node2` line per edge.
    pub fn from_reader<R: BufRead>(reader: R, weighting: Weighting) -> Result<Self> {
        let mut g = Self::default();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let (u, v, w) = parse_line(&line, weighting).map_err(|e| Error::parse(i + 1, e))?;
            g.insert(u, v, w);
        }
        Ok(g)
    }

    /// Write the graph in the edge-list format read by `load`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w)?;
        w.flush()?;
        Ok(())
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        for ((u, v), weight) in &self.edges {
            writeln!(w, "{weight:?},{u},{v}")?;
        }
        Ok(())
    }

    /// Nodes in increasing order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Edges `(u, v, weight)` with `u < v`, in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.edges.iter().map(|(&(u, v), &w)| (u, v, w))
    }

    /// Weight of the edge `uv`, if present.
    pub fn weight(&self, u: NodeId, v: NodeId) -> Option<f64> {
        self.edges.get(&key(u, v)).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.values().sum()
    }
}

fn parse_line(
    line: &str,
    weighting: Weighting,
) -> std::result::Result<(NodeId, NodeId, f64), String> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    let &[weight, u, v] = fields.as_slice() else {
        return Err(format!(
            "expected 3 comma-separated fields, found {}",
            fields.len()
        ));
    };
    let node = |s: &str| {
        s.parse::<NodeId>()
            .map_err(|e| format!("invalid node {s:?}: {e}"))
    };
    let (u, v) = (node(u)?, node(v)?);
    if u == v {
        return Err(format!("self-loop on node {u}"));
    }
    let weight = match weighting {
        Weighting::Unweighted => 1.0,
        Weighting::Weighted => {
            let w: f64 = weight
                .parse()
                .map_err(|e| format!("invalid weight {weight:?}: {e}"))?;
            if !w.is_finite() {
                return Err(format!("weight {weight:?} is not finite"));
            }
            w
        }
    };
    Ok((u, v, weight))
}
