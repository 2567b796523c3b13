//! Svg pictures of cuts.

use crate::cut::CutResult;
use crate::graph::WeightedGraph;
use crate::sample::Spin;
use std::collections::BTreeMap;
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Line};

fn coordinates(i: usize, n: usize) -> (f64, f64) {
    assert!(i < n);
    if n == 1 {
        (50., 50.)
    } else {
        let angle = 2. * std::f64::consts::PI * i as f64 / n as f64;
        (50. + 41. * angle.cos(), 50. + 41. * angle.sin())
    }
}

fn color(side: Option<Spin>) -> &'static str {
    match side {
        Some(Spin::Down) => "blue",
        Some(Spin::Up) => "red",
        None => "white",
    }
}

fn line((x1, y1): (f64, f64), (x2, y2): (f64, f64), crossing: bool) -> Line {
    let l = Line::new()
        .set("x1", x1)
        .set("x2", x2)
        .set("y1", y1)
        .set("y2", y2);
    if crossing {
        l.set("stroke", "black").set("stroke-width", 1.5)
    } else {
        l.set("stroke", "grey")
            .set("stroke-width", 0.75)
            .set("stroke-dasharray", "2,2")
    }
}

/// Nodes on a circle in increasing order, S0 in blue and S1 in red.
/// Edges crossing the cut are solid, the others dashed.
pub fn draw_cut(graph: &WeightedGraph, cut: &CutResult) -> Document {
    let n = graph.node_count();
    let position: BTreeMap<_, _> = graph
        .nodes()
        .enumerate()
        .map(|(i, v)| (v, coordinates(i, n)))
        .collect();
    let radius = if n > 30 { 2. } else { 4. };
    let mut doc = Document::new()
        .set("viewBox", "0 0 100 100")
        .set("width", 400);
    for (u, v, _) in graph.edges() {
        doc = doc.add(line(position[&u], position[&v], cut.crosses(u, v)));
    }
    for (v, &(cx, cy)) in &position {
        doc = doc.add(
            Circle::new()
                .set("r", radius)
                .set("stroke", "black")
                .set("stroke-width", 0.5)
                .set("fill", color(cut.side(*v)))
                .set("cx", cx)
                .set("cy", cy),
        );
    }
    doc
}

pub fn save_cut<P>(path: P, graph: &WeightedGraph, cut: &CutResult) -> std::io::Result<()>
where
    P: AsRef<Path>,
{
    svg::save(path, &draw_cut(graph, cut))
}
