use rand::Rng;
use rand::seq::SliceRandom;

use crate::foundation::core::Point;
use crate::foundation::error::{ConstellateError, ConstellateResult};

/// Parameters of the windowed proximity graph.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GraphOpts {
    /// How many positions before and after `i` (in shuffled order) are examined.
    pub search_window: usize,
    /// Points closer than this (strictly) may be linked.
    pub connection_radius: f64,
    /// Scanning for `i` stops after this many links.
    pub max_connections: usize,
}

impl Default for GraphOpts {
    fn default() -> Self {
        Self {
            search_window: 50,
            connection_radius: 15.0,
            max_connections: 2,
        }
    }
}

impl GraphOpts {
    pub fn validate(&self) -> ConstellateResult<()> {
        if !self.connection_radius.is_finite() || self.connection_radius < 0.0 {
            return Err(ConstellateError::validation(
                "graph.connection_radius must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Link between two points of the same glyph, by index into its point list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Both endpoints are among the first `count` points.
    pub fn is_within(self, count: usize) -> bool {
        self.a < count && self.b < count
    }
}

/// Unbiased in-place shuffle (Fisher-Yates). The resulting order is the reveal order.
pub fn shuffle_points<R: Rng + ?Sized>(points: &mut [Point], rng: &mut R) {
    points.shuffle(rng);
}

/// Order-dependent approximate proximity graph.
///
/// For each `i`, only indices in `[i - window, i + window)` of the (shuffled) sequence are
/// examined, in increasing order, and scanning stops after `max_connections` hits. This is not a
/// nearest-neighbor graph: which neighbors get linked depends on the shuffle. Both `(i, j)` and
/// `(j, i)` may be emitted.
pub fn build_proximity_edges(points: &[Point], opts: &GraphOpts) -> Vec<Edge> {
    let n = points.len();
    let mut edges = Vec::new();
    if opts.max_connections == 0 {
        return edges;
    }

    for (i, p1) in points.iter().enumerate() {
        let start = i.saturating_sub(opts.search_window);
        let end = n.min(i.saturating_add(opts.search_window));
        let mut found = 0usize;
        for (j, p2) in points.iter().enumerate().take(end).skip(start) {
            if i == j {
                continue;
            }
            if p1.distance(*p2) < opts.connection_radius {
                edges.push(Edge::new(i, j));
                found += 1;
                if found >= opts.max_connections {
                    break;
                }
            }
        }
    }
    edges
}

#[cfg(test)]
#[path = "../../tests/unit/sample/graph.rs"]
mod tests;
