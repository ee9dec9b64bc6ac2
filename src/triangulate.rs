//! Delaunay adjacency over the point field.
//!
//! The triangulation's half-edge arrays stay private; callers only see
//! [`Adjacency::neighbors`] and [`Adjacency::edges`].

use delaunator::{EMPTY, next_halfedge};

use crate::{
    core::{Point, PointId},
    error::{PolymarkError, PolymarkResult},
};

#[derive(Clone, Debug)]
pub struct Adjacency {
    /// `triangles[e]` is the start vertex of half-edge `e`.
    triangles: Vec<usize>,
    /// `halfedges[e]` is the opposite half-edge, or `EMPTY` on the hull.
    halfedges: Vec<usize>,
    /// One half-edge ending at each point; hull half-edges are preferred so
    /// fan walks around boundary points start at the boundary.
    inedges: Vec<usize>,
}

impl Adjacency {
    #[tracing::instrument(skip(points), fields(points = points.len()))]
    pub fn build(points: &[Point]) -> PolymarkResult<Self> {
        let input: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect();
        let tri = delaunator::triangulate(&input);
        if tri.triangles.is_empty() {
            return Err(PolymarkError::triangulation(format!(
                "no triangles over {} points (collinear or too few)",
                points.len()
            )));
        }

        let mut inedges = vec![EMPTY; points.len()];
        for e in 0..tri.halfedges.len() {
            let p = tri.triangles[next_halfedge(e)];
            if tri.halfedges[e] == EMPTY || inedges[p] == EMPTY {
                inedges[p] = e;
            }
        }

        tracing::debug!(
            triangles = tri.triangles.len() / 3,
            hull = tri.hull.len(),
            "triangulated point field"
        );

        Ok(Self {
            triangles: tri.triangles,
            halfedges: tri.halfedges,
            inedges,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Points sharing a triangulation edge with `id`, in rotational order.
    ///
    /// Returns an empty list for ids outside the point set.
    pub fn neighbors(&self, id: PointId) -> Vec<PointId> {
        let i = id.0;
        let Some(&e0) = self.inedges.get(i) else {
            return Vec::new();
        };
        if e0 == EMPTY {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(6);
        let mut e = e0;
        loop {
            out.push(PointId(self.triangles[e]));
            let outgoing = next_halfedge(e);
            debug_assert_eq!(self.triangles[outgoing], i);
            let twin = self.halfedges[outgoing];
            if twin == EMPTY {
                // Hull: the last neighbor sits at the far end of the outgoing edge.
                let last = PointId(self.triangles[next_halfedge(outgoing)]);
                if !out.contains(&last) {
                    out.push(last);
                }
                break;
            }
            e = twin;
            if e == e0 {
                break;
            }
        }
        out
    }

    /// Every undirected triangulation edge exactly once.
    pub fn edges(&self) -> Vec<(PointId, PointId)> {
        let mut out = Vec::with_capacity(self.halfedges.len() / 2 + 1);
        for (e, &twin) in self.halfedges.iter().enumerate() {
            if twin == EMPTY || e > twin {
                out.push((
                    PointId(self.triangles[e]),
                    PointId(self.triangles[next_halfedge(e)]),
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{config::GridConfig, lattice};

    fn key(a: PointId, b: PointId) -> (PointId, PointId) {
        if a < b { (a, b) } else { (b, a) }
    }

    #[test]
    fn square_with_center_has_star_neighbors() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 5.0),
        ];
        let adj = Adjacency::build(&pts).unwrap();
        assert_eq!(adj.triangle_count(), 4);

        let mut center = adj.neighbors(PointId(4));
        center.sort();
        assert_eq!(center, vec![PointId(0), PointId(1), PointId(2), PointId(3)]);

        let mut corner = adj.neighbors(PointId(0));
        corner.sort();
        assert_eq!(corner, vec![PointId(1), PointId(3), PointId(4)]);

        assert_eq!(adj.edges().len(), 8);
    }

    #[test]
    fn collinear_points_are_rejected() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        assert!(matches!(
            Adjacency::build(&pts),
            Err(PolymarkError::Triangulation(_))
        ));
    }

    #[test]
    fn unknown_id_has_no_neighbors() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let adj = Adjacency::build(&pts).unwrap();
        assert!(adj.neighbors(PointId(99)).is_empty());
    }

    #[test]
    fn edges_are_unique_and_match_neighbors() {
        let cfg = GridConfig::default();
        let pts = lattice::generate(&cfg, 17);
        let adj = Adjacency::build(&pts).unwrap();

        let edges = adj.edges();
        let set: BTreeSet<_> = edges.iter().map(|&(a, b)| key(a, b)).collect();
        assert_eq!(set.len(), edges.len());

        let mut from_fans = BTreeSet::new();
        for i in 0..pts.len() {
            let ns = adj.neighbors(PointId(i));
            let distinct: BTreeSet<_> = ns.iter().copied().collect();
            assert_eq!(distinct.len(), ns.len(), "duplicate neighbor of {i}");
            for n in ns {
                assert_ne!(n, PointId(i));
                from_fans.insert(key(PointId(i), n));
            }
        }
        assert_eq!(from_fans, set);
    }
}
