//! Chooses which lattice points trace each logo stroke.
//!
//! Strokes are planned in order. A walk starts at a free seed point and moves
//! across the adjacency graph: every step must get strictly closer to the
//! stroke's end, and among those neighbors the one lying closest to the
//! stroke's line wins. Points claimed by an earlier stroke are never reused.

use crate::{
    core::{Line, LogoLineId, Point, PointId, Rect, dist2, rect_contains},
    error::{PolymarkError, PolymarkResult},
    triangulate::Adjacency,
};

/// One point of a planned stroke and where it snaps to.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogoPoint {
    pub id: PointId,
    pub anchor: Point,
}

/// Plans all four strokes with first-claim-wins across strokes.
pub struct PathPlanner<'a> {
    points: &'a [Point],
    adjacency: &'a Adjacency,
    buffer: f64,
    claimed: Vec<bool>,
}

impl<'a> PathPlanner<'a> {
    /// `buffer` is the absolute slack added around each stroke's bounding box.
    pub fn new(points: &'a [Point], adjacency: &'a Adjacency, buffer: f64) -> Self {
        Self {
            points,
            adjacency,
            buffer,
            claimed: vec![false; points.len()],
        }
    }

    pub fn plan_all(mut self, segments: &[Line; 4]) -> PolymarkResult<[Vec<LogoPoint>; 4]> {
        let mut out: [Vec<LogoPoint>; 4] = Default::default();
        for id in LogoLineId::ALL {
            out[id.index()] = self.plan(id, segments[id.index()])?;
        }
        Ok(out)
    }

    /// Plan one stroke and claim its points.
    ///
    /// The walk seeds at the free point nearest the stroke's start. When that
    /// walk cannot leave its seed, every other free point in the region is
    /// tried and the walk whose ends sit closest to the stroke's ends (summed)
    /// wins; ties keep the nearer seed.
    pub fn plan(&mut self, line_id: LogoLineId, segment: Line) -> PolymarkResult<Vec<LogoPoint>> {
        let Line { p0: p1, p1: p2 } = segment;
        let region = Rect::from_points(p1, p2).inflate(self.buffer, self.buffer);

        let mut seeds: Vec<PointId> = self.free_in(region).collect();
        seeds.sort_by(|&a, &b| dist2(self.pos(a), p1).total_cmp(&dist2(self.pos(b), p1)));

        let mut best: Option<(f64, Vec<LogoPoint>)> = None;
        for (i, &seed) in seeds.iter().enumerate() {
            let chain = self.walk(seed, segment, region);
            let [first, .., last] = chain.as_slice() else {
                continue;
            };
            let snap = dist2(self.pos(first.id), p1).sqrt() + dist2(self.pos(last.id), p2).sqrt();
            if i == 0 {
                best = Some((snap, chain));
                break;
            }
            if best.as_ref().is_none_or(|(b, _)| snap < *b) {
                best = Some((snap, chain));
            }
        }

        let Some((snap, mut chain)) = best else {
            return Err(PolymarkError::planning(if seeds.is_empty() {
                format!(
                    "{line_id}: no free lattice point near its start ({}, {})",
                    p1.x, p1.y
                )
            } else {
                format!(
                    "{line_id}: no walk from {} candidate seeds reached a second point",
                    seeds.len()
                )
            }));
        };

        for lp in &chain {
            self.claimed[lp.id.0] = true;
        }
        if let Some(first) = chain.first_mut() {
            first.anchor = p1;
        }
        if let Some(last) = chain.last_mut() {
            last.anchor = p2;
        }

        tracing::debug!(
            line = %line_id,
            seed = %chain[0].id,
            len = chain.len(),
            snap,
            "planned logo line"
        );
        Ok(chain)
    }

    /// Greedy walk from `seed` toward the segment's end. Does not claim.
    fn walk(&self, seed: PointId, segment: Line, region: Rect) -> Vec<LogoPoint> {
        let p2 = segment.p1;
        let mut chain = vec![LogoPoint {
            id: seed,
            anchor: segment.p0,
        }];
        let mut current = seed;
        loop {
            let to_end = dist2(self.pos(current), p2);
            let mut best: Option<(PointId, Point, f64)> = None;
            for n in self.adjacency.neighbors(current) {
                let p = self.pos(n);
                if self.claimed[n.0]
                    || !rect_contains(region, p)
                    || dist2(p, p2) >= to_end
                    || chain.iter().any(|lp| lp.id == n)
                {
                    continue;
                }
                let anchor = project(p, segment);
                let d = dist2(p, anchor);
                if best.is_none_or(|(_, _, bd)| d < bd) {
                    best = Some((n, anchor, d));
                }
            }
            let Some((next, anchor, _)) = best else {
                return chain;
            };
            chain.push(LogoPoint { id: next, anchor });
            current = next;
        }
    }

    fn pos(&self, id: PointId) -> Point {
        self.points[id.0]
    }

    fn free_in(&self, region: Rect) -> impl Iterator<Item = PointId> + '_ {
        self.points
            .iter()
            .enumerate()
            .filter(move |&(i, &p)| !self.claimed[i] && rect_contains(region, p))
            .map(|(i, _)| PointId(i))
    }
}

/// Perpendicular projection of `p` onto the infinite line through `line`.
pub fn project(p: Point, line: Line) -> Point {
    let d = line.p1 - line.p0;
    let len2 = d.hypot2();
    if len2 == 0.0 {
        return line.p0;
    }
    let t = (p - line.p0).dot(d) / len2;
    line.p0 + d * t
}
