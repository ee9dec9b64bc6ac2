//! Animation state transitions.
//!
//! [`advance`] is the only way a grid changes. It never touches its input;
//! each call returns the next version.

use crate::{
    core::{GridState, LogoLineId},
    grid::Grid,
    jitter::point_rng,
};

/// What follows `Line4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// `Line4 -> Final`; `Final` holds until `Initial` is requested explicitly.
    #[default]
    Terminal,
    /// `Line4 -> Initial`, looping forever.
    Cyclic,
}

impl CyclePolicy {
    pub fn successor(self, state: GridState) -> GridState {
        match (state, self) {
            (GridState::Initial, _) => GridState::Line1,
            (GridState::Line1, _) => GridState::Line2,
            (GridState::Line2, _) => GridState::Line3,
            (GridState::Line3, _) => GridState::Line4,
            (GridState::Line4, Self::Terminal) => GridState::Final,
            (GridState::Line4, Self::Cyclic) => GridState::Initial,
            (GridState::Final, Self::Terminal) => GridState::Final,
            (GridState::Final, Self::Cyclic) => GridState::Initial,
        }
    }
}

/// Move `grid` to `target`, or to its policy successor when `target` is `None`.
///
/// Requesting the current state returns an identical grid.
#[tracing::instrument(level = "trace", skip(grid), fields(from = %grid.state, tick = grid.tick))]
pub fn advance(grid: &Grid, target: Option<GridState>) -> Grid {
    let next = target.unwrap_or_else(|| grid.policy.successor(grid.state));
    if next == grid.state {
        return grid.clone();
    }

    let mut out = grid.clone();
    out.state = next;
    out.tick = grid.tick + 1;

    if next == GridState::Initial {
        reset(&mut out);
        tracing::trace!(to = %next, "reset anchors");
        return out;
    }
    if let Some(line) = next.logo_line() {
        anchor_line(&mut out, line);
    }

    redraw_jitter(&mut out);
    tracing::trace!(to = %next, "advanced");
    out
}

impl Grid {
    /// Method form of [`advance`].
    pub fn advance(&self, target: Option<GridState>) -> Grid {
        advance(self, target)
    }
}

fn reset(grid: &mut Grid) {
    for p in &mut grid.points {
        p.jitter = None;
        if let Some(logo) = p.logo.as_mut() {
            logo.anchored = false;
        }
    }
    for line in &mut grid.logo_lines {
        line.anchored = false;
    }
}

fn anchor_line(grid: &mut Grid, line: LogoLineId) {
    grid.logo_lines[line.index()].anchored = true;
    for p in &mut grid.points {
        if let Some(logo) = p.logo.as_mut().filter(|l| l.line == line) {
            logo.anchored = true;
        }
    }
}

/// Fresh jitter for every point not snapped to its anchor. Claimed points
/// that are still free get damped jitter.
fn redraw_jitter(grid: &mut Grid) {
    let range = grid.info.noise_range;
    let (seed, tick, params) = (grid.seed, grid.tick, grid.jitter);
    for p in &mut grid.points {
        p.jitter = if p.is_anchored() {
            None
        } else {
            let mut rng = point_rng(seed, tick, p.id);
            params.sample(&mut rng, range, p.logo.is_some())
        };
    }
}
