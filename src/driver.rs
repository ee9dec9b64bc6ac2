//! Maps timer ticks and clicks onto grid transitions.
//!
//! Holds no clock of its own; whoever owns the timer calls in.

use crate::{
    core::GridState,
    grid::Grid,
    machine::advance,
};

/// Time between automatic steps: two spring animations.
pub const DEFAULT_INTERVAL_MS: u64 = 2400;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Driver {
    /// Step on every timer tick. When off, clicks step instead.
    pub auto_progress: bool,
    pub interval_ms: u64,
}

impl Default for Driver {
    fn default() -> Self {
        Self {
            auto_progress: true,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

/// A grid version and when it becomes current.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimedGrid {
    pub at_ms: u64,
    pub grid: Grid,
}

impl Driver {
    pub fn on_timer(&self, grid: &Grid) -> Grid {
        if self.auto_progress {
            advance(grid, None)
        } else {
            grid.clone()
        }
    }

    /// `click_count` is the click's position in a multi-click burst; only a
    /// plain single click restarts a finished animation.
    pub fn on_click(&self, grid: &Grid, click_count: u32) -> Grid {
        if grid.state == GridState::Final && click_count == 1 {
            advance(grid, Some(GridState::Initial))
        } else if !self.auto_progress {
            advance(grid, None)
        } else {
            grid.clone()
        }
    }

    /// `grid` at time zero followed by `ticks` timer firings.
    pub fn timeline(&self, grid: &Grid, ticks: usize) -> Vec<TimedGrid> {
        let mut out = Vec::with_capacity(ticks + 1);
        out.push(TimedGrid {
            at_ms: 0,
            grid: grid.clone(),
        });
        let mut current = grid.clone();
        for k in 1..=ticks {
            current = self.on_timer(&current);
            out.push(TimedGrid {
                at_ms: k as u64 * self.interval_ms,
                grid: current.clone(),
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GridConfig, grid::create_grid};

    fn grid() -> Grid {
        create_grid(&GridConfig {
            seed: Some(5),
            ..GridConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn timeline_steps_at_fixed_cadence() {
        let tl = Driver::default().timeline(&grid(), 6);
        let states: Vec<_> = tl.iter().map(|t| t.grid.state).collect();
        assert_eq!(
            states,
            [
                GridState::Initial,
                GridState::Line1,
                GridState::Line2,
                GridState::Line3,
                GridState::Line4,
                GridState::Final,
                GridState::Final,
            ]
        );
        assert_eq!(tl[3].at_ms, 3 * DEFAULT_INTERVAL_MS);
    }

    #[test]
    fn single_click_restarts_when_final() {
        let d = Driver::default();
        let done = d.timeline(&grid(), 5).pop().unwrap().grid;
        assert_eq!(done.state, GridState::Final);
        assert_eq!(d.on_click(&done, 2), done);
        let restarted = d.on_click(&done, 1);
        assert_eq!(restarted.state, GridState::Initial);
    }

    #[test]
    fn manual_mode_steps_on_click_only() {
        let d = Driver {
            auto_progress: false,
            ..Driver::default()
        };
        let g = grid();
        assert_eq!(d.on_timer(&g), g);
        assert_eq!(d.on_click(&g, 1).state, GridState::Line1);
    }

    #[test]
    fn auto_mode_ignores_clicks_mid_animation() {
        let d = Driver::default();
        let g = grid();
        assert_eq!(d.on_click(&g, 1), g);
    }
}
