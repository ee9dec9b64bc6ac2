use rand::Rng as _;

use crate::{
    config::GridConfig,
    core::{GridState, Line, LogoLineId, Point, PointId, Vec2},
    error::PolymarkResult,
    jitter::JitterParams,
    lattice,
    machine::CyclePolicy,
    planner::{LogoPoint, PathPlanner},
    triangulate::Adjacency,
};

/// Permanent claim of a point by a logo line. Only `anchored` ever changes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogoAssignment {
    pub line: LogoLineId,
    pub anchor: Point,
    pub anchored: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridPoint {
    pub id: PointId,
    pub orig: Point,
    /// Offset for the current tick; cleared or redrawn on every transition.
    pub jitter: Option<Vec2>,
    pub logo: Option<LogoAssignment>,
}

impl GridPoint {
    pub fn is_anchored(&self) -> bool {
        self.logo.is_some_and(|l| l.anchored)
    }

    /// Where the point should be drawn this tick.
    pub fn draw_position(&self) -> Point {
        match self.logo {
            Some(LogoAssignment {
                anchor,
                anchored: true,
                ..
            }) => anchor,
            _ => self.orig + self.jitter.unwrap_or(Vec2::ZERO),
        }
    }
}

/// Undirected triangulation edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Path {
    pub p1: PointId,
    pub p2: PointId,
    /// Both ends belong to the same logo line; drawing it would overdraw the stroke.
    pub ignore: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogoLine {
    pub id: LogoLineId,
    pub segment: Line,
    pub points: Vec<LogoPoint>,
    pub anchored: bool,
}

/// Layout constants derived from the configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridInfo {
    /// Lattice spacing.
    pub min_delta: f64,
    /// Per-axis jitter bound.
    pub noise_range: f64,
    /// Side of the virtual canvas.
    pub svg_size: f64,
}

/// One version of the animated grid. Transitions produce new values; see
/// [`crate::machine::advance`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Grid {
    pub state: GridState,
    pub points: Vec<GridPoint>,
    pub paths: Vec<Path>,
    pub logo_lines: [LogoLine; 4],
    pub info: GridInfo,
    pub jitter: JitterParams,
    pub policy: CyclePolicy,
    /// Seed every random draw of this grid derives from.
    pub seed: u64,
    /// Number of transitions applied since creation.
    pub tick: u64,
}

impl Grid {
    pub fn point(&self, id: PointId) -> Option<&GridPoint> {
        self.points.get(id.0)
    }

    pub fn logo_line(&self, id: LogoLineId) -> &LogoLine {
        &self.logo_lines[id.index()]
    }

    /// Paths a consumer should draw.
    pub fn visible_paths(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().filter(|p| !p.ignore)
    }
}

/// Build a fresh grid in [`GridState::Initial`].
///
/// The configuration is validated first; a seed is drawn from entropy when the
/// configuration has none, and recorded on the grid.
#[tracing::instrument(skip(config), fields(n = config.points_per_side))]
pub fn create_grid(config: &GridConfig) -> PolymarkResult<Grid> {
    config.validate()?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());

    let positions = lattice::generate(config, seed);
    let adjacency = Adjacency::build(&positions)?;

    let min_delta = config.min_delta();
    let segments = config.segments();
    let mut chains = PathPlanner::new(&positions, &adjacency, min_delta * config.logo_buffer)
        .plan_all(&segments)?;

    let mut points: Vec<GridPoint> = positions
        .iter()
        .enumerate()
        .map(|(i, &orig)| GridPoint {
            id: PointId(i),
            orig,
            jitter: None,
            logo: None,
        })
        .collect();
    for line in LogoLineId::ALL {
        for lp in &chains[line.index()] {
            points[lp.id.0].logo = Some(LogoAssignment {
                line,
                anchor: lp.anchor,
                anchored: false,
            });
        }
    }

    let line_of = |id: PointId| points[id.0].logo.map(|l| l.line);
    let paths = adjacency
        .edges()
        .into_iter()
        .map(|(p1, p2)| Path {
            p1,
            p2,
            ignore: line_of(p1).is_some() && line_of(p1) == line_of(p2),
        })
        .collect();

    let logo_lines: [LogoLine; 4] = std::array::from_fn(|i| LogoLine {
        id: LogoLineId::ALL[i],
        segment: segments[i],
        points: std::mem::take(&mut chains[i]),
        anchored: false,
    });

    tracing::debug!(
        seed,
        points = points.len(),
        triangles = adjacency.triangle_count(),
        "created grid"
    );

    Ok(Grid {
        state: GridState::Initial,
        points,
        paths,
        logo_lines,
        info: GridInfo {
            min_delta,
            noise_range: config.jitter.range(min_delta),
            svg_size: config.canvas_size,
        },
        jitter: config.jitter,
        policy: config.policy,
        seed,
        tick: 0,
    })
}
