pub use kurbo::{BezPath, Line, Point, Rect, Vec2};

/// Stable point identifier; equals the point's index in generation order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PointId(pub usize);

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the four segments tracing the logo mark, in drawing order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum LogoLineId {
    Line1,
    Line2,
    Line3,
    Line4,
}

impl LogoLineId {
    pub const ALL: [LogoLineId; 4] = [Self::Line1, Self::Line2, Self::Line3, Self::Line4];

    /// Position in [`LogoLineId::ALL`]; also the index into a grid's logo line array.
    pub fn index(self) -> usize {
        match self {
            Self::Line1 => 0,
            Self::Line2 => 1,
            Self::Line3 => 2,
            Self::Line4 => 3,
        }
    }

    /// Draw opacity for points claimed by this line.
    ///
    /// The inner strokes of the mark are emphasized over the outer ones.
    pub fn emphasis(self) -> f64 {
        match self {
            Self::Line2 | Self::Line3 => OPACITY_HIGH,
            Self::Line1 | Self::Line4 => OPACITY_MED,
        }
    }

    /// State that activates this line.
    pub fn state(self) -> GridState {
        match self {
            Self::Line1 => GridState::Line1,
            Self::Line2 => GridState::Line2,
            Self::Line3 => GridState::Line3,
            Self::Line4 => GridState::Line4,
        }
    }
}

impl std::fmt::Display for LogoLineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Line1 => "line1",
            Self::Line2 => "line2",
            Self::Line3 => "line3",
            Self::Line4 => "line4",
        })
    }
}

/// Opacity of points that belong to no logo line.
pub const OPACITY_LOW: f64 = 0.25;
const OPACITY_MED: f64 = 0.35;
const OPACITY_HIGH: f64 = 1.0;

/// Animation state of a grid.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum GridState {
    #[default]
    Initial,
    Line1,
    Line2,
    Line3,
    Line4,
    Final,
}

impl GridState {
    /// Logo line activated when entering this state, if any.
    pub fn logo_line(self) -> Option<LogoLineId> {
        match self {
            Self::Line1 => Some(LogoLineId::Line1),
            Self::Line2 => Some(LogoLineId::Line2),
            Self::Line3 => Some(LogoLineId::Line3),
            Self::Line4 => Some(LogoLineId::Line4),
            Self::Initial | Self::Final => None,
        }
    }
}

impl std::fmt::Display for GridState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Initial => "initial",
            Self::Line1 => "line1",
            Self::Line2 => "line2",
            Self::Line3 => "line3",
            Self::Line4 => "line4",
            Self::Final => "final",
        })
    }
}

/// Squared distance between two points.
pub(crate) fn dist2(a: Point, b: Point) -> f64 {
    (a - b).hypot2()
}

/// Inclusive containment; kurbo's `Rect::contains` is half-open.
pub(crate) fn rect_contains(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}
