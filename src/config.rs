use std::path::Path;

use anyhow::Context as _;

use crate::{
    core::{Line, Point, Rect},
    error::{PolymarkError, PolymarkResult},
    jitter::JitterParams,
    machine::CyclePolicy,
};

/// Side length of the virtual square canvas the grid is laid out on.
pub const DEFAULT_CANVAS_SIZE: f64 = 100.0;

/// Largest accepted `points_per_side`.
pub const MAX_POINTS_PER_SIDE: usize = 4096;

/// Height-to-width ratio of one logo stroke.
pub const LOGO_SLOPE: f64 = 2.83186;

/// Everything `create_grid` needs. Deserializes from partial JSON; missing
/// fields fall back to [`GridConfig::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rows and columns of the lattice. Must be even so the two middle
    /// strokes of the mark never compete for the same column.
    pub points_per_side: usize,
    pub canvas_size: f64,
    pub jitter: JitterParams,
    pub logo: LogoSpec,
    /// Slack around each segment's bounding box, as a fraction of lattice spacing.
    pub logo_buffer: f64,
    pub policy: CyclePolicy,
    /// Fixed seed for reproducible runs; drawn from entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            points_per_side: 20,
            canvas_size: DEFAULT_CANVAS_SIZE,
            jitter: JitterParams::default(),
            logo: LogoSpec::default(),
            logo_buffer: 1.0,
            policy: CyclePolicy::default(),
            seed: None,
        }
    }
}

/// Geometry of the four logo strokes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogoSpec {
    /// Zig-zag mark of four strokes, centered on the canvas. Each stroke
    /// spans `segment_width` horizontally and `segment_width * slope` vertically.
    Mark { segment_width: f64, slope: f64 },
    /// Explicit stroke endpoints, in drawing order.
    Segments { segments: [[Point; 2]; 4] },
}

impl Default for LogoSpec {
    fn default() -> Self {
        Self::Mark {
            segment_width: 10.0,
            slope: LOGO_SLOPE,
        }
    }
}

impl LogoSpec {
    /// Resolve the four strokes on a canvas of side `canvas_size`.
    pub fn segments(&self, canvas_size: f64) -> [Line; 4] {
        match self {
            Self::Mark {
                segment_width,
                slope,
            } => {
                let w = *segment_width;
                let h = w * slope;
                let ox = canvas_size / 2.0 - w * 2.0;
                let oy = (canvas_size - h) / 2.0;
                let top = |k: f64| Point::new(ox + w * k, oy);
                let bottom = |k: f64| Point::new(ox + w * k, oy + h);
                [
                    Line::new(top(0.0), bottom(1.0)),
                    Line::new(bottom(1.0), top(2.0)),
                    Line::new(top(2.0), bottom(3.0)),
                    Line::new(bottom(3.0), top(4.0)),
                ]
            }
            Self::Segments { segments } => segments.map(|[p0, p1]| Line::new(p0, p1)),
        }
    }
}

impl GridConfig {
    pub fn from_json_str(s: &str) -> PolymarkResult<Self> {
        serde_json::from_str(s).map_err(|e| PolymarkError::serde(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> PolymarkResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read grid config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Lattice spacing for this configuration.
    pub fn min_delta(&self) -> f64 {
        self.canvas_size / (self.points_per_side.saturating_sub(1).max(1) as f64)
    }

    pub fn segments(&self) -> [Line; 4] {
        self.logo.segments(self.canvas_size)
    }

    /// Smallest rectangle covering all four strokes.
    pub fn logo_bounds(&self) -> Rect {
        let [first, rest @ ..] = self.segments();
        rest.iter().fold(Rect::from_points(first.p0, first.p1), |acc, l| {
            acc.union(Rect::from_points(l.p0, l.p1))
        })
    }

    pub fn validate(&self) -> PolymarkResult<()> {
        let n = self.points_per_side;
        if n < 4 {
            return Err(PolymarkError::validation(format!(
                "points_per_side must be >= 4 (got {n})"
            )));
        }
        if n > MAX_POINTS_PER_SIDE {
            return Err(PolymarkError::validation(format!(
                "points_per_side must be <= {MAX_POINTS_PER_SIDE} (got {n})"
            )));
        }
        if n % 2 != 0 {
            return Err(PolymarkError::validation(format!(
                "points_per_side must be even so the middle logo strokes do not share lattice points (got {n})"
            )));
        }
        if !self.canvas_size.is_finite() || self.canvas_size <= 0.0 {
            return Err(PolymarkError::validation(format!(
                "canvas_size must be finite and > 0 (got {})",
                self.canvas_size
            )));
        }
        if !self.logo_buffer.is_finite() || self.logo_buffer <= 0.0 {
            return Err(PolymarkError::validation(format!(
                "logo_buffer must be finite and > 0 (got {})",
                self.logo_buffer
            )));
        }
        self.jitter.validate()?;

        if let LogoSpec::Mark {
            segment_width,
            slope,
        } = &self.logo
        {
            if !segment_width.is_finite() || *segment_width <= 0.0 {
                return Err(PolymarkError::validation(
                    "logo segment_width must be finite and > 0",
                ));
            }
            if !slope.is_finite() || *slope <= 0.0 {
                return Err(PolymarkError::validation("logo slope must be finite and > 0"));
            }
        }

        let size = self.canvas_size;
        for (i, seg) in self.segments().iter().enumerate() {
            for p in [seg.p0, seg.p1] {
                if !p.is_finite() {
                    return Err(PolymarkError::validation(format!(
                        "logo segment {} has a non-finite endpoint",
                        i + 1
                    )));
                }
                if p.x < 0.0 || p.x > size || p.y < 0.0 || p.y > size {
                    return Err(PolymarkError::validation(format!(
                        "logo segment {} endpoint ({}, {}) lies outside the {size}x{size} canvas",
                        i + 1,
                        p.x,
                        p.y
                    )));
                }
            }
            if seg.p0 == seg.p1 {
                return Err(PolymarkError::validation(format!(
                    "logo segment {} has zero length",
                    i + 1
                )));
            }
        }
        Ok(())
    }
}
