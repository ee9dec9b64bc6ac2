use crate::{
    core::{BezPath, GridState, LogoLineId, OPACITY_LOW, Point, PointId},
    grid::{Grid, GridPoint},
    viewport::ViewportFit,
};

/// Everything a renderer needs to draw one version of a grid.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame {
    pub state: GridState,
    pub tick: u64,
    pub canvas_size: f64,
    pub points: Vec<FramePoint>,
    pub edges: Vec<FrameEdge>,
    pub logo: Vec<FrameLogoLine>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FramePoint {
    pub id: PointId,
    pub pos: Point,
    pub anchored: bool,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameEdge {
    pub p1: PointId,
    pub p2: PointId,
    pub from: Point,
    pub to: Point,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameLogoLine {
    pub id: LogoLineId,
    pub anchored: bool,
    pub opacity: f64,
    /// SVG path data (`M x y L x y ...`).
    pub path: String,
}

impl Frame {
    /// Snapshot of the whole grid.
    pub fn capture(grid: &Grid) -> Self {
        Self::build(grid, |_| true)
    }

    /// Snapshot culled to what is visible through `fit`.
    ///
    /// Edges are kept while at least one end is drawable.
    pub fn capture_in(grid: &Grid, fit: &ViewportFit) -> Self {
        Self::build(grid, |p| fit.should_draw(p))
    }

    fn build(grid: &Grid, visible: impl Fn(Point) -> bool) -> Self {
        let points = grid
            .points
            .iter()
            .filter_map(|p| {
                let pos = p.draw_position();
                visible(pos).then(|| FramePoint {
                    id: p.id,
                    pos,
                    anchored: p.is_anchored(),
                    opacity: opacity(p),
                })
            })
            .collect();

        let edges = grid
            .visible_paths()
            .filter_map(|path| {
                let from = grid.points[path.p1.0].draw_position();
                let to = grid.points[path.p2.0].draw_position();
                (visible(from) || visible(to)).then_some(FrameEdge {
                    p1: path.p1,
                    p2: path.p2,
                    from,
                    to,
                })
            })
            .collect();

        let logo = LogoLineId::ALL
            .into_iter()
            .map(|id| FrameLogoLine {
                id,
                anchored: grid.logo_line(id).anchored,
                opacity: id.emphasis(),
                path: logo_path(grid, id).to_svg(),
            })
            .collect();

        Self {
            state: grid.state,
            tick: grid.tick,
            canvas_size: grid.info.svg_size,
            points,
            edges,
            logo,
        }
    }
}

/// Outline of one logo stroke: its anchors once active, otherwise the
/// current positions of its points.
pub fn logo_path(grid: &Grid, id: LogoLineId) -> BezPath {
    let line = grid.logo_line(id);
    let mut path = BezPath::new();
    for (i, lp) in line.points.iter().enumerate() {
        let p = if line.anchored {
            lp.anchor
        } else {
            grid.points[lp.id.0].draw_position()
        };
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path
}

fn opacity(p: &GridPoint) -> f64 {
    match p.logo {
        Some(l) if l.anchored => l.line.emphasis(),
        _ => OPACITY_LOW,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::PathEl;

    use super::*;
    use crate::{config::GridConfig, grid::create_grid};

    fn grid() -> Grid {
        create_grid(&GridConfig {
            seed: Some(8),
            ..GridConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn capture_skips_ignored_edges() {
        let g = grid();
        let frame = Frame::capture(&g);
        assert_eq!(frame.points.len(), g.points.len());
        assert_eq!(frame.edges.len(), g.visible_paths().count());
        assert_eq!(frame.logo.len(), 4);
    }

    #[test]
    fn anchored_logo_path_follows_anchors() {
        let g = grid().advance(Some(GridState::Line2));
        let path = logo_path(&g, LogoLineId::Line2);
        let line = g.logo_line(LogoLineId::Line2);
        let pts: Vec<Point> = path
            .elements()
            .iter()
            .map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => p,
                _ => unreachable!("logo paths are polylines"),
            })
            .collect();
        let anchors: Vec<Point> = line.points.iter().map(|lp| lp.anchor).collect();
        assert_eq!(pts, anchors);

        let frame = Frame::capture(&g);
        let l2 = &frame.logo[LogoLineId::Line2.index()];
        assert!(l2.anchored && l2.path.starts_with('M'));
        assert!(!frame.logo[0].anchored);
    }

    #[test]
    fn anchored_points_use_line_emphasis() {
        let g = grid().advance(Some(GridState::Line2));
        let frame = Frame::capture(&g);
        for fp in &frame.points {
            if fp.anchored {
                assert_eq!(fp.opacity, LogoLineId::Line2.emphasis());
            } else {
                assert_eq!(fp.opacity, OPACITY_LOW);
            }
        }
    }

    #[test]
    fn viewport_culls_cropped_points() {
        let g = grid();
        let fit = ViewportFit::cover(800.0, 400.0, g.info.svg_size);
        let frame = Frame::capture_in(&g, &fit);
        assert!(frame.points.len() < g.points.len());
        assert!(frame.points.iter().all(|p| fit.should_draw(p.pos)));
        assert!(
            frame
                .edges
                .iter()
                .all(|e| fit.should_draw(e.from) || fit.should_draw(e.to))
        );
    }
}
