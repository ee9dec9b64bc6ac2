#![forbid(unsafe_code)]

//! Procedural polygon grid that draws a logo mark in timed steps.
//!
//! A staggered, jittered lattice is triangulated; four logo strokes are then
//! traced across the triangulation's adjacency graph. [`advance`] steps the
//! grid through `Initial -> Line1 .. Line4 -> Final`, snapping one stroke's
//! points onto their anchors per step. Rendering is left to the caller:
//! [`Frame`] resolves a grid into positions, edges and stroke outlines.
//!
//! ```no_run
//! use polymark::{GridConfig, GridState, create_grid};
//!
//! let grid = create_grid(&GridConfig { seed: Some(7), ..GridConfig::default() })?;
//! let next = grid.advance(None);
//! assert_eq!(next.state, GridState::Line1);
//! # Ok::<(), polymark::PolymarkError>(())
//! ```

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod frame;
pub mod grid;
pub mod jitter;
pub mod lattice;
pub mod machine;
pub mod planner;
pub mod triangulate;
pub mod viewport;

pub use config::{GridConfig, LogoSpec};
pub use crate::core::{GridState, LogoLineId, Point, PointId, Vec2};
pub use driver::{Driver, TimedGrid};
pub use error::{PolymarkError, PolymarkResult};
pub use frame::{Frame, FrameEdge, FrameLogoLine, FramePoint};
pub use grid::{Grid, GridInfo, GridPoint, LogoAssignment, LogoLine, Path, create_grid};
pub use jitter::JitterParams;
pub use machine::{CyclePolicy, advance};
pub use planner::LogoPoint;
pub use triangulate::Adjacency;
pub use viewport::ViewportFit;
