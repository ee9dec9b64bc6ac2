pub type PolymarkResult<T> = Result<T, PolymarkError>;

#[derive(thiserror::Error, Debug)]
pub enum PolymarkError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("planning error: {0}")]
    Planning(String),

    #[error("triangulation error: {0}")]
    Triangulation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PolymarkError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn planning(msg: impl Into<String>) -> Self {
        Self::Planning(msg.into())
    }

    pub fn triangulation(msg: impl Into<String>) -> Self {
        Self::Triangulation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GridConfig,
        core::{Line, LogoLineId, Point},
        planner::PathPlanner,
        triangulate::Adjacency,
    };

    #[test]
    fn config_failures_carry_their_kind() {
        let cfg = GridConfig {
            points_per_side: 9,
            ..GridConfig::default()
        };
        let msg = cfg.validate().unwrap_err().to_string();
        assert!(msg.starts_with("validation error: points_per_side"), "{msg}");

        let msg = GridConfig::from_json_str(r#"{ "points_per_side": "many" }"#)
            .unwrap_err()
            .to_string();
        assert!(msg.starts_with("serialization error:"), "{msg}");
    }

    #[test]
    fn geometry_failures_name_their_stage() {
        let line = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        let msg = Adjacency::build(&line).unwrap_err().to_string();
        assert!(msg.starts_with("triangulation error:"), "{msg}");

        let pts = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(0.0, 50.0),
        ];
        let adj = Adjacency::build(&pts).unwrap();
        let seg = Line::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        let msg = PathPlanner::new(&pts, &adj, 1.0)
            .plan(LogoLineId::Line1, seg)
            .unwrap_err()
            .to_string();
        assert!(msg.starts_with("planning error: line1:"), "{msg}");
    }

    #[test]
    fn io_failures_keep_their_context() {
        let err = GridConfig::from_json_file(std::path::Path::new("missing/grid.json")).unwrap_err();
        assert!(matches!(err, PolymarkError::Other(_)));
        assert!(err.to_string().contains("missing/grid.json"));
    }
}
