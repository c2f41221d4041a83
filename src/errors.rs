use thiserror::Error;


#[derive(Debug, Error)]
pub enum SearchError {
    #[error("unknown location: {0}")]
    InvalidLocation(String), // start or goal is not part of the graph

    #[error("invalid algorithm: {0}")]
    UnknownAlgorithm(String), // selector outside BFS, DFS, UCS, A*

    #[error("unknown heuristic: {0}")]
    UnknownHeuristic(String),

    #[error("invalid edge {from} -> {to}: {reason}")]
    InvalidEdge { from: String, to: String, reason: String },

    #[error("search interrupted after exploring {nodes_explored} nodes")]
    Interrupted { nodes_explored: usize },

    #[error("no path found from {start} to {goal}")]
    NoPathFound { start: String, goal: String },

    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid maze: {0}")]
    InvalidMaze(String),

    #[error("invalid map: {0}")]
    InvalidMap(String),

    #[error("malformed map file: {0}")]
    MapFormat(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SearchError {

    /// HTTP-style status code for a serving wrapper
    pub fn status_code(&self) -> u16 {
        match self {
            SearchError::InvalidLocation(_)
            | SearchError::UnknownAlgorithm(_)
            | SearchError::UnknownHeuristic(_)
            | SearchError::MissingParameter(_) => 400,
            SearchError::NoPathFound { .. } => 404,
            _ => 500,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SearchError::InvalidLocation("Moon".into()).status_code(), 400);
        assert_eq!(SearchError::UnknownAlgorithm("IDA".into()).status_code(), 400);
        assert_eq!(SearchError::MissingParameter("goal").status_code(), 400);
        assert_eq!(
            SearchError::NoPathFound { start: "A".into(), goal: "B".into() }.status_code(),
            404
        );
        assert_eq!(SearchError::Interrupted { nodes_explored: 3 }.status_code(), 500);
    }

    #[test]
    fn test_messages() {
        let err = SearchError::InvalidEdge {
            from: "A".into(),
            to: "B".into(),
            reason: "negative distance".into(),
        };
        assert_eq!(err.to_string(), "invalid edge A -> B: negative distance");
        assert_eq!(
            SearchError::UnknownAlgorithm("IDA".into()).to_string(),
            "invalid algorithm: IDA"
        );
    }
}
