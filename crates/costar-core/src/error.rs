use std::fmt;

/// Machine-readable error codes for the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NoSuchVertex,
    NoSuchEdge,
    InvalidArgument,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NoSuchVertex => "E2001",
            Self::NoSuchEdge => "E2002",
            Self::InvalidArgument => "E2003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoSuchVertex => "Actor not found",
            Self::NoSuchEdge => "Actors never appeared together",
            Self::InvalidArgument => "Invalid argument",
        }
    }

    /// Optional remediation hint for the command interface.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NoSuchVertex => Some("Names are matched exactly, including case."),
            Self::NoSuchEdge => None,
            Self::InvalidArgument => Some("Check the numeric arguments."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors returned by graph queries.
///
/// Vertices are rendered with their `Debug` representation so the error type
/// stays independent of the vertex type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The query referenced a vertex absent from the graph or tree.
    #[error("no such vertex: {0}")]
    NoSuchVertex(String),

    /// The vertex exists but has no path to the center being queried.
    /// Reported under the same code as an absent vertex.
    #[error("{vertex} has infinite separation from {center}")]
    Unreachable { vertex: String, center: String },

    /// A label lookup named a pair of vertices with no edge between them.
    #[error("no edge between {from} and {to}")]
    NoSuchEdge { from: String, to: String },

    /// Malformed bounds, counts or inputs.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl GraphError {
    pub(crate) fn no_such_vertex<V: fmt::Debug>(vertex: &V) -> Self {
        Self::NoSuchVertex(format!("{vertex:?}"))
    }

    pub(crate) fn no_such_edge<V: fmt::Debug>(from: &V, to: &V) -> Self {
        Self::NoSuchEdge {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }

    pub(crate) fn unreachable<V: fmt::Debug>(vertex: &V, center: &V) -> Self {
        Self::Unreachable {
            vertex: format!("{vertex:?}"),
            center: format!("{center:?}"),
        }
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// The machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NoSuchVertex(_) | Self::Unreachable { .. } => ErrorCode::NoSuchVertex,
            Self::NoSuchEdge { .. } => ErrorCode::NoSuchEdge,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
        }
    }

    /// Remediation hint for this particular error, if any.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Unreachable { .. } => None,
            _ => self.code().hint(),
        }
    }
}

/// Reject `low > high` range bounds.
pub(crate) fn check_bounds(low: usize, high: usize) -> Result<(), GraphError> {
    if low > high {
        return Err(GraphError::invalid_argument(format!(
            "low bound {low} exceeds high bound {high}"
        )));
    }
    Ok(())
}
