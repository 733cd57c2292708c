use thiserror::Error;

/// Failures surfaced by the evaluation engine.
///
/// File and configuration handling lives on top of `anyhow`; this enum only covers the
/// failures that callers of the core operations are expected to match on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown unit symbol '{0}'")]
    UnknownUnit(String),

    #[error("map source '{0}' is not present in the map source state")]
    MissingMapSource(String),

    #[error("catalog layer does not reference any map source")]
    LayerWithoutSource,

    #[error("malformed filter clause: {0}")]
    MalformedFilterClause(String),

    #[error("projection '{0}' is not defined in the registry")]
    UndefinedProjection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
