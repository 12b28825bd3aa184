//! Errors surfaced when a required oracle is missing from the environment.

/// A required oracle was not provided to [`super::Env`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("ability oracle not available")]
    AbilitiesNotAvailable,

    #[error("unit oracle not available")]
    UnitsNotAvailable,

    #[error("djinn oracle not available")]
    DjinnNotAvailable,

    #[error("equipment oracle not available")]
    EquipmentNotAvailable,

    #[error("tables oracle not available")]
    TablesNotAvailable,

    #[error("rng oracle not available")]
    RngNotAvailable,
}
