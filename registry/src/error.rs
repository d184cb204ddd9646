use thiserror::Error;

/// User-visible registry outcomes that are not successes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Acronym '{0}' is already defined")]
    DuplicateAcronym(String),

    #[error("Acronym '{0}' is not defined")]
    UnknownAcronym(String),

    #[error("'{0}' has no letters or digits to use as an acronym")]
    EmptyAcronym(String),
}
