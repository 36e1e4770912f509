use thiserror::Error;

use crate::registry::EntityId;

/// Misuse of the registry's add/remove contract.
///
/// These indicate a bug in the caller, so the pipeline stops the tick and hands
/// the error straight back instead of trying to recover.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("entity {0} is not in the active set and cannot be removed")]
    NotActive(EntityId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("unrecognized engine option `{0}`")]
    UnknownOption(String),
}
