use thiserror::Error;

/// Errors the packing engine can return.
///
/// All variants are fatal — they abort before any placement is attempted.
/// Routine placement rejection (a box that does not fit anywhere) is never
/// an error; it is reported back as part of the unpacked set.
#[derive(Debug, Error)]
pub enum CargoPackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no boxes supplied")]
    Empty,

    #[error("unresolvable destination name: '{0}'")]
    UnknownDestination(String),

    #[error("truck '{name}' has a non-positive dimension ({length}x{width}x{height})")]
    InvalidTruckDimensions {
        name: String,
        length: u32,
        width: u32,
        height: u32,
    },
}

pub type Result<T> = std::result::Result<T, CargoPackError>;
