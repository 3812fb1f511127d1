//! Multi-truck 3D cargo bin-packing engine: a pivot-point first-fit
//! heuristic with geometric and destination-ordering constraints.
//!
//! The entry point is [`pipeline::pack_cargo`]; see the [`prelude`] for the
//! common set of types needed to call it.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod model;
pub mod normalize;
pub mod packer;
pub mod pipeline;
pub mod pivot;
pub mod predicates;

pub use error::{CargoPackError, Result};
pub use pipeline::pack_cargo;

/// Re-exports the types most callers need to build inputs and read outputs.
pub mod prelude {
    pub use crate::config::{LoadPattern, PackerConfig, PackerConfigBuilder};
    pub use crate::error::{CargoPackError, Result};
    pub use crate::model::{
        BoxGroup, BoxSpec, PackResult, PhysicalBox, PlacedBox, Stackability, Truck, TruckResult,
    };
    pub use crate::pipeline::pack_cargo;
}
