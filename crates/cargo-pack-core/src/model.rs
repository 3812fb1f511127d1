//! Data model for boxes, trucks, and packing results.

use crate::geometry::{Corners, Dims3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether another box may rest with XY overlap directly on top of this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stackability {
    Stackable,
    NonStackable,
}

impl Stackability {
    /// Matches the original encoding: `Yes` -> stackable (0), `No` -> non-stackable (1).
    pub fn from_yes_no(s: &str) -> Option<Self> {
        match s.trim() {
            "Yes" => Some(Self::Stackable),
            "No" => Some(Self::NonStackable),
            _ => None,
        }
    }

    pub fn sort_rank(self) -> u8 {
        match self {
            Self::Stackable => 0,
            Self::NonStackable => 1,
        }
    }
}

/// A single input row before grouping: one line of the box table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxSpec {
    pub box_id: String,
    pub length: u32,
    pub width: u32,
    pub height: u32,
    pub quantity: u32,
    pub weight: f64,
    pub destination: String,
    pub stackable: Stackability,
}

/// A box specification after grouping duplicate rows, tagged with its stable
/// fingerprint code and resolved destination code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxGroup {
    pub fingerprint: String,
    pub box_id: String,
    pub dims: Dims3,
    pub quantity: u32,
    pub weight: f64,
    pub destination_code: u32,
    pub stackable: Stackability,
}

/// One physical box instance, exploded out of a [`BoxGroup`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhysicalBox {
    pub dims: Dims3,
    /// Index into the fingerprint table this instance was exploded from.
    pub type_index: usize,
    pub weight: f64,
    pub destination_code: u32,
    pub stackable: Stackability,
}

/// A named truck with fixed dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    pub name: String,
    pub dims: Dims3,
}

impl Truck {
    pub fn new(name: impl Into<String>, dims: Dims3) -> Self {
        Self {
            name: name.into(),
            dims,
        }
    }
}

/// A box that has been committed into a truck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedBox {
    /// Sequential local name within the truck: `box-1`, `box-2`, ...
    pub name: String,
    pub corners: Corners,
    pub type_index: usize,
    pub base_support_pct: f64,
    pub destination_code: u32,
    pub weight: f64,
    pub stackable: Stackability,
}

impl PlacedBox {
    pub fn dims(&self) -> Dims3 {
        let (c0, c7) = (self.corners[0], self.corners[7]);
        Dims3::new(c7.x - c0.x, c7.y - c0.y, c7.z - c0.z)
    }
}

/// Result of packing a single truck.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TruckResult {
    pub placed: Vec<PlacedBox>,
    /// Count of placed physical boxes, keyed by fingerprint/type-index.
    pub count_by_type: BTreeMap<usize, u32>,
    pub residual_volume_m3: f64,
}

/// Result of packing across every truck, in truck order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PackResult {
    pub per_truck: Vec<(String, TruckResult)>,
    /// Physical boxes that could not be placed in any truck.
    pub unpacked: Vec<PhysicalBox>,
    pub unpacked_box_ids: Vec<String>,
}

impl PackResult {
    pub fn total_placed(&self) -> usize {
        self.per_truck.iter().map(|(_, t)| t.placed.len()).sum()
    }
}
