//! The single-truck packer: the pivot-point heuristic loop described in
//! SPEC_FULL.md §4.4.

pub mod single_truck;

pub use single_truck::pack_truck;
