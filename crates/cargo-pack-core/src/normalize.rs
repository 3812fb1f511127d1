//! Groups raw box-table rows into stable fingerprinted [`BoxGroup`]s and
//! explodes them into physical box instances, per SPEC_FULL.md §4.6.

use crate::config::LoadPattern;
use crate::error::{CargoPackError, Result};
use crate::geometry::Dims3;
use crate::model::{BoxGroup, BoxSpec, PhysicalBox};
use std::collections::BTreeMap;

/// Resolves `BoxSpec::destination` (a trimmed name) to an integer code via
/// `dest_to_dict`, returning [`CargoPackError::UnknownDestination`] if the
/// name has no entry.
fn resolve_destination(name: &str, dest_to_dict: &BTreeMap<String, u32>) -> Result<u32> {
    let trimmed = name.trim();
    dest_to_dict
        .get(trimmed)
        .copied()
        .ok_or_else(|| CargoPackError::UnknownDestination(trimmed.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    stackable_rank: u8,
    destination_code: u32,
    box_id: String,
    weight_bits: u64,
}

struct Accum {
    key: GroupKey,
    box_id: String,
    destination_code: u32,
    weight: f64,
    length_sum: u64,
    width_sum: u64,
    height_sum: u64,
    row_count: u32,
    quantity: u32,
    stackable: crate::model::Stackability,
}

/// Groups raw rows by (stackability, destination, identifier, weight),
/// averaging L/W/H across the grouped *rows* (each row counted once,
/// regardless of its quantity) and summing quantity within each group, sorts
/// the resulting groups per `load_pattern`'s column policy, and assigns
/// fingerprint codes `F-1`, `F-2`, ... in that sorted order.
///
/// Returns an error if `specs` is empty or any destination name fails to
/// resolve.
pub fn normalize(
    specs: &[BoxSpec],
    dest_to_dict: &BTreeMap<String, u32>,
    load_pattern: LoadPattern,
) -> Result<Vec<BoxGroup>> {
    if specs.is_empty() {
        return Err(CargoPackError::Empty);
    }

    let mut groups: BTreeMap<GroupKey, Accum> = BTreeMap::new();

    for spec in specs {
        let destination_code = resolve_destination(&spec.destination, dest_to_dict)?;
        let key = GroupKey {
            stackable_rank: spec.stackable.sort_rank(),
            destination_code,
            box_id: spec.box_id.clone(),
            weight_bits: spec.weight.to_bits(),
        };
        let entry = groups.entry(key.clone()).or_insert_with(|| Accum {
            key: key.clone(),
            box_id: spec.box_id.clone(),
            destination_code,
            weight: spec.weight,
            length_sum: 0,
            width_sum: 0,
            height_sum: 0,
            row_count: 0,
            quantity: 0,
            stackable: spec.stackable,
        });
        entry.length_sum += spec.length as u64;
        entry.width_sum += spec.width as u64;
        entry.height_sum += spec.height as u64;
        entry.row_count += 1;
        entry.quantity += spec.quantity;
    }

    let mut accums: Vec<Accum> = groups.into_values().collect();

    if load_pattern.is_rear_loading() {
        accums.sort_by(|a, b| {
            a.key
                .stackable_rank
                .cmp(&b.key.stackable_rank)
                .then(avg_width(b).partial_cmp(&avg_width(a)).unwrap())
                .then(avg_height(b).partial_cmp(&avg_height(a)).unwrap())
                .then(b.destination_code.cmp(&a.destination_code))
                .then(avg_length(b).partial_cmp(&avg_length(a)).unwrap())
                .then(b.weight.partial_cmp(&a.weight).unwrap())
        });
    } else {
        accums.sort_by(|a, b| {
            a.key
                .stackable_rank
                .cmp(&b.key.stackable_rank)
                .then(b.destination_code.cmp(&a.destination_code))
                .then(avg_width(b).partial_cmp(&avg_width(a)).unwrap())
                .then(avg_length(b).partial_cmp(&avg_length(a)).unwrap())
                .then(avg_height(b).partial_cmp(&avg_height(a)).unwrap())
                .then(b.weight.partial_cmp(&a.weight).unwrap())
        });
    }

    let result = accums
        .into_iter()
        .enumerate()
        .map(|(i, a)| BoxGroup {
            fingerprint: format!("F-{}", i + 1),
            box_id: a.box_id,
            dims: Dims3::new(
                (a.length_sum / a.row_count as u64) as u32,
                (a.width_sum / a.row_count as u64) as u32,
                (a.height_sum / a.row_count as u64) as u32,
            ),
            quantity: a.quantity,
            weight: a.weight,
            destination_code: a.destination_code,
            stackable: a.stackable,
        })
        .collect();

    Ok(result)
}

fn avg_length(a: &Accum) -> f64 {
    a.length_sum as f64 / a.row_count as f64
}
fn avg_width(a: &Accum) -> f64 {
    a.width_sum as f64 / a.row_count as f64
}
fn avg_height(a: &Accum) -> f64 {
    a.height_sum as f64 / a.row_count as f64
}

/// Explodes each group into `quantity` identical physical box instances,
/// tagged with the group's index in `groups` as the type-index.
pub fn explode(groups: &[BoxGroup]) -> Vec<PhysicalBox> {
    let mut out = Vec::new();
    for (type_index, g) in groups.iter().enumerate() {
        for _ in 0..g.quantity {
            out.push(PhysicalBox {
                dims: g.dims,
                type_index,
                weight: g.weight,
                destination_code: g.destination_code,
                stackable: g.stackable,
            });
        }
    }
    out
}
