//! Top-level entry point: normalizes input, explodes it into physical boxes,
//! and cascades them through the trucks in order.

use crate::config::PackerConfig;
use crate::error::{CargoPackError, Result};
use crate::model::{BoxGroup, BoxSpec, PackResult, PhysicalBox, Truck};
use crate::normalize;
use crate::packer::pack_truck;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Packs `specs` across `trucks` in order, honoring `cfg`. Returns the
/// per-truck placements plus whatever could not be placed anywhere.
///
/// This call is total: routine placement failure never surfaces as an
/// error, only as entries in [`PackResult::unpacked`]. Only malformed input
/// (no boxes, a non-positive truck dimension, or an unresolvable
/// destination) is fatal.
#[instrument(skip(specs, trucks, dest_to_dict, cfg))]
pub fn pack_cargo(
    specs: &[BoxSpec],
    trucks: &[Truck],
    dest_to_dict: &BTreeMap<String, u32>,
    cfg: &PackerConfig,
) -> Result<PackResult> {
    cfg.validate()?;

    for truck in trucks {
        if truck.dims.length == 0 || truck.dims.width == 0 || truck.dims.height == 0 {
            return Err(CargoPackError::InvalidTruckDimensions {
                name: truck.name.clone(),
                length: truck.dims.length,
                width: truck.dims.width,
                height: truck.dims.height,
            });
        }
    }

    let groups: Vec<BoxGroup> = normalize::normalize(specs, dest_to_dict, cfg.load_pattern)?;
    let physical = normalize::explode(&groups);

    let mut unpacked: BTreeMap<u32, Vec<PhysicalBox>> = BTreeMap::new();
    for b in physical {
        unpacked.entry(b.destination_code).or_default().push(b);
    }

    let mut per_truck = Vec::with_capacity(trucks.len());
    for truck in trucks {
        let remaining: usize = unpacked.values().map(|v| v.len()).sum();
        if remaining == 0 {
            info!(truck = %truck.name, "no boxes remain; skipping");
            per_truck.push((truck.name.clone(), Default::default()));
            continue;
        }
        let result = pack_truck(truck, &mut unpacked, cfg);
        info!(
            truck = %truck.name,
            placed = result.placed.len(),
            residual_m3 = result.residual_volume_m3,
            "truck packed"
        );
        per_truck.push((truck.name.clone(), result));
    }

    let leftover: Vec<PhysicalBox> = unpacked.into_values().flatten().collect();
    let unpacked_box_ids: Vec<String> = leftover
        .iter()
        .map(|b| groups[b.type_index].box_id.clone())
        .collect();

    if !leftover.is_empty() {
        info!(count = leftover.len(), "boxes left unpacked after all trucks");
    }

    Ok(PackResult {
        per_truck,
        unpacked: leftover,
        unpacked_box_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadPattern;
    use crate::geometry::Dims3;
    use crate::model::Stackability;

    fn spec(id: &str, dims: Dims3, qty: u32, dest: &str) -> BoxSpec {
        BoxSpec {
            box_id: id.to_string(),
            length: dims.length,
            width: dims.width,
            height: dims.height,
            quantity: qty,
            weight: 1.0,
            destination: dest.to_string(),
            stackable: Stackability::Stackable,
        }
    }

    fn dest_map() -> BTreeMap<String, u32> {
        let mut m = BTreeMap::new();
        m.insert("Alpha".to_string(), 1);
        m
    }

    #[test]
    fn rejects_empty_input() {
        let trucks = vec![Truck::new("TRUCK-1", Dims3::new(100, 100, 100))];
        let err = pack_cargo(&[], &trucks, &dest_map(), &PackerConfig::default()).unwrap_err();
        assert!(matches!(err, CargoPackError::Empty));
    }

    #[test]
    fn rejects_zero_dimension_truck() {
        let specs = vec![spec("B1", Dims3::new(10, 10, 10), 1, "Alpha")];
        let trucks = vec![Truck::new("TRUCK-1", Dims3::new(0, 100, 100))];
        let err =
            pack_cargo(&specs, &trucks, &dest_map(), &PackerConfig::default()).unwrap_err();
        assert!(matches!(err, CargoPackError::InvalidTruckDimensions { .. }));
    }

    #[test]
    fn overflow_cascades_across_trucks() {
        let specs = vec![spec("B1", Dims3::new(100, 100, 100), 3, "Alpha")];
        let trucks = vec![
            Truck::new("TRUCK-1", Dims3::new(100, 100, 100)),
            Truck::new("TRUCK-2", Dims3::new(100, 100, 100)),
        ];
        let cfg = PackerConfig::builder().load_pattern(LoadPattern::Side).build();
        let result = pack_cargo(&specs, &trucks, &dest_map(), &cfg).unwrap();
        assert_eq!(result.per_truck.len(), 2);
        assert_eq!(result.per_truck[0].1.placed.len(), 1);
        assert_eq!(result.per_truck[1].1.placed.len(), 1);
        assert_eq!(result.unpacked.len(), 1);
        assert_eq!(result.unpacked_box_ids, vec!["B1".to_string()]);
        assert_eq!(result.total_placed(), 2);
    }

    #[test]
    fn skips_truck_when_nothing_remains() {
        let specs = vec![spec("B1", Dims3::new(50, 50, 50), 1, "Alpha")];
        let trucks = vec![
            Truck::new("TRUCK-1", Dims3::new(100, 100, 100)),
            Truck::new("TRUCK-2", Dims3::new(100, 100, 100)),
        ];
        let result =
            pack_cargo(&specs, &trucks, &dest_map(), &PackerConfig::default()).unwrap();
        assert_eq!(result.per_truck[1].1.placed.len(), 0);
        assert_eq!(result.per_truck[1].1.count_by_type.len(), 0);
    }
}
