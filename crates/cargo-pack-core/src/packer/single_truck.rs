use crate::config::PackerConfig;
use crate::geometry::{make_corners, volume_m3};
use crate::model::{PhysicalBox, PlacedBox, Truck, TruckResult};
use crate::pivot::PivotSet;
use crate::predicates::{
    base_support_pct, fits_in_truck, is_unloadable, no_overlap, respects_non_stackable,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Packs every box currently unpacked into `truck`, mutating `unpacked` in
/// place to hold only the boxes that did not fit.
///
/// Destinations are iterated highest-code-first (loaded first, unloaded
/// last); within a destination, boxes are tried in their existing list
/// order. Predicates are evaluated fit, unload, non-stack, non-overlap,
/// base-support — cheapest first.
#[instrument(skip(unpacked, cfg), fields(truck = %truck.name))]
pub fn pack_truck(
    truck: &Truck,
    unpacked: &mut BTreeMap<u32, Vec<PhysicalBox>>,
    cfg: &PackerConfig,
) -> TruckResult {
    let total_truck_vol = volume_m3(truck.dims);
    let mut placed: Vec<PlacedBox> = Vec::new();
    let mut pivots = PivotSet::new();
    let mut total_box_vol = 0.0_f64;

    let mut dest_keys: Vec<u32> = unpacked.keys().copied().collect();
    dest_keys.sort_unstable_by(|a, b| b.cmp(a));

    debug!(trucks_destinations = dest_keys.len(), "packing truck");

    for dest in dest_keys {
        let boxes = unpacked.get(&dest).cloned().unwrap_or_default();
        let mut placed_indices: Vec<usize> = Vec::new();

        'boxes: for (idx, b) in boxes.iter().enumerate() {
            let box_vol = volume_m3(b.dims);
            if total_box_vol + box_vol > total_truck_vol {
                debug!(destination = dest, "box volume exceeds residual truck volume");
                break;
            }

            for pvt in pivots.ordered(cfg.load_pattern) {
                let corners = make_corners(pvt, b.dims);
                if !fits_in_truck(&corners, truck.dims) {
                    continue;
                }
                if !is_unloadable(&corners, dest, &placed) {
                    continue;
                }
                if !respects_non_stackable(&corners, &placed) {
                    continue;
                }
                if !no_overlap(&corners, &placed) {
                    continue;
                }
                let support = base_support_pct(&corners, &placed);
                if support < cfg.base_area_threshold {
                    continue;
                }

                let name = format!("box-{}", placed.len() + 1);
                placed.push(PlacedBox {
                    name,
                    corners,
                    type_index: b.type_index,
                    base_support_pct: support,
                    destination_code: dest,
                    weight: b.weight,
                    stackable: b.stackable,
                });
                pivots.retire(pvt);
                pivots.expand_after_placement(&corners);
                placed_indices.push(idx);
                total_box_vol += box_vol;
                continue 'boxes;
            }
        }

        let remaining: Vec<PhysicalBox> = boxes
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !placed_indices.contains(i))
            .map(|(_, b)| b)
            .collect();
        unpacked.insert(dest, remaining);
    }

    let mut count_by_type: BTreeMap<usize, u32> = BTreeMap::new();
    for p in &placed {
        *count_by_type.entry(p.type_index).or_insert(0) += 1;
    }

    TruckResult {
        placed,
        count_by_type,
        residual_volume_m3: total_truck_vol - total_box_vol,
    }
}
