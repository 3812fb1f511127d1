use cargo_pack_core::geometry::Dims3;
use cargo_pack_core::prelude::*;
use std::collections::BTreeMap;

fn generate_specs(count: usize, dest_count: u32, seed: u64) -> Vec<BoxSpec> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| BoxSpec {
            box_id: format!("box_{}", i),
            length: rng.gen_range(20..=80),
            width: rng.gen_range(20..=80),
            height: rng.gen_range(20..=80),
            quantity: rng.gen_range(1..=3),
            weight: rng.gen_range(1.0..=50.0),
            destination: format!("dest-{}", rng.gen_range(1..=dest_count)),
            stackable: if rng.gen_bool(0.75) {
                Stackability::Stackable
            } else {
                Stackability::NonStackable
            },
        })
        .collect()
}

fn dest_map(dest_count: u32) -> BTreeMap<String, u32> {
    (1..=dest_count)
        .map(|code| (format!("dest-{}", code), code))
        .collect()
}

fn trucks() -> Vec<Truck> {
    vec![
        Truck::new("TRUCK-1", Dims3::new(500, 220, 220)),
        Truck::new("TRUCK-2", Dims3::new(500, 220, 220)),
    ]
}

#[test]
fn pack_cargo_is_repeatable_for_identical_input() {
    let specs = generate_specs(150, 4, 99);
    let dests = dest_map(4);
    let cfg = PackerConfig::default();

    let r1 = pack_cargo(&specs, &trucks(), &dests, &cfg).unwrap();
    let r2 = pack_cargo(&specs, &trucks(), &dests, &cfg).unwrap();

    assert_eq!(r1.total_placed(), r2.total_placed());
    assert_eq!(r1.unpacked_box_ids, r2.unpacked_box_ids);
    for ((name1, t1), (name2, t2)) in r1.per_truck.iter().zip(r2.per_truck.iter()) {
        assert_eq!(name1, name2);
        assert_eq!(t1.placed.len(), t2.placed.len());
        for (p1, p2) in t1.placed.iter().zip(t2.placed.iter()) {
            assert_eq!(p1.corners, p2.corners);
            assert_eq!(p1.destination_code, p2.destination_code);
        }
    }
}

#[test]
fn no_two_placed_boxes_overlap_in_any_truck() {
    use cargo_pack_core::geometry::aabb_overlap;

    let specs = generate_specs(200, 5, 7);
    let dests = dest_map(5);
    let cfg = PackerConfig::default();
    let result = pack_cargo(&specs, &trucks(), &dests, &cfg).unwrap();

    for (_, truck_result) in &result.per_truck {
        let placed = &truck_result.placed;
        for i in 0..placed.len() {
            for j in (i + 1)..placed.len() {
                assert!(!aabb_overlap(&placed[i].corners, &placed[j].corners));
            }
        }
    }
}

#[test]
fn every_placed_box_is_contained_in_its_truck() {
    let specs = generate_specs(200, 5, 123);
    let dests = dest_map(5);
    let cfg = PackerConfig::default();
    let all_trucks = trucks();
    let result = pack_cargo(&specs, &all_trucks, &dests, &cfg).unwrap();

    for ((truck_name, truck_result), truck) in result.per_truck.iter().zip(all_trucks.iter()) {
        assert_eq!(truck_name, &truck.name);
        for p in &truck_result.placed {
            let c7 = p.corners[7];
            assert!(c7.x <= truck.dims.length);
            assert!(c7.y <= truck.dims.width);
            assert!(c7.z <= truck.dims.height);
        }
    }
}

#[test]
fn placed_and_unpacked_counts_conserve_total() {
    let specs = generate_specs(180, 3, 55);
    let dests = dest_map(3);
    let cfg = PackerConfig::default();

    let total_physical: u32 = specs.iter().map(|s| s.quantity).sum();
    let result = pack_cargo(&specs, &trucks(), &dests, &cfg).unwrap();

    let placed: usize = result.total_placed();
    let unpacked = result.unpacked.len();
    assert_eq!(placed + unpacked, total_physical as usize);
}

#[test]
fn every_non_floor_placement_meets_the_support_threshold() {
    let specs = generate_specs(150, 4, 321);
    let dests = dest_map(4);
    let cfg = PackerConfig::builder().base_area_threshold(100.0).build();
    let result = pack_cargo(&specs, &trucks(), &dests, &cfg).unwrap();

    for (_, truck_result) in &result.per_truck {
        for p in &truck_result.placed {
            if p.corners[0].z > 0 {
                assert!(p.base_support_pct >= cfg.base_area_threshold);
            }
        }
    }
}
