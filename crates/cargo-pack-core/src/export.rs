//! Writers for the four `ui_input/*.txt` dumps and `write_pdf_1.txt`,
//! reproducing the textual-dump formats and the renderer's Y/Z axis swap.

use crate::error::Result;
use crate::model::{BoxGroup, PackResult, Truck};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tracing::instrument;

/// Fixed 10-entry palette, indexed directly by destination code (`code - 1`),
/// wrapping past 10 destinations.
pub const PALETTE: [&str; 10] = [
    "#bada55", "#7fe5f0", "#ff0000", "#ff80ed", "#696969", "#133337", "#065535", "#5ac18e",
    "#f7347a", "#ffd700",
];

fn color_for_destination(destination_code: u32) -> &'static str {
    let idx = destination_code.saturating_sub(1) as usize;
    PALETTE[idx % PALETTE.len()]
}

/// Writes `truck_to_js.txt`: truck name -> list of
/// `[[L,H,W], [x0,z0,y0], color_hex, box_id, weight, destination_code]`
/// records. Note the L/H/W and x/z/y axis reordering, a renderer contract.
fn write_truck_to_js(w: &mut impl Write, result: &PackResult, groups: &[BoxGroup]) -> Result<()> {
    writeln!(w, "{{")?;
    for (truck_name, truck_result) in &result.per_truck {
        writeln!(w, "  \"{}\": [", truck_name)?;
        for p in &truck_result.placed {
            let dims = p.dims();
            let origin = p.corners[0];
            writeln!(
                w,
                "    [[{}, {}, {}], [{}, {}, {}], \"{}\", \"{}\", {}, {}],",
                dims.length,
                dims.height,
                dims.width,
                origin.x,
                origin.z,
                origin.y,
                color_for_destination(p.destination_code),
                groups[p.type_index].box_id,
                p.weight,
                p.destination_code,
            )?;
        }
        writeln!(w, "  ],")?;
    }
    writeln!(w, "}}")?;
    Ok(())
}

/// Writes `dest_colors.txt`: destination_code -> [color_hex, destination_name].
fn write_dest_colors(
    w: &mut impl Write,
    dest_to_dict: &BTreeMap<String, u32>,
    dest_order: &[u32],
) -> Result<()> {
    let code_to_name: BTreeMap<u32, &str> = dest_to_dict
        .iter()
        .map(|(name, code)| (*code, name.as_str()))
        .collect();
    writeln!(w, "{{")?;
    for code in dest_order {
        let name = code_to_name.get(code).copied().unwrap_or("?");
        writeln!(
            w,
            "  {}: [\"{}\", \"{}\"],",
            code,
            color_for_destination(*code),
            name
        )?;
    }
    writeln!(w, "}}")?;
    Ok(())
}

/// Writes `truck_size.txt`: three lines — truck size mapping, initial
/// unpacked count, residual-volume summary of the last truck.
fn write_truck_size(
    w: &mut impl Write,
    trucks: &[Truck],
    initial_unpacked_count: usize,
    result: &PackResult,
) -> Result<()> {
    write!(w, "{{")?;
    for (i, t) in trucks.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write!(
            w,
            "\"{}\": [{}, {}, {}]",
            t.name, t.dims.length, t.dims.width, t.dims.height
        )?;
    }
    writeln!(w, "}}")?;
    writeln!(w, "{}", initial_unpacked_count)?;
    let last_residual = result
        .per_truck
        .last()
        .map(|(_, t)| t.residual_volume_m3)
        .unwrap_or(0.0);
    writeln!(w, "{:.6}", last_residual)?;
    Ok(())
}

/// Writes `unpacked.txt`: one Box ID per line.
fn write_unpacked(w: &mut impl Write, result: &PackResult) -> Result<()> {
    for id in &result.unpacked_box_ids {
        writeln!(w, "{}", id)?;
    }
    Ok(())
}

/// Writes `write_pdf_1.txt`: two lines — boxes-per-destination map and the
/// inverse destination (code -> name) map.
fn write_pdf_1(
    w: &mut impl Write,
    result: &PackResult,
    dest_to_dict: &BTreeMap<String, u32>,
) -> Result<()> {
    let mut per_dest: BTreeMap<u32, u32> = BTreeMap::new();
    for (_, truck_result) in &result.per_truck {
        for p in &truck_result.placed {
            *per_dest.entry(p.destination_code).or_insert(0) += 1;
        }
    }
    write!(w, "{{")?;
    for (i, (code, count)) in per_dest.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write!(w, "{}: {}", code, count)?;
    }
    writeln!(w, "}}")?;

    let code_to_name: BTreeMap<u32, &str> = dest_to_dict
        .iter()
        .map(|(name, code)| (*code, name.as_str()))
        .collect();
    write!(w, "{{")?;
    for (i, (code, name)) in code_to_name.iter().enumerate() {
        if i > 0 {
            write!(w, ", ")?;
        }
        write!(w, "{}: \"{}\"", code, name)?;
    }
    writeln!(w, "}}")?;
    Ok(())
}

/// Writes all five text dumps into `dir`, creating it if necessary.
#[instrument(skip(trucks, groups, dest_to_dict, result))]
pub fn write_ui_input(
    dir: &Path,
    trucks: &[Truck],
    groups: &[BoxGroup],
    dest_to_dict: &BTreeMap<String, u32>,
    result: &PackResult,
    initial_unpacked_count: usize,
) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    // Destination codes in descending (loaded-first) order, for listing in
    // dest_colors.txt. Color is keyed by destination code directly, not by
    // this order.
    let mut dest_order: Vec<u32> = dest_to_dict.values().copied().collect();
    dest_order.sort_unstable_by(|a, b| b.cmp(a));
    dest_order.dedup();

    let mut f = std::fs::File::create(dir.join("truck_to_js.txt"))?;
    write_truck_to_js(&mut f, result, groups)?;

    let mut f = std::fs::File::create(dir.join("dest_colors.txt"))?;
    write_dest_colors(&mut f, dest_to_dict, &dest_order)?;

    let mut f = std::fs::File::create(dir.join("truck_size.txt"))?;
    write_truck_size(&mut f, trucks, initial_unpacked_count, result)?;

    let mut f = std::fs::File::create(dir.join("unpacked.txt"))?;
    write_unpacked(&mut f, result)?;

    let mut f = std::fs::File::create(dir.join("write_pdf_1.txt"))?;
    write_pdf_1(&mut f, result, dest_to_dict)?;

    Ok(())
}
