use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use cargo_pack_core::config::LoadPattern;
use cargo_pack_core::model::{BoxSpec, Stackability, Truck};
use cargo_pack_core::{export, pack_cargo, PackerConfig};
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "cargo-pack",
    about = "Pack cargo boxes into trucks",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack boxes into trucks and write the ui_input/*.txt dumps
    Pack(PackArgs),
    /// Dry run: compute and print a summary without writing files
    Plan(PackArgs),
    /// Resolve and print the merged packer configuration
    PrintConfig(PrintConfigArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    /// Box table CSV (columns: box_id,length,width,height,quantity,weight,destination,stackable)
    #[arg(help_heading = "Input/Output")]
    boxes: PathBuf,
    /// Trucks/destinations YAML file
    #[arg(help_heading = "Input/Output")]
    trucks: PathBuf,
    /// Output directory for the ui_input/*.txt dumps
    #[arg(short, long, default_value = "ui_input", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Optional packer-config YAML file (overrides the flags below)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,

    /// Minimum base-support percentage required for a placement
    #[arg(long, default_value_t = 100.0, help_heading = "Packing")]
    base_area_threshold: f64,
    /// Load pattern: side | default | back | rear-loading | uniform-dist
    #[arg(long, default_value = "side", help_heading = "Packing")]
    load_pattern: String,
}

#[derive(Parser, Debug, Clone)]
struct PrintConfigArgs {
    /// Optional packer-config YAML file (overrides the flags below)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Minimum base-support percentage required for a placement
    #[arg(long, default_value_t = 100.0)]
    base_area_threshold: f64,
    /// Load pattern: side | default | back | rear-loading | uniform-dist
    #[arg(long, default_value = "side")]
    load_pattern: String,
    /// Output format: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"])]
    format: String,
}

/// The trucks/destinations input file: the counterpart of the box CSV.
#[derive(Debug, Deserialize)]
struct TrucksFile {
    trucks: Vec<TruckEntry>,
    destinations: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct TruckEntry {
    name: String,
    length: u32,
    width: u32,
    height: u32,
}

/// Raw box-table CSV row, before stackability/destination resolution.
#[derive(Debug, Deserialize)]
struct BoxRow {
    box_id: String,
    length: u32,
    width: u32,
    height: u32,
    quantity: u32,
    weight: f64,
    destination: String,
    stackable: String,
}

/// Mirrors the teacher's `YamlConfig`: file settings merge over (win
/// against) the flag-built defaults when present.
#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    base_area_threshold: Option<f64>,
    load_pattern: Option<String>,
}

impl YamlConfig {
    fn into_packer_config(self, mut cfg: PackerConfig) -> PackerConfig {
        if let Some(v) = self.base_area_threshold {
            cfg.base_area_threshold = v;
        }
        if let Some(v) = self.load_pattern {
            cfg.load_pattern = v.parse().unwrap_or(cfg.load_pattern);
        }
        cfg
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args, true),
        Commands::Plan(args) => run_pack(args, false),
        Commands::PrintConfig(args) => run_print_config(args),
    }
}

fn resolve_config(flag_threshold: f64, flag_pattern: &str, config: &Option<PathBuf>) -> anyhow::Result<PackerConfig> {
    let load_pattern: LoadPattern = flag_pattern
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown load pattern: {}", flag_pattern))?;
    let base = PackerConfig::builder()
        .base_area_threshold(flag_threshold)
        .load_pattern(load_pattern)
        .build();

    let cfg = if let Some(path) = config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        y.into_packer_config(base)
    } else {
        base
    };
    cfg.validate()?;
    Ok(cfg)
}

fn run_print_config(args: &PrintConfigArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(args.base_area_threshold, &args.load_pattern, &args.config)?;
    match args.format.as_str() {
        "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
        _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
    }
    Ok(())
}

fn run_pack(args: &PackArgs, write_files: bool) -> anyhow::Result<()> {
    let cfg = resolve_config(args.base_area_threshold, &args.load_pattern, &args.config)?;

    let specs = read_box_table(&args.boxes)?;
    info!(count = specs.len(), "loaded box table");

    let trucks_file = read_trucks_file(&args.trucks)?;
    let trucks: Vec<Truck> = trucks_file
        .trucks
        .iter()
        .map(|t| Truck::new(t.name.clone(), cargo_pack_core::geometry::Dims3::new(t.length, t.width, t.height)))
        .collect();

    let total_boxes: u32 = specs.iter().map(|s| s.quantity).sum();

    let bar = indicatif::ProgressBar::new_spinner();
    bar.set_message(format!("packing {} trucks", trucks.len()));
    bar.enable_steady_tick(std::time::Duration::from_millis(120));
    let result = pack_cargo(&specs, &trucks, &trucks_file.destinations, &cfg)?;
    bar.finish_and_clear();

    info!(
        total = total_boxes,
        placed = result.total_placed(),
        unpacked = result.unpacked.len(),
        "packing complete"
    );

    if write_files {
        export::write_ui_input(
            &args.out_dir,
            &trucks,
            &group_table(&specs, &trucks_file.destinations, cfg.load_pattern)?,
            &trucks_file.destinations,
            &result,
            total_boxes as usize,
        )
        .with_context(|| format!("write {}", args.out_dir.display()))?;
        info!(dir = %args.out_dir.display(), "wrote ui_input dumps");
    } else {
        println!(
            "total={} placed={} unpacked={}",
            total_boxes,
            result.total_placed(),
            result.unpacked.len()
        );
        for (name, truck_result) in &result.per_truck {
            println!(
                "  {}: placed={} residual_m3={:.3}",
                name,
                truck_result.placed.len(),
                truck_result.residual_volume_m3
            );
        }
        if !result.unpacked_box_ids.is_empty() {
            println!("unpacked box ids: {}", result.unpacked_box_ids.join(", "));
        }
    }

    Ok(())
}

fn group_table(
    specs: &[BoxSpec],
    dest_to_dict: &BTreeMap<String, u32>,
    load_pattern: LoadPattern,
) -> anyhow::Result<Vec<cargo_pack_core::model::BoxGroup>> {
    Ok(cargo_pack_core::normalize::normalize(
        specs,
        dest_to_dict,
        load_pattern,
    )?)
}

fn read_box_table(path: &PathBuf) -> anyhow::Result<Vec<BoxSpec>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open box table {}", path.display()))?;
    let mut specs = Vec::new();
    for row in reader.deserialize() {
        let row: BoxRow = row.with_context(|| format!("parse row in {}", path.display()))?;
        let stackable = Stackability::from_yes_no(&row.stackable)
            .ok_or_else(|| anyhow::anyhow!("invalid stackable value: {}", row.stackable))?;
        specs.push(BoxSpec {
            box_id: row.box_id,
            length: row.length,
            width: row.width,
            height: row.height,
            quantity: row.quantity,
            weight: row.weight,
            destination: row.destination,
            stackable,
        });
    }
    Ok(specs)
}

fn read_trucks_file(path: &PathBuf) -> anyhow::Result<TrucksFile> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read trucks file {}", path.display()))?;
    let parsed: TrucksFile = serde_yaml::from_str(&text)
        .with_context(|| format!("parse trucks file {}", path.display()))?;
    Ok(parsed)
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
