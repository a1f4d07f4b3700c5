use std::io::Read;
use std::path::{Path, PathBuf};

use keebgen_core::Point;
use keebgen_kle::RotationPolicy;
use keebgen_layout::{BoardConfig, HullSource, Interpreter};
use keebgen_outline::convex_hull;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CliError;

pub struct InterpretArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub unit: Option<f64>,
    pub hull: HullSource,
    pub strict: bool,
    pub pretty: bool,
}

pub fn run_interpret(args: InterpretArgs) -> Result<(), CliError> {
    let raw = read_input(&args.input)?;

    let mut config = match &args.config {
        Some(path) => {
            let yaml = read_input(path)?;
            BoardConfig::from_yaml_str(&yaml).map_err(|e| {
                CliError::input(format!("Invalid config {}: {e}", path.display()))
            })?
        }
        None => BoardConfig::default(),
    };
    if let Some(unit) = args.unit {
        config = config.with_key_unit(unit);
    }
    debug!(?config, "board config");

    let policy = if args.strict {
        RotationPolicy::Strict
    } else {
        RotationPolicy::Lenient
    };
    let model = Interpreter::new(config)
        .with_rotation_policy(policy)
        .with_hull(args.hull)
        .interpret_str(&raw)
        .map_err(|e| CliError::input(format!("{}: {e}", args.input.display())))?;

    info!(
        keys = model.keys.len(),
        hull_vertices = model.hull.as_ref().map_or(0, |h| h.vertices().len()),
        "Interpreted {}",
        args.input.display()
    );

    write_output(args.output.as_deref(), &to_json(&model, args.pretty)?)
}

pub fn run_hull(input: &Path, output: Option<&Path>, pretty: bool) -> Result<(), CliError> {
    let raw = read_input(input)?;
    let pairs: Vec<[f64; 2]> = serde_json::from_str(&raw).map_err(|e| {
        CliError::input(format!(
            "{}: expected a JSON array of [x, y] pairs: {e}",
            input.display()
        ))
    })?;

    let points: Vec<Point> = pairs.into_iter().map(Point::from_xy).collect();
    let hull = convex_hull(&points);
    info!(
        points = points.len(),
        hull_vertices = hull.vertices().len(),
        "Computed hull"
    );

    let out: Vec<[f64; 2]> = hull.points().iter().map(|p| p.to_xy()).collect();
    write_output(output, &to_json(&out, pretty)?)
}

/// Read a file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::input(format!("Could not read stdin: {e}")))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
        .map_err(|e| CliError::input(format!("Could not read {}: {e}", path.display())))
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(|e| CliError::processing(e.to_string()))
}

fn write_output(output: Option<&Path>, json: &str) -> Result<(), CliError> {
    let Some(path) = output else {
        println!("{json}");
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CliError::processing(e.to_string()))?;
    }
    std::fs::write(path, format!("{json}\n")).map_err(|e| {
        CliError::processing(format!("Could not write {}: {e}", path.display()))
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}
