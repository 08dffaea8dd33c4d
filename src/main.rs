use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use fieldfence::api::BackendClient;
use fieldfence::config::FileConfig;
use fieldfence::domain::{GeoPoint, Plantation, PlantationDraft};
use fieldfence::editor::BoundaryEditor;
use fieldfence::geometry::measure_ring;
use fieldfence::gesture::{Gesture, parse_gestures, parse_point_arg};
use fieldfence::render::{EditorSession, GeoJsonSurface};

/// Edit a plantation boundary from placed pins
///
/// Examples:
///   # Sketch a new boundary and export it
///   fieldfence -p=-22.901,-47.062 -p=-22.901,-47.058 -p=-22.905,-47.058 -o field.geojson
///
///   # Load plantation 42, replay a gesture script and save it back
///   fieldfence --load 42 --gestures edits.txt --save
///
///   # Create a new plantation from a script
///   fieldfence --gestures corners.txt --save --name "Talhao Norte" --crop Cafe
#[derive(Parser, Debug)]
#[command(name = "fieldfence")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches fieldfence.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Load an existing plantation from the backend by id
    #[arg(long, conflicts_with = "input")]
    load: Option<String>,

    /// Load an existing plantation from a JSON file
    #[arg(long)]
    input: Option<PathBuf>,

    /// Place a pin at LAT,LON (repeatable, applied after --gestures)
    #[arg(short = 'p', long = "point", value_parser = parse_point_arg, allow_hyphen_values = true)]
    points: Vec<GeoPoint>,

    /// Gesture script with add/remove/clear lines
    #[arg(long)]
    gestures: Option<PathBuf>,

    /// Write the rendered boundary to this GeoJSON file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Save the boundary to the backend (update if loaded, create otherwise)
    #[arg(long)]
    save: bool,

    /// Plantation name for --save (defaults to the loaded name)
    #[arg(long)]
    name: Option<String>,

    /// Crop type for --save (defaults to the loaded crop type)
    #[arg(long)]
    crop: Option<String>,

    /// Centroid-duplicate distance in degrees
    #[arg(long)]
    threshold: Option<f64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let (file_config, config_errors) = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            let config: FileConfig =
                toml::from_str(&contents).context("Failed to parse config file")?;
            (config, Vec::new())
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        let lookup = FileConfig::load();
        (lookup.config.unwrap_or_default(), lookup.errors)
    };

    let verbose = args.verbose || file_config.verbose;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .init();
    for error in &config_errors {
        log::warn!("{}", error);
    }

    let threshold = args
        .threshold
        .unwrap_or(file_config.editor.centroid_threshold_deg);
    if !threshold.is_finite() || threshold < 0.0 {
        bail!("Threshold must be a non-negative number, got {}", threshold);
    }
    let output = args.output.clone().or_else(|| file_config.output.clone());

    let gestures = match args.gestures {
        Some(ref path) => {
            let script = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read gesture script: {}", path.display()))?;
            parse_gestures(&script)
                .with_context(|| format!("Invalid gesture script: {}", path.display()))?
        }
        None => Vec::new(),
    };

    if args.load.is_none() && args.input.is_none() && gestures.is_empty() && args.points.is_empty()
    {
        bail!("Nothing to edit: provide --load, --input, --gestures or --point");
    }

    println!("fieldfence - Plantation Boundary Editor");
    println!("=======================================");
    println!();

    let backend = if args.load.is_some() || args.save {
        Some(BackendClient::new(file_config.backend.clone())?)
    } else {
        None
    };

    let loaded: Option<Plantation> = if let Some(ref id) = args.load {
        let client = backend
            .as_ref()
            .context("Backend client not configured")?;
        let spinner = create_spinner(&format!("Fetching plantation {}...", id));
        let start = Instant::now();
        let plantation = client
            .fetch_plantation(id)
            .with_context(|| format!("Failed to fetch plantation {}", id))?;
        spinner.finish_with_message(format!(
            "Fetched {:?} ({}) [{:.1}s]",
            plantation.name,
            plantation.crop_type,
            start.elapsed().as_secs_f32()
        ));
        Some(plantation)
    } else if let Some(ref path) = args.input {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plantation file: {}", path.display()))?;
        let plantation: Plantation = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse plantation file: {}", path.display()))?;
        Some(plantation)
    } else {
        None
    };

    let editor = match loaded {
        Some(ref plantation) => {
            let points = plantation.boundary_points();
            let editor = BoundaryEditor::from_points(&points, threshold);
            println!(
                "Loaded {} stored point(s), {} kept after pruning",
                points.len(),
                editor.len()
            );
            editor
        }
        None => BoundaryEditor::with_threshold(threshold),
    };

    let mut session = EditorSession::open(GeoJsonSurface::new(), editor);

    let all_gestures = gestures
        .into_iter()
        .chain(args.points.iter().copied().map(Gesture::Add));
    for gesture in all_gestures {
        let effect = gesture.apply(&mut session);
        if verbose {
            println!("  {}", effect);
        }
    }

    print_summary(session.editor());

    if let Some(ref path) = output {
        session
            .surface()
            .write(path)
            .context("Failed to write GeoJSON file")?;
        println!(
            "Wrote {} layer(s) to {}",
            session.surface().layer_count(),
            path.display()
        );
    }

    if args.save {
        let client = backend
            .as_ref()
            .context("Backend client not configured")?;
        let name = args
            .name
            .clone()
            .or_else(|| loaded.as_ref().map(|p| p.name.clone()))
            .unwrap_or_default();
        let crop = args
            .crop
            .clone()
            .or_else(|| loaded.as_ref().map(|p| p.crop_type.clone()))
            .unwrap_or_default();
        let (pontosx, pontosy) = session.editor().parallel_arrays();
        let draft = PlantationDraft::new(&name, &crop, pontosx, pontosy)
            .context("Cannot save plantation")?;

        let spinner = create_spinner("Saving plantation...");
        let start = Instant::now();
        let existing_id = loaded.as_ref().and_then(Plantation::id_string);
        let saved = match existing_id {
            Some(ref id) => client
                .update_plantation(id, &draft)
                .with_context(|| format!("Failed to update plantation {}", id))?,
            None => client
                .create_plantation(&draft)
                .context("Failed to create plantation")?,
        };
        spinner.finish_with_message(format!(
            "Saved {:?} with {} point(s) [{:.1}s]",
            saved.name,
            draft.pontosx.len(),
            start.elapsed().as_secs_f32()
        ));
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn print_summary(editor: &BoundaryEditor) {
    println!();
    println!("Pins ({}):", editor.len());
    for pin in editor.pins() {
        println!(
            "  #{:<3} {:>12.6} {:>12.6}",
            pin.number, pin.point.lat, pin.point.lon
        );
    }

    if !editor.has_polygon() {
        println!();
        println!("No polygon yet: place at least 3 non-collinear pins.");
        return;
    }

    println!();
    println!("Boundary ({} vertices, counter-clockwise):", editor.hull().len());
    for vertex in editor.hull() {
        println!("  {:>12.6} {:>12.6}", vertex.lat, vertex.lon);
    }

    if let Some(measure) = measure_ring(editor.hull()) {
        println!();
        println!(
            "Area: {:.2} ha ({:.0} m²), perimeter: {:.0} m",
            measure.hectares(),
            measure.area_m2,
            measure.perimeter_m
        );
    }
    println!();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
