//! CLI application for body measurement and garment fit.
//!
//! Usage:
//!   body-fit measure <pose.json> --height 175            # Human-readable output
//!   body-fit measure <pose.json> --height 175 --json     # JSON output
//!   body-fit fit <joints.json> --chart chart.json --size M --fit-type slim

use body_fit::{
    calculate_body_ratios, estimate_with_min_confidence, fit_cloth, load_size_chart,
    logging::init_logger, BodyEstimate, BodyRatios, Config, FitResult, FitType, JointLabel,
    Measurement, PoseFrame, TorsoJoints,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "body-fit")]
#[command(author, version, about = "Body measurements and garment fit from pose landmarks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate body measurements and size from a detected pose
    Measure(MeasureArgs),
    /// Compute body ratios and garment fit scales from torso joints
    Fit(FitArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Config file overriding the default constants (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct MeasureArgs {
    /// Pose detector output: {"image": {...}, "landmarks": [...]}
    #[arg(required = true)]
    pose: PathBuf,

    /// Real height of the subject in centimeters
    #[arg(long)]
    height: f64,

    /// Minimum fraction of visible landmarks (default: from config)
    #[arg(long)]
    min_confidence: Option<f64>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug)]
struct FitArgs {
    /// Torso joints: {"NECK": {"x": .., "y": ..}, ...}
    #[arg(required = true)]
    joints: PathBuf,

    /// Size chart: {"M": {"chest": .., "waist": ..}, ...}
    #[arg(long)]
    chart: PathBuf,

    /// Size label to fit
    #[arg(long)]
    size: String,

    /// slim, regular or baggy; anything else means regular
    #[arg(long, default_value = "regular")]
    fit_type: String,

    #[command(flatten)]
    common: CommonArgs,
}

/// Output structure for `measure`
#[derive(Serialize)]
struct MeasureOutput {
    pose: String,
    image_width: u32,
    image_height: u32,
    #[serde(flatten)]
    estimate: BodyEstimate,
    /// Joint pixel positions for overlay drawing
    joints: Vec<JointOutput>,
}

#[derive(Serialize)]
struct JointOutput {
    label: JointLabel,
    x: f64,
    y: f64,
    visibility: f64,
}

/// Output structure for `fit`
#[derive(Serialize)]
struct FitOutput {
    size: String,
    fit_type: FitType,
    ratios: BodyRatios,
    fit: FitResult,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Measure(args) => measure(args),
        Command::Fit(args) => fit(args),
    }
}

fn load_config(common: &CommonArgs) -> Result<Config, Box<dyn std::error::Error>> {
    init_logger(common.verbose);

    match &common.config {
        Some(path) => {
            log::debug!("Loading config from {:?}...", path);
            Ok(Config::load(path)?)
        }
        None => Ok(Config::default()),
    }
}

fn measure(args: &MeasureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&args.common)?;

    log::debug!("Loading pose {:?}...", args.pose);
    let frame: PoseFrame = serde_json::from_str(&std::fs::read_to_string(&args.pose)?)?;
    log::debug!("Pose has {} landmarks", frame.len());

    let min_confidence = args
        .min_confidence
        .unwrap_or(config.validation.min_confidence);
    let estimate = estimate_with_min_confidence(&frame, args.height, &config, min_confidence)?;

    let joints = frame
        .pixel_positions()
        .into_iter()
        .zip(frame.joints())
        .map(|((label, p), joint)| JointOutput {
            label,
            x: p.x,
            y: p.y,
            visibility: joint.visibility,
        })
        .collect();

    let output = MeasureOutput {
        pose: args.pose.display().to_string(),
        image_width: frame.image().width,
        image_height: frame.image().height,
        estimate,
        joints,
    };

    let output_str = if args.common.json {
        serde_json::to_string_pretty(&output)?
    } else {
        format_measurements(&output)
    };

    write_output(&args.common, &output_str)
}

fn fit(args: &FitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&args.common)?;

    log::debug!("Loading joints {:?}...", args.joints);
    let joints: TorsoJoints = serde_json::from_str(&std::fs::read_to_string(&args.joints)?)?;

    log::debug!("Loading size chart {:?}...", args.chart);
    let chart = load_size_chart(&args.chart)?;

    let ratios = calculate_body_ratios(&joints)?;
    let fit = fit_cloth(&ratios, &chart, &args.size, &args.fit_type, &config.ease)?;

    let output = FitOutput {
        size: args.size.clone(),
        fit_type: FitType::resolve(&args.fit_type),
        ratios,
        fit,
    };

    let output_str = if args.common.json {
        serde_json::to_string_pretty(&output)?
    } else {
        format_fit(&output)
    };

    write_output(&args.common, &output_str)
}

fn write_output(common: &CommonArgs, output_str: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(ref path) = common.output {
        std::fs::write(path, output_str)?;
        log::debug!("Output written to {:?}", path);
    } else {
        println!("{}", output_str);
    }
    Ok(())
}

fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn format_measurements(output: &MeasureOutput) -> String {
    let estimate = &output.estimate;
    let mut s = String::new();

    s.push_str(&format!(
        "Pose: {} ({}x{})\n",
        display_name(&output.pose),
        output.image_width,
        output.image_height
    ));
    s.push_str(&format!(
        "Coverage: {} body, {:.0}% of landmarks visible\n",
        estimate.assessment.coverage,
        estimate.assessment.confidence * 100.0
    ));
    s.push_str(&format!("Scale: {:.4} cm/px\n", estimate.scale.cm_per_px()));

    s.push_str("\nBody Measurements (cm):\n");
    for measurement in Measurement::ALL {
        let label = title_case(measurement.name());
        match estimate.measurements.get(measurement) {
            Some(value) => s.push_str(&format!("  {:<18} {:>7.2}\n", label, value)),
            None => s.push_str(&format!("  {:<18} {:>7}\n", label, "n/a")),
        }
    }

    s.push_str(&format!("\nRecommended size: {}\n", estimate.size));

    if !estimate.warnings.is_empty() {
        s.push_str("\nWarnings:\n");
        for warning in &estimate.warnings {
            s.push_str(&format!("  {}\n", warning));
        }
    }

    s
}

fn format_fit(output: &FitOutput) -> String {
    let mut s = String::new();

    s.push_str(&format!(
        "Size: {} ({:?} fit)\n",
        output.size, output.fit_type
    ));

    s.push_str("\nBody Ratios:\n");
    for (name, value) in output.ratios.entries() {
        s.push_str(&format!("  {:<22} {:.3}\n", title_case(name), value));
    }

    s.push_str("\nFit Scales:\n");
    s.push_str(&format!("  Chest: {:.2}\n", output.fit.chest_scale));
    s.push_str(&format!("  Waist: {:.2}\n", output.fit.waist_scale));

    s
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
