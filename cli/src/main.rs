//! drawscape CLI - plotter-ready technical drawing tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use drawscape::{
    BlueprintData, ComposeOptions, Composer, JsonFormat, Orientation, PaperProfile, PaperSize,
    PathOptimizer, PlotEstimator, ShippingData, StrokeEstimator,
};

#[derive(Parser)]
#[command(name = "drawscape")]
#[command(author = "drawscape")]
#[command(version)]
#[command(about = "Compose plotter-ready technical drawings as SVG line art", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a blueprint from a JSON record
    Blueprint {
        /// Input JSON file
        #[arg(long, value_name = "FILE")]
        json: PathBuf,

        /// Paper size (overrides the record)
        #[arg(long, value_enum)]
        size: Option<SizeArg>,

        /// Orientation (overrides the record)
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// SVG artwork to inset (overrides the record)
        #[arg(long, value_name = "SVG")]
        inset: Option<PathBuf>,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "blueprint.svg")]
        output: PathBuf,
    },

    /// Compose a project label
    Label {
        /// Input JSON file
        #[arg(long, value_name = "FILE")]
        json: PathBuf,

        /// Finished drawing to estimate plot time from
        #[arg(long, value_name = "DRAWING")]
        svg: Option<PathBuf>,

        /// Label date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "label.svg")]
        output: PathBuf,
    },

    /// Compose a shipping label
    Shipping {
        /// Input JSON file
        #[arg(long, value_name = "FILE")]
        json: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "shipping_label.svg")]
        output: PathBuf,
    },

    /// Compose an empty bordered page
    Template {
        /// Paper size
        #[arg(long, value_enum, default_value = "a4")]
        size: SizeArg,

        /// Orientation
        #[arg(long, value_enum, default_value = "portrait")]
        orientation: OrientationArg,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "template.svg")]
        output: PathBuf,
    },

    /// Show the size and extent of an SVG file
    Details {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Convert a pixel-based SVG to millimetres
    Convert {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Split an SVG into upper and lower halves
    Split {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Optimize pen paths with vpype
    Optimize {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target paper size
        #[arg(long, value_enum, default_value = "tabloid")]
        size: SizeArg,

        /// vpype executable
        #[arg(long, value_name = "PATH", env = "DRAWSCAPE_VPYPE", default_value = "vpype")]
        vpype: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SizeArg {
    /// 297 x 420 mm
    A3,
    /// 210 x 297 mm
    A4,
    /// 8.5 x 11 in
    Letter,
    /// 11 x 17 in
    Tabloid,
}

impl From<SizeArg> for PaperSize {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::A3 => PaperSize::A3,
            SizeArg::A4 => PaperSize::A4,
            SizeArg::Letter => PaperSize::Letter,
            SizeArg::Tabloid => PaperSize::Tabloid,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<OrientationArg> for Orientation {
    fn from(orientation: OrientationArg) -> Self {
        match orientation {
            OrientationArg::Portrait => Orientation::Portrait,
            OrientationArg::Landscape => Orientation::Landscape,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Blueprint {
            json,
            size,
            orientation,
            inset,
            output,
        }) => cmd_blueprint(&json, size, orientation, inset, &output),
        Some(Commands::Label {
            json,
            svg,
            date,
            output,
        }) => cmd_label(&json, svg.as_deref(), date, &output),
        Some(Commands::Shipping { json, output }) => cmd_shipping(&json, &output),
        Some(Commands::Template {
            size,
            orientation,
            output,
        }) => cmd_template(size, orientation, &output),
        Some(Commands::Details { input, json }) => cmd_details(&input, json),
        Some(Commands::Convert { input }) => cmd_convert(&input),
        Some(Commands::Split { input }) => cmd_split(&input),
        Some(Commands::Optimize {
            input,
            size,
            vpype,
        }) => cmd_optimize(&input, size, vpype),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: drawscape <COMMAND>".yellow());
            println!("       drawscape --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn save(path: &Path, svg: &str) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(path, svg)?;
    println!("{} {}", "Saved to".green(), path.display());
    Ok(())
}

fn cmd_blueprint(
    json: &Path,
    size: Option<SizeArg>,
    orientation: Option<OrientationArg>,
    inset: Option<PathBuf>,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = BlueprintData::from_file(json)?;

    let mut options = ComposeOptions::new();
    if let Some(size) = size {
        options = options.with_paper_size(size.into());
    }
    if let Some(orientation) = orientation {
        options = options.with_orientation(orientation.into());
    }
    if let Some(inset) = inset {
        options = options.with_inset(inset);
    }

    let drawing = Composer::futural().compose(&data, &options)?;
    save(output, &drawing.to_svg())
}

fn cmd_label(
    json: &Path,
    svg: Option<&Path>,
    date: Option<NaiveDate>,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = BlueprintData::from_file(json)?;
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

    let estimate = match svg {
        Some(path) => match StrokeEstimator::new().estimate_file(path) {
            Ok(estimate) => {
                println!(
                    "{}: {} / {}",
                    "Plot estimate".bold(),
                    estimate.draw_time(),
                    estimate.pen_travel()
                );
                Some(estimate)
            }
            Err(e) => {
                log::warn!("Plot estimate unavailable, omitting it from the label: {}", e);
                None
            }
        },
        None => None,
    };

    let rows = drawscape::layout::label_rows(date, &data, estimate.as_ref());
    let drawing = Composer::futural().compose_label(&rows);
    save(output, &drawing.to_svg())
}

fn cmd_shipping(json: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let data = ShippingData::from_file(json)?;
    let drawing = Composer::futural().compose_shipping(&data);
    save(output, &drawing.to_svg())
}

fn cmd_template(
    size: SizeArg,
    orientation: OrientationArg,
    output: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let paper = PaperProfile::new(size.into(), orientation.into());
    let drawing = Composer::futural().compose_template(&paper);
    save(output, &drawing.to_svg())
}

fn cmd_details(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let details = drawscape::svg::inspect_file(input)?;

    if json {
        println!("{}", details.to_json(JsonFormat::Pretty)?);
        return Ok(());
    }

    println!("{}", "SVG Details".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} mm", "Width".bold(), details.width);
    println!("{}: {} mm", "Height".bold(), details.height);
    println!(
        "{}: {}",
        "ViewBox".bold(),
        details.view_box.as_deref().unwrap_or("none")
    );
    match details.bounding_box {
        Some(b) => println!(
            "{}: ({}, {}) - ({}, {})",
            "Bounding box".bold(),
            b.min_x,
            b.min_y,
            b.max_x,
            b.max_y
        ),
        None => println!("{}: none", "Bounding box".bold()),
    }

    Ok(())
}

fn cmd_convert(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let output = drawscape::svg::convert_file(input)?;
    println!("{} {}", "Converted to".green(), output.display());
    Ok(())
}

fn cmd_split(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (upper, lower) = drawscape::svg::split_file(input)?;

    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}", "├─".dimmed(), upper.display());
    println!("  {} {}", "└─".dimmed(), lower.display());

    Ok(())
}

fn cmd_optimize(input: &Path, size: SizeArg, vpype: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let optimizer = PathOptimizer::new()
        .with_program(vpype)
        .with_paper(size.into());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Optimizing paths with vpype...");

    let result = optimizer.run(input);
    match &result {
        Ok(_) => pb.finish_with_message("Done!"),
        Err(_) => pb.abandon_with_message("Failed"),
    }

    let output = result?;
    println!("{} {}", "Saved to".green(), output.display());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "drawscape".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Plotter-ready technical drawing tool");
    println!();
    println!("Repository: {}", "https://github.com/drawscape/drawscape".dimmed());
    println!("License: MIT");
}
