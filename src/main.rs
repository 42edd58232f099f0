//! exif-transplant - Read EXIF metadata from JPEG files and move it between them.
//!
//! This binary dispatches the CLI subcommands to the library.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_transplant::{
    config::{Cli, Command},
    decode_exif_file,
    io::read_bounded,
    read_orientation_with_limit, scan_markers, try_copy_exif_with_limit, ExifInfo, ScanMode,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = cli.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let limit = cli.max_file_size;
    match cli.command {
        Command::Parse {
            path,
            json,
            partial,
        } => run_parse(&path, limit, json, partial),
        Command::Orientation { paths } => run_orientation(&paths, limit),
        Command::Copy { source, dest } => run_copy(&source, &dest, limit),
        Command::Markers { path, relaxed } => run_markers(&path, limit, relaxed),
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_transplant=debug"
    } else {
        "exif_transplant=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Parse Command
// =============================================================================

fn run_parse(path: &Path, limit: u64, json: bool, partial: bool) -> ExitCode {
    let report = decode_exif_file(path, limit);

    if let Err(ref e) = report.outcome {
        error!("{}: {}", path.display(), e);
        if !partial {
            return ExitCode::FAILURE;
        }
    }

    if json {
        match serde_json::to_string_pretty(&report.info) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("Failed to serialize metadata: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_info(&report.info);
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Print every populated field, one per line.
fn print_info(info: &ExifInfo) {
    fn text(label: &str, value: &str) {
        if !value.is_empty() {
            println!("{:<22} {}", label, value);
        }
    }
    fn number(label: &str, value: f64, unit: &str) {
        if value != 0.0 {
            println!("{:<22} {}{}", label, value, unit);
        }
    }
    fn integer(label: &str, value: u32) {
        if value != 0 {
            println!("{:<22} {}", label, value);
        }
    }

    if let Some(order) = info.byte_order {
        println!("{:<22} {:?}", "Byte order", order);
    }
    text("Description", &info.image_description);
    text("Make", &info.make);
    text("Model", &info.model);
    text("Software", &info.software);
    text("Copyright", &info.copyright);
    text("Date/time", &info.date_time);
    text("Original date/time", &info.date_time_original);
    text("Digitized date/time", &info.date_time_digitized);
    text("Sub-second time", &info.sub_sec_time_original);
    println!(
        "{:<22} {} ({:?}, rotate {} degrees)",
        "Orientation",
        info.orientation.as_u16(),
        info.orientation,
        info.orientation.rotation_degrees()
    );
    integer("Bits per sample", info.bits_per_sample.into());
    integer("Image width", info.image_width);
    integer("Image height", info.image_height);
    number("Exposure time", info.exposure_time, " s");
    number("F-number", info.f_number, "");
    integer("ISO", info.iso_speed_ratings.into());
    number("Shutter speed", info.shutter_speed_value, "");
    number("Exposure bias", info.exposure_bias_value, " EV");
    number("Subject distance", info.subject_distance, " m");
    number("Focal length", info.focal_length, " mm");
    integer("35mm focal length", info.focal_length_in_35mm.into());
    integer("Metering mode", info.metering_mode.into());
    println!("{:<22} {}", "Flash", if info.flash { "fired" } else { "no" });

    let gps = &info.geo_location;
    if gps.valid {
        println!("{:<22} {:.6}", "Latitude", gps.latitude);
        println!("{:<22} {:.6}", "Longitude", gps.longitude);
        println!("{:<22} {} m", "Altitude", gps.altitude);
    }
}

// =============================================================================
// Orientation Command
// =============================================================================

fn run_orientation(paths: &[std::path::PathBuf], limit: u64) -> ExitCode {
    for path in paths {
        let orientation = read_orientation_with_limit(path, limit);
        println!("{}\t{}", orientation.as_u16(), path.display());
    }
    ExitCode::SUCCESS
}

// =============================================================================
// Copy Command
// =============================================================================

fn run_copy(source: &Path, dest: &Path, limit: u64) -> ExitCode {
    match try_copy_exif_with_limit(source, dest, limit) {
        Ok(()) => {
            info!("Copied EXIF from {} to {}", source.display(), dest.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(
                "Failed to copy EXIF from {} to {}: {}",
                source.display(),
                dest.display(),
                e
            );
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Markers Command
// =============================================================================

fn run_markers(path: &Path, limit: u64, relaxed: bool) -> ExitCode {
    let buf = match read_bounded(path, limit) {
        Ok(buf) => buf,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mode = if relaxed {
        ScanMode::Relaxed
    } else {
        ScanMode::Strict
    };

    let scan = match scan_markers(&buf, mode) {
        Ok(scan) => scan,
        Err(e) => {
            error!("{}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    println!("{:>10}  {:>8}  MARKER", "OFFSET", "SIZE");
    for segment in &scan.segments {
        println!(
            "{:>10}  {:>8}  {:02X}{:02X} {}",
            segment.offset, segment.size, segment.signature, segment.marker, segment.name
        );
    }
    match scan.exif {
        Some(range) => println!("EXIF segment: bytes {}..{}", range.start, range.end),
        None => println!("EXIF segment: none"),
    }

    ExitCode::SUCCESS
}
