//! Command-line configuration for exif-transplant.
//!
//! Options come from:
//! - Command-line arguments via clap
//! - Environment variables with the `EXIF_` prefix
//! - Defaults for everything optional
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use exif_transplant::config::Cli;
//!
//! let cli = Cli::parse();
//! cli.validate()?;
//! ```
//!
//! # Environment Variables
//!
//! - `EXIF_MAX_FILE_SIZE` - Largest file read, in bytes (default: 20000000)
//! - `EXIF_VERBOSE` - Enable debug logging (default: false)

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::io::DEFAULT_MAX_FILE_SIZE;

// =============================================================================
// CLI Arguments
// =============================================================================

/// exif-transplant - Read EXIF metadata from JPEG files and move it between them.
///
/// All operations work on the raw JPEG bytes; image data is never decoded or
/// re-encoded.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-transplant")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Refuse to read files of this many bytes or more.
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MAX_FILE_SIZE,
        env = "EXIF_MAX_FILE_SIZE"
    )]
    pub max_file_size: u64,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false, env = "EXIF_VERBOSE")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Decode and print the EXIF metadata of a JPEG file
    Parse {
        /// JPEG file to read
        path: PathBuf,

        /// Print JSON instead of a field listing
        #[arg(long)]
        json: bool,

        /// Print whatever was decoded even if the parse failed
        #[arg(long)]
        partial: bool,
    },

    /// Print the orientation code (0, 1, 3, 6 or 8) of each file
    Orientation {
        /// JPEG files to read
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Copy the EXIF segment of SOURCE into DEST, rewriting DEST in place
    Copy {
        /// JPEG file providing the EXIF segment
        source: PathBuf,

        /// JPEG file receiving it
        dest: PathBuf,
    },

    /// List the marker segments of a JPEG file
    Markers {
        /// JPEG file to scan
        path: PathBuf,

        /// Do not require an EOI marker at the end of the file
        #[arg(long)]
        relaxed: bool,
    },
}

impl Cli {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_file_size == 0 {
            return Err(
                "max_file_size must be greater than 0. Set --max-file-size or EXIF_MAX_FILE_SIZE"
                    .to_string(),
            );
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
