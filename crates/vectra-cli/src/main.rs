//! vectra — headless raster-to-SVG vectorizer
//!
//! Subcommands cover the whole pipeline: `scan` segments an image into a
//! serialized scan, `parse` turns a saved scan into SVG, `process` runs
//! end-to-end, the `write-*` commands render diagnostic rasters from a
//! saved scan, and `reduce` runs the neighborhood pre-pass.
//!
//! Exit codes: 0 on success, 1 on bad arguments, 2 on any other failure.

mod logger;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::warn;

use vectra_core::Raster;
use vectra_io::{read_png_file, write_png_file, IoError};
use vectra_reduce::{ReduceError, Reducer};
use vectra_scan::{PixelScan, ScanError};

const EXIT_BAD_ARGUMENT: u8 = 1;
const EXIT_UNKNOWN: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "vectra",
    about = "Convert raster images into filled SVG vector graphics",
    version
)]
struct Cli {
    /// Print debug-level diagnostics.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Segment an image and write a compressed serialized scan.
    Scan {
        /// Input image path.
        input: PathBuf,
        /// Color similarity threshold in 0-255 space (negative clamps to 0).
        #[arg(allow_negative_numbers = true)]
        threshold: f32,
        /// Output path for the serialized scan.
        #[arg(
            short = 'o',
            long = "output-path",
            visible_alias = "out",
            default_value = "output.sdat"
        )]
        output: PathBuf,
        /// Skip outline tracing.
        #[arg(long = "no-borders", visible_alias = "nb")]
        no_borders: bool,
    },

    /// Read a serialized scan and write it out as SVG.
    Parse {
        /// Input serialized scan path.
        input: PathBuf,
        /// Output path for the SVG document.
        #[arg(
            short = 'o',
            long = "output-path",
            visible_alias = "out",
            default_value = "output.sdat"
        )]
        output: PathBuf,
    },

    /// Convert an image straight to SVG.
    Process {
        /// Input image path.
        input: PathBuf,
        /// Color similarity threshold in 0-255 space (negative clamps to 0).
        #[arg(allow_negative_numbers = true)]
        threshold: f32,
        /// Output path for the SVG document.
        #[arg(
            short = 'o',
            long = "output-path",
            visible_alias = "out",
            default_value = "output.svg"
        )]
        output: PathBuf,
        /// Also write the serialized scan to this path.
        #[arg(long = "shape-path", visible_alias = "sb")]
        shape_path: Option<PathBuf>,
    },

    /// Render every shape outline from a saved scan into a PNG.
    WriteBorders {
        /// Input serialized scan path.
        input: PathBuf,
        /// Output PNG path.
        #[arg(
            short = 'o',
            long = "output-path",
            visible_alias = "out",
            default_value = "borders.png"
        )]
        output: PathBuf,
    },

    /// Render one shape's outline from a saved scan into a PNG.
    WriteBorder {
        /// Input serialized scan path.
        input: PathBuf,
        /// Shape index.
        index: usize,
        /// Output PNG path (default: "border N.png").
        #[arg(short = 'o', long = "output-path", visible_alias = "out")]
        output: Option<PathBuf>,
    },

    /// Render every filled shape from a saved scan into a PNG.
    WriteShapes {
        /// Input serialized scan path.
        input: PathBuf,
        /// Output PNG path.
        #[arg(
            short = 'o',
            long = "output-path",
            visible_alias = "out",
            default_value = "shapes.png"
        )]
        output: PathBuf,
    },

    /// Render one filled shape from a saved scan into a PNG.
    WriteShape {
        /// Input serialized scan path.
        input: PathBuf,
        /// Shape index.
        index: usize,
        /// Output PNG path (default: "shape N.png").
        #[arg(short = 'o', long = "output-path", visible_alias = "out")]
        output: Option<PathBuf>,
    },

    /// Smooth an image with the neighborhood reducer.
    Reduce {
        /// Input image path.
        input: PathBuf,
        /// Window half-side length (must be at least 1).
        reach: usize,
        /// Average-difference threshold for the popularity vote.
        #[arg(allow_negative_numbers = true)]
        threshold: f32,
        /// Output PNG path.
        #[arg(
            short = 'o',
            long = "output-path",
            visible_alias = "out",
            default_value = "reduced.png"
        )]
        output: PathBuf,
    },
}

/// A failure with an already-decided exit code.
enum AppError {
    BadArgument(String),
    Failure(Box<dyn std::error::Error>),
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        AppError::Failure(Box::new(err))
    }
}

impl From<IoError> for AppError {
    fn from(err: IoError) -> Self {
        AppError::Failure(Box::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Failure(Box::new(err))
    }
}

impl From<ReduceError> for AppError {
    fn from(err: ReduceError) -> Self {
        match err {
            ReduceError::InvalidParameter(message) => AppError::BadArgument(message),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let is_usage_error = err.use_stderr();
            let _ = err.print();
            return if is_usage_error {
                ExitCode::from(EXIT_BAD_ARGUMENT)
            } else {
                // --help and --version land here.
                ExitCode::SUCCESS
            };
        }
    };

    logger::init(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::BadArgument(message)) => {
            eprintln!("vectra: invalid argument: {message}");
            ExitCode::from(EXIT_BAD_ARGUMENT)
        }
        Err(AppError::Failure(err)) => {
            eprintln!("vectra: {err}");
            ExitCode::from(EXIT_UNKNOWN)
        }
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Scan {
            input,
            threshold,
            output,
            no_borders,
        } => {
            let raster = read_png_file(&input)?;
            let mut scan = PixelScan::from_source(&raster)?;
            scan.scan_for_shapes(clamp_threshold(threshold))?;
            if !no_borders {
                scan.calculate_borders();
            }
            scan.compress_shapes();
            scan.write_to_file(&output)?;
            Ok(())
        }

        Command::Parse { input, output } => {
            let mut scan = PixelScan::read_from_file(&input)?;
            write_svg(&mut scan, &output)
        }

        Command::Process {
            input,
            threshold,
            output,
            shape_path,
        } => {
            let raster = read_png_file(&input)?;
            let mut scan = PixelScan::from_source(&raster)?;
            scan.scan_for_shapes(clamp_threshold(threshold))?;
            scan.calculate_borders();
            write_svg(&mut scan, &output)?;
            if let Some(shape_path) = shape_path {
                scan.compress_shapes();
                scan.write_to_file(&shape_path)?;
            }
            Ok(())
        }

        Command::WriteBorders { input, output } => {
            let scan = read_scan_with_borders(&input)?;
            let mut raster = blank_raster(&scan);
            scan.render_borders(&mut raster);
            write_png_file(&output, &raster)?;
            Ok(())
        }

        Command::WriteBorder {
            input,
            index,
            output,
        } => {
            let scan = read_scan_with_borders(&input)?;
            if index >= scan.shapes().len() {
                warn!(
                    "shape index {index} out of range ({} shapes), nothing written",
                    scan.shapes().len()
                );
                return Ok(());
            }
            let mut raster = blank_raster(&scan);
            scan.render_border(index, &mut raster);
            let output = output.unwrap_or_else(|| PathBuf::from(format!("border {index}.png")));
            write_png_file(&output, &raster)?;
            Ok(())
        }

        Command::WriteShapes { input, output } => {
            let scan = PixelScan::read_from_file(&input)?;
            let mut raster = blank_raster(&scan);
            scan.render_shapes(&mut raster);
            write_png_file(&output, &raster)?;
            Ok(())
        }

        Command::WriteShape {
            input,
            index,
            output,
        } => {
            let scan = PixelScan::read_from_file(&input)?;
            if index >= scan.shapes().len() {
                warn!(
                    "shape index {index} out of range ({} shapes), nothing written",
                    scan.shapes().len()
                );
                return Ok(());
            }
            let mut raster = blank_raster(&scan);
            scan.render_shape(index, &mut raster);
            let output = output.unwrap_or_else(|| PathBuf::from(format!("shape {index}.png")));
            write_png_file(&output, &raster)?;
            Ok(())
        }

        Command::Reduce {
            input,
            reach,
            threshold,
            output,
        } => {
            let raster = read_png_file(&input)?;
            let reducer = Reducer::new(reach, clamp_threshold(threshold))?;
            let reduced = reducer.reduce(&raster);
            write_png_file(&output, &reduced)?;
            Ok(())
        }
    }
}

/// Negative thresholds are treated as zero.
fn clamp_threshold(threshold: f32) -> f32 {
    threshold.max(0.0)
}

/// Load a scan, tracing borders if the file was saved without them.
fn read_scan_with_borders(input: &PathBuf) -> Result<PixelScan, AppError> {
    let mut scan = PixelScan::read_from_file(input)?;
    if !scan.has_borders() {
        scan.calculate_borders();
    }
    Ok(scan)
}

fn blank_raster(scan: &PixelScan) -> Raster {
    Raster::new(scan.image_size().x as usize, scan.image_size().y as usize)
}

fn write_svg(scan: &mut PixelScan, output: &PathBuf) -> Result<(), AppError> {
    let file = std::fs::File::create(output)?;
    let mut writer = std::io::BufWriter::new(file);
    scan.to_svg(&mut writer)?;
    writer.flush()?;
    Ok(())
}
