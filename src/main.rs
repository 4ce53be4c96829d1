// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_controller::Controller;
use crate::cinecanvas::rules;
use crate::export_settings::ExportSettings;
use crate::timecode::FrameRate;

mod app_controller;
mod ass_tags;
mod cinecanvas;
mod color;
mod errors;
mod export_settings;
mod file_utils;
mod language_utils;
mod subtitle_document;
mod timecode;
mod validation;

/// CLI wrapper for log levels to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert between ASS and CineCanvas XML subtitles (default command)
    Convert(ConvertArgs),

    /// Generate shell completions for cinesub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file path (defaults to the input path with swapped extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Movie title for the DCP metadata (defaults to the input filename)
    #[arg(short, long)]
    title: Option<String>,

    /// DCP reel number (1-based)
    #[arg(short, long)]
    reel: Option<i32>,

    /// ISO 639 language code (e.g. 'en', 'fr', 'deu')
    #[arg(short, long)]
    language: Option<String>,

    /// DCP frame rate (24, 25 or 30; other values fall back to 24)
    #[arg(long)]
    rate: Option<i32>,

    /// Font file to reference from the LoadFont element
    #[arg(long)]
    font_file: Option<PathBuf>,

    /// Settings file path
    #[arg(short, long, default_value = "cinesub.json")]
    settings_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// cinesub - CineCanvas subtitle converter
///
/// Converts ASS subtitle files to DCP CineCanvas XML and back.
#[derive(Parser, Debug)]
#[command(name = "cinesub")]
#[command(version = "1.0.0")]
#[command(about = "ASS <-> DCP CineCanvas XML subtitle converter")]
#[command(long_about = "cinesub converts ASS subtitle documents to the CineCanvas XML format used
inside Digital Cinema Packages, and converts CineCanvas XML files back to ASS.

EXAMPLES:
    cinesub movie.ass                          # Export to movie.xml
    cinesub movie.xml                          # Import to movie.ass
    cinesub -f movie.ass                       # Force overwrite existing output
    cinesub -t \"My Movie\" -l fr movie.ass      # Set DCP metadata
    cinesub --rate 25 movie.ass                # Quantize timecodes to 25 fps
    cinesub /subs/                             # Convert an entire directory
    cinesub completions bash > cinesub.bash    # Generate bash completions

CONFIGURATION:
    Export settings are stored in cinesub.json by default. You can specify a
    different file with --settings-path. If the settings file doesn't exist,
    a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file path (defaults to the input path with swapped extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Movie title for the DCP metadata (defaults to the input filename)
    #[arg(short, long)]
    title: Option<String>,

    /// DCP reel number (1-based)
    #[arg(short, long)]
    reel: Option<i32>,

    /// ISO 639 language code (e.g. 'en', 'fr', 'deu')
    #[arg(short, long)]
    language: Option<String>,

    /// DCP frame rate (24, 25 or 30; other values fall back to 24)
    #[arg(long)]
    rate: Option<i32>,

    /// Font file to reference from the LoadFont element
    #[arg(long)]
    font_file: Option<PathBuf>,

    /// Settings file path
    #[arg(short, long, default_value = "cinesub.json")]
    settings_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Custom logger writing colored, timestamped lines to stderr
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    /// ANSI color code and marker for a log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let (color, marker) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                marker,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default; the level is
    // raised or lowered after the CLI is parsed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "cinesub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            // Default behavior - top-level args act as the convert command
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let convert_args = ConvertArgs {
                input_path,
                output: cli.output,
                force_overwrite: cli.force_overwrite,
                title: cli.title,
                reel: cli.reel,
                language: cli.language,
                rate: cli.rate,
                font_file: cli.font_file,
                settings_path: cli.settings_path,
                log_level: cli.log_level,
            };
            run_convert(convert_args)
        }
    }
}

fn run_convert(options: ConvertArgs) -> Result<()> {
    if let Some(level) = &options.log_level {
        log::set_max_level(level.clone().into());
    }

    // Load or create the export settings
    let settings_path = &options.settings_path;
    let mut settings = if Path::new(settings_path).exists() {
        ExportSettings::load(settings_path)
            .with_context(|| format!("Failed to load settings: {}", settings_path))?
    } else {
        warn!(
            "Settings file not found at '{}', creating default settings.",
            settings_path
        );
        let settings = ExportSettings::from_context(&options.input_path, None);
        settings
            .save(settings_path)
            .with_context(|| format!("Failed to write default settings: {}", settings_path))?;
        settings
    };

    // Override settings with CLI options if provided
    if let Some(title) = &options.title {
        settings.movie_title = title.clone();
    }
    if let Some(reel) = options.reel {
        settings.reel_number = reel;
    }
    if let Some(language) = &options.language {
        settings.language_code = language.clone();
    }
    if let Some(rate) = options.rate {
        settings.frame_rate = match rules::validate_frame_rate(rate) {
            25 => FrameRate::Fps25,
            30 => FrameRate::Fps30,
            _ => FrameRate::Fps24,
        };
    }
    if let Some(font_file) = &options.font_file {
        settings.font_uri = font_file.to_string_lossy().into_owned();
        settings.include_font_reference = true;
    }
    settings.sanitize();

    let controller = Controller::with_settings(settings)?;

    if options.input_path.is_dir() {
        controller.run_folder(options.input_path, options.force_overwrite)
    } else {
        controller.run(options.input_path, options.output, options.force_overwrite)
    }
}
