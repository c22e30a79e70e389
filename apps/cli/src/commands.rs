//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use atoc_core::{
    BatchConfig, ConvertConfig, ProgressReporter, convert_dir, convert_file, default_output_path,
    validate_static_config,
};
use atoc_shared::{AppConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ATOC — turn raw map exports into styled KML.
#[derive(Parser)]
#[command(
    name = "atoc",
    version,
    about = "Transform raw KML/KMZ exports into visually styled KML files.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert a KML/KMZ file, or every file in a directory.
    Convert {
        /// Path to a .kml/.kmz file, or a folder containing them.
        input: String,

        /// Output file path (single file) or directory (batch mode).
        #[arg(short, long)]
        out: Option<String>,

        /// Name for the KML document (defaults to config, then "ATOC Export";
        /// batch mode defaults to each file's stem).
        #[arg(short, long)]
        name: Option<String>,

        /// Do not group placemarks into folders by category.
        #[arg(long)]
        no_folders: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "atoc=info",
        1 => "atoc=debug",
        _ => "atoc=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert {
            input,
            out,
            name,
            no_folders,
        } => cmd_convert(&input, out.as_deref(), name.as_deref(), no_folders),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Convert
// ---------------------------------------------------------------------------

fn cmd_convert(
    input: &str,
    out: Option<&str>,
    name: Option<&str>,
    no_folders: bool,
) -> Result<()> {
    // Static configuration faults are fatal before any file work.
    validate_static_config()?;

    let config = load_config()?;
    let input_path = PathBuf::from(input);
    let use_folders = !no_folders && config.defaults.use_folders;

    if input_path.is_dir() {
        return cmd_convert_batch(&input_path, out, name, use_folders);
    }

    let output = out
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(&input_path));
    let document_name = name
        .map(String::from)
        .unwrap_or_else(|| config.defaults.document_name.clone());

    info!(
        input = %input_path.display(),
        output = %output.display(),
        "converting file"
    );

    let convert_config = ConvertConfig {
        input: input_path,
        output,
        use_folders,
        document_name,
    };

    let outcome = convert_file(&convert_config)?;

    println!();
    println!("  Styled KML written!");
    println!("  Features: {}", outcome.feature_count);
    println!("  Styles:   {}", outcome.style_count);
    println!("  Path:     {}", outcome.output.display());
    println!("  Time:     {:.1}s", outcome.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_convert_batch(
    input_dir: &Path,
    out: Option<&str>,
    name: Option<&str>,
    use_folders: bool,
) -> Result<()> {
    info!(dir = %input_dir.display(), "batch converting directory");

    let batch_config = BatchConfig {
        input_dir: input_dir.to_path_buf(),
        output_dir: out.map(PathBuf::from),
        use_folders,
        document_name: name.map(String::from),
    };

    let reporter = CliProgress::new();
    let outcome = convert_dir(&batch_config, &reporter)?;
    reporter.finish();

    println!();
    println!("  Batch conversion complete!");
    println!("  Converted: {}", outcome.converted);
    println!("  Failed:    {}", outcome.failed);
    println!("  Time:      {:.1}s", outcome.elapsed.as_secs_f64());
    println!();

    if outcome.failed > 0 {
        return Err(eyre!("{} file(s) failed to convert", outcome.failed));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Batch progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_done(&self, path: &Path, ok: bool, current: usize, total: usize) {
        let status = if ok { "done" } else { "FAILED" };
        self.spinner.set_message(format!(
            "[{current}/{total}] {} {status}",
            path.display()
        ));
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
