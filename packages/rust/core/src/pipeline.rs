//! End-to-end conversion pipeline: KML/KMZ file → parse → assemble → write.
//!
//! Single-file and batch-directory conversion, plus the eager startup
//! validation of the static rule table and style palette.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use atoc_kml::{read_kml_file, write_kml};
use atoc_shared::{AtocError, Result};

use crate::assembler::{AssembleOptions, assemble};

/// File extensions the pipeline picks up in batch mode.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["kml", "kmz"];

/// Validate the compiled-in rule table and style palette.
///
/// Configuration faults are fatal at process start; call this before any
/// conversion work.
pub fn validate_static_config() -> Result<()> {
    atoc_classify::validate_rules()?;
    atoc_styles::validate_palette()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for batch conversions.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each file in a batch, successful or not.
    fn file_done(&self, path: &Path, ok: bool, current: usize, total: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_done(&self, _path: &Path, _ok: bool, _current: usize, _total: usize) {}
}

// ---------------------------------------------------------------------------
// Single-file conversion
// ---------------------------------------------------------------------------

/// Configuration for a single-file conversion.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Input `.kml` or `.kmz` file.
    pub input: PathBuf,
    /// Output `.kml` file.
    pub output: PathBuf,
    /// Group placemarks into per-category folders.
    pub use_folders: bool,
    /// Document display name.
    pub document_name: String,
}

/// Result of a successful single-file conversion.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    /// Where the styled KML was written.
    pub output: PathBuf,
    /// Number of features extracted from the input.
    pub feature_count: usize,
    /// Number of shared style blocks emitted.
    pub style_count: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Convert one KML/KMZ file into a styled KML file.
#[instrument(skip_all, fields(input = %config.input.display()))]
pub fn convert_file(config: &ConvertConfig) -> Result<ConvertOutcome> {
    let start = Instant::now();

    let features = read_kml_file(&config.input)?;
    info!(count = features.len(), "features extracted");

    let options = AssembleOptions {
        use_folders: config.use_folders,
        document_name: config.document_name.clone(),
    };
    let document = assemble(&features, &options);
    let kml = write_kml(&document)?;

    if let Some(parent) = config.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AtocError::io(parent, e))?;
        }
    }
    std::fs::write(&config.output, kml).map_err(|e| AtocError::io(&config.output, e))?;

    info!(
        output = %config.output.display(),
        styles = document.styles.len(),
        "styled KML written"
    );

    Ok(ConvertOutcome {
        output: config.output.clone(),
        feature_count: features.len(),
        style_count: document.styles.len(),
        elapsed: start.elapsed(),
    })
}

/// Default output path for an input file: `<stem>_styled.kml` next to it.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_styled.kml"))
}

// ---------------------------------------------------------------------------
// Batch conversion
// ---------------------------------------------------------------------------

/// Configuration for a batch directory conversion.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory containing `.kml`/`.kmz` files.
    pub input_dir: PathBuf,
    /// Output directory; defaults to the input directory.
    pub output_dir: Option<PathBuf>,
    /// Group placemarks into per-category folders.
    pub use_folders: bool,
    /// Document name override; each file's stem is used when `None`.
    pub document_name: Option<String>,
}

/// Result of a batch conversion run.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Files converted successfully.
    pub converted: usize,
    /// Files that failed (logged, not fatal to the batch).
    pub failed: usize,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Convert every supported file in a directory, in sorted filename order.
///
/// A file that fails to convert is counted and logged; the batch continues.
/// Returns an error only when the directory itself is unreadable or holds
/// no supported files.
#[instrument(skip_all, fields(dir = %config.input_dir.display()))]
pub fn convert_dir(config: &BatchConfig, progress: &dyn ProgressReporter) -> Result<BatchOutcome> {
    let start = Instant::now();

    let mut inputs: Vec<PathBuf> = std::fs::read_dir(&config.input_dir)
        .map_err(|e| AtocError::io(&config.input_dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_supported(path))
        .collect();
    inputs.sort();

    if inputs.is_empty() {
        return Err(AtocError::validation(format!(
            "no KML/KMZ files found in {}",
            config.input_dir.display()
        )));
    }

    let out_dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| config.input_dir.clone());
    std::fs::create_dir_all(&out_dir).map_err(|e| AtocError::io(&out_dir, e))?;

    progress.phase(&format!("Converting {} file(s)", inputs.len()));
    info!(files = inputs.len(), "starting batch conversion");

    let total = inputs.len();
    let mut converted = 0;
    let mut failed = 0;

    for (i, input) in inputs.iter().enumerate() {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let document_name = config.document_name.clone().unwrap_or_else(|| stem.clone());
        let output = out_dir.join(format!("{stem}_styled.kml"));

        let file_config = ConvertConfig {
            input: input.clone(),
            output,
            use_folders: config.use_folders,
            document_name,
        };

        match convert_file(&file_config) {
            Ok(_) => {
                converted += 1;
                progress.file_done(input, true, i + 1, total);
            }
            Err(e) => {
                warn!(input = %input.display(), error = %e, "conversion failed, continuing batch");
                failed += 1;
                progress.file_done(input, false, i + 1, total);
            }
        }
    }

    info!(converted, failed, "batch conversion complete");

    Ok(BatchOutcome {
        converted,
        failed,
        elapsed: start.elapsed(),
    })
}

/// Whether a path points at a convertible file.
fn is_supported(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
