//! Core pipeline orchestration and domain logic for ATOC.
//!
//! This crate ties together extraction, classification, style resolution,
//! and serialization into end-to-end workflows: [`assembler::assemble`] for
//! in-memory document assembly, [`pipeline::convert_file`] and
//! [`pipeline::convert_dir`] for file-to-file conversion.

pub mod assembler;
pub mod pipeline;
pub mod sanitize;

pub use assembler::{AssembleOptions, assemble};
pub use pipeline::{
    BatchConfig, BatchOutcome, ConvertConfig, ConvertOutcome, ProgressReporter, SilentProgress,
    convert_dir, convert_file, default_output_path, validate_static_config,
};
pub use sanitize::scrub;
