//! Run-wide settings shared by configuration loading and presentation.

pub mod output_format;

pub use output_format::OutputFormat;
