use std::path::{Path, PathBuf};
use clap::{Parser};

use crate::{Error, Result};

/// Returns the part of `path` before its extension, without the directory.
fn file_stem(path: &str) -> Result<&str> {
    let stem = Path::new(path).file_stem().ok_or(Error::InvalidParameter("Empty filename"))?;
    stem.to_str().ok_or(Error::InvalidParameter("Invalid unicode"))
}

/// Builds `dir/<stem>-<suffix>.png`, where `stem` is the file stem of `path`.
fn sibling_png(dir: PathBuf, path: &str, suffix: impl std::fmt::Display) -> Result<String> {
    let out = dir.join(format!("{}-{}.png", file_stem(path)?, suffix));
    out.into_os_string().into_string().map_err(|_| Error::InvalidParameter("Invalid unicode"))
}

/// The output path used when none is given: a PNG in the temporary
/// directory named after `in_path` and `program_name`.
pub fn default_out_path(in_path: &str, program_name: &str) -> Result<String> {
    sibling_png(std::env::temp_dir(), in_path, program_name)
}

/// Constructs the path of progressive stage `index` from `out_path`.
///
/// `dir/name.ext` becomes `dir/name-<index>.png`.
pub fn stage_path(out_path: &str, index: usize) -> Result<String> {
    let dir = Path::new(out_path).parent().map_or_else(PathBuf::new, Path::to_path_buf);
    sibling_png(dir, out_path, index)
}

// ----------------------------------------------------------------------------

/// One unit of work for the compressor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Request {
    /// Compress once, discarding the fraction `ratio` of the coefficients.
    Single { ratio: f64 },

    /// Write the whole progressive sequence.
    Progressive,
}

#[derive(Debug, Parser)]
#[command(about = "Compress an image file with the Haar wavelet transform.")]
#[command(author, version, long_about = None)]
pub struct Args {
    /// Input path.
    pub in_path: String,

    /// Output path. Progressive stages are written next to it, with a stage
    /// number appended to the file stem.
    #[arg(short, long)]
    pub out_path: Option<String>,

    /// Percentage of the wavelet coefficients to discard, from 0 to 100.
    #[arg(short, long, value_name = "PERCENT", allow_negative_numbers = true)]
    pub compress: Option<f64>,

    /// Write progressively compressed images, from coarsest (0) to finest.
    #[arg(short, long)]
    pub progressive: bool,
}

impl Args {
    /// Returns `out_path` or `default_out_path(program_name)`.
    pub fn out_path(&self, program_name: &str) -> Result<String> {
        self.out_path.clone().map_or_else(|| default_out_path(&self.in_path, program_name), Ok)
    }

    /// Returns the requested work, in the order it should be done.
    pub fn requests(&self) -> Result<Vec<Request>> {
        let mut requests = Vec::new();
        if let Some(percent) = self.compress {
            requests.push(Request::Single {ratio: crate::threshold::check_ratio(percent / 100.0)?});
        }
        if self.progressive {
            requests.push(Request::Progressive);
        }
        if requests.is_empty() {
            Err(Error::InvalidParameter("Nothing to do: pass --compress and/or --progressive"))?
        }
        Ok(requests)
    }
}

// ----------------------------------------------------------------------------
