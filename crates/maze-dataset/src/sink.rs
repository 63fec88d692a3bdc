//! Output sinks for the dataset stream.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Open the configured sink: a buffered file, or stdout when no path is
/// given. Parent directories are created on demand.
pub fn open_sink(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}
