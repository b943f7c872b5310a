//! Cookie file I/O
//!
//! Input boundary: one JSON array of cookie objects (collector output).
//! Output: the same array with `label` written back.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::record::CookieRecord;
use crate::error::Result;

/// Load a JSON array of cookies
pub fn load_cookies(path: impl AsRef<Path>) -> Result<Vec<CookieRecord>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let cookies: Vec<CookieRecord> = serde_json::from_reader(reader)?;

    log::info!("Loaded {} cookies from {}", cookies.len(), path.display());
    Ok(cookies)
}

/// Write cookies as a pretty-printed JSON array, creating parent dirs
pub fn save_cookies(path: impl AsRef<Path>, cookies: &[CookieRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, cookies)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    log::info!("Saved {} cookies to {}", cookies.len(), path.display());
    Ok(())
}
