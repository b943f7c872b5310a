use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use super::writer::list_jsonl_files;

/// Export all dataset files in `source_dir` to a single JSONL file
/// Returns the number of source files merged
pub fn to_jsonl(source_dir: &Path, target_path: &Path) -> io::Result<usize> {
    if !source_dir.exists() {
        return Err(io::Error::new(io::ErrorKind::NotFound, "Dataset directory not found"));
    }

    // Collect sources before creating the target, which may live in the same dir
    let paths: Vec<_> = list_jsonl_files(source_dir)?
        .into_iter()
        .filter(|p| !same_file(p, target_path))
        .collect();

    if let Some(parent) = target_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut output_file = File::create(target_path)?;
    let mut file_count = 0;

    for path in paths {
        let content = fs::read(&path)?;
        output_file.write_all(&content)?;

        // Ensure newline between files
        if let Some(&last_byte) = content.last() {
            if last_byte != b'\n' {
                output_file.write_all(b"\n")?;
            }
        }

        file_count += 1;
    }

    output_file.flush()?;
    log::info!("Exported {} dataset files to {}", file_count, target_path.display());
    Ok(file_count)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
