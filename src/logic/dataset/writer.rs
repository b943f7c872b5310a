use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;

use crate::constants::DEFAULT_MAX_DATASET_FILE_SIZE;
use crate::logic::dataset::record::DatasetRecord;

/// Append-only JSONL writer with size-based rotation
pub struct DatasetWriter {
    file: Mutex<Option<File>>,
    base_dir: PathBuf,
    max_file_size: u64,
}

/// Snapshot of what's on disk
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DatasetStats {
    pub total_files: usize,
    pub total_size_mb: f32,
    pub current_file: String,
}

impl DatasetWriter {
    pub fn from_path(base_dir: PathBuf) -> io::Result<Self> {
        Self::with_max_file_size(base_dir, DEFAULT_MAX_DATASET_FILE_SIZE)
    }

    pub fn with_max_file_size(base_dir: PathBuf, max_file_size: u64) -> io::Result<Self> {
        fs::create_dir_all(&base_dir)?;

        Ok(Self {
            file: Mutex::new(None),
            base_dir,
            max_file_size,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Append record to dataset log
    /// Handles file rotation automatically
    pub fn append(&self, record: &DatasetRecord) -> io::Result<()> {
        let json = serde_json::to_string(record)?;
        let mut file_guard = self.file.lock();

        // If file not open, continue the latest one or create new
        if file_guard.is_none() {
            let file = match self.find_latest_log_file()? {
                Some(path) => {
                    let f = OpenOptions::new().create(true).append(true).open(&path)?;
                    if f.metadata()?.len() < self.max_file_size {
                        f
                    } else {
                        self.create_new_file()?
                    }
                }
                None => self.create_new_file()?,
            };
            *file_guard = Some(file);
        }

        // File may have filled up during this run
        let should_rotate = match file_guard.as_ref() {
            Some(f) => f.metadata()?.len() >= self.max_file_size,
            None => false,
        };

        if should_rotate {
            *file_guard = Some(self.create_new_file()?);
        }

        if let Some(file) = file_guard.as_mut() {
            writeln!(file, "{}", json)?;
        }

        Ok(())
    }

    /// Flush the open file, if any
    pub fn flush(&self) -> io::Result<()> {
        if let Some(file) = self.file.lock().as_mut() {
            file.flush()?;
        }
        Ok(())
    }

    pub fn get_stats(&self) -> io::Result<DatasetStats> {
        let paths = list_jsonl_files(&self.base_dir)?;
        let mut size = 0u64;

        for path in &paths {
            if let Ok(meta) = fs::metadata(path) {
                size += meta.len();
            }
        }

        let current_file = paths
            .last()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("None")
            .to_string();

        Ok(DatasetStats {
            total_files: paths.len(),
            total_size_mb: size as f32 / 1024.0 / 1024.0,
            current_file,
        })
    }

    fn create_new_file(&self) -> io::Result<File> {
        let now = Utc::now();
        // timestamp format: YYYY-MM-DD-HHMMSS
        let stem = format!("dataset-{}", now.format("%Y-%m-%d-%H%M%S"));
        let mut path = self.base_dir.join(format!("{}.jsonl", stem));

        // Several rotations within one second
        let mut n = 1;
        while path.exists() {
            path = self.base_dir.join(format!("{}_{:03}.jsonl", stem, n));
            n += 1;
        }

        log::debug!("Opening dataset file {}", path.display());
        OpenOptions::new().create(true).append(true).open(path)
    }

    fn find_latest_log_file(&self) -> io::Result<Option<PathBuf>> {
        Ok(list_jsonl_files(&self.base_dir)?.pop())
    }
}

/// All `.jsonl` files in `dir`, sorted by name (= chronological)
pub fn list_jsonl_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .filter_map(|res| res.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "jsonl"))
        .collect::<Vec<_>>();

    entries.sort();
    Ok(entries)
}
