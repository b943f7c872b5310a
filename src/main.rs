//! CookieGuard ML - Command line entry point
//!
//! Usage: cookieguard <command> [args]
//!
//!   schema                      Print the feature layout as JSON
//!   mock [count] [out]          Generate labeled mock cookies (also written
//!                               to the labeled path)
//!   label [in] [out]            Write heuristic labels onto cookies
//!   dataset [in] [dir] [--ground-truth]
//!                               Append labeled cookies to the training dataset
//!   export <target> [dir]       Merge dataset files into one JSONL
//!   extract [in]                Feature vectors as JSONL on stdout

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use cookieguard_ml::constants::{APP_NAME, APP_VERSION};
use cookieguard_ml::error::{PipelineError, Result};
use cookieguard_ml::logic::config::PipelineConfig;
use cookieguard_ml::logic::cookie::{load_cookies, save_cookies};
use cookieguard_ml::logic::dataset::{export, DatasetWriter};
use cookieguard_ml::logic::features::{FeatureExtractor, LayoutInfo};
use cookieguard_ml::logic::labeler::{HeuristicLabeler, LabelSource};
use cookieguard_ml::logic::mock::generate_mock_cookies;
use cookieguard_ml::logic::pipeline::{self, LabelDistribution};

const USAGE: &str = "usage: cookieguard <schema|mock|label|dataset|export|extract> [args]";

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::from_env();
    config.init_thread_pool();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &PipelineConfig, args: &[String]) -> Result<()> {
    let command = args.first().map(String::as_str).unwrap_or("");
    let rest = args.get(1..).unwrap_or(&[]);

    match command {
        "schema" => cmd_schema(),
        "mock" => cmd_mock(config, rest),
        "label" => cmd_label(config, rest),
        "dataset" => cmd_dataset(config, rest),
        "export" => cmd_export(config, rest),
        "extract" => cmd_extract(config, rest),
        "" => Err(PipelineError::InvalidArgument(USAGE.to_string())),
        other => Err(PipelineError::InvalidArgument(format!(
            "unknown command {:?}; {}",
            other, USAGE
        ))),
    }
}

/// Positional argument `index` as a path, or `default`
fn path_arg(args: &[String], index: usize, default: &PathBuf) -> PathBuf {
    positional(args)
        .nth(index)
        .map(PathBuf::from)
        .unwrap_or_else(|| default.clone())
}

fn positional(args: &[String]) -> impl Iterator<Item = &String> {
    args.iter().filter(|a| !a.starts_with("--"))
}

// ============================================================================
// COMMANDS
// ============================================================================

fn cmd_schema() -> Result<()> {
    let info = LayoutInfo::current();
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn cmd_mock(config: &PipelineConfig, args: &[String]) -> Result<()> {
    let count = match positional(args).next() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|e| PipelineError::InvalidArgument(format!("count {:?}: {}", raw, e)))?,
        None => config.mock_count,
    };
    let out = path_arg(args, 1, &config.raw_path);

    log::info!("{} v{} - generating {} mock cookies", APP_NAME, APP_VERSION, count);
    let cookies = generate_mock_cookies(count, config.mock_seed);
    save_cookies(&out, &cookies)?;

    // Mock labels are ground truth, so the labeled file is ready for `dataset`
    if out != config.labeled_path {
        save_cookies(&config.labeled_path, &cookies)?;
    }

    LabelDistribution::from_records(&cookies).log_summary();
    Ok(())
}

fn cmd_label(config: &PipelineConfig, args: &[String]) -> Result<()> {
    let input = path_arg(args, 0, &config.raw_path);
    let output = path_arg(args, 1, &config.labeled_path);

    let mut cookies = load_cookies(&input)?;
    let labeler = HeuristicLabeler::new();
    pipeline::apply_heuristic_labels(&labeler, &mut cookies, config.overwrite_labels);
    save_cookies(&output, &cookies)?;

    LabelDistribution::from_records(&cookies).log_summary();
    Ok(())
}

fn cmd_dataset(config: &PipelineConfig, args: &[String]) -> Result<()> {
    let input = path_arg(args, 0, &config.labeled_path);
    let dir = path_arg(args, 1, &config.dataset_dir);
    let source = if args.iter().any(|a| a == "--ground-truth") {
        LabelSource::GroundTruth
    } else {
        LabelSource::Heuristic
    };

    let cookies = load_cookies(&input)?;
    let writer = DatasetWriter::with_max_file_size(dir, config.max_dataset_file_size)?;
    let extractor = FeatureExtractor::default();

    let summary = pipeline::prepare_dataset(&extractor, &cookies, source, &writer)?;
    summary.distribution.log_summary();

    let stats = writer.get_stats()?;
    log::info!(
        "Dataset: {} files, {:.2} MB, current {}",
        stats.total_files,
        stats.total_size_mb,
        stats.current_file
    );
    Ok(())
}

fn cmd_export(config: &PipelineConfig, args: &[String]) -> Result<()> {
    let target = positional(args)
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| PipelineError::InvalidArgument("export needs a target path".to_string()))?;
    let source = path_arg(args, 1, &config.dataset_dir);

    export::to_jsonl(&source, &target)?;
    Ok(())
}

fn cmd_extract(config: &PipelineConfig, args: &[String]) -> Result<()> {
    let input = path_arg(args, 0, &config.raw_path);
    let cookies = load_cookies(&input)?;

    let extractor = FeatureExtractor::default();
    let vectors = pipeline::extract_batch(&extractor, &cookies);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (cookie, vector) in cookies.iter().zip(&vectors) {
        let mut entry = vector.to_log_entry();
        entry["name"] = serde_json::Value::String(cookie.name.clone());
        entry["domain"] = serde_json::Value::String(cookie.domain.clone());
        writeln!(out, "{}", serde_json::to_string(&entry)?)?;
    }
    out.flush()?;

    log::info!("Extracted {} feature vectors", vectors.len());
    Ok(())
}
