use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::pipeline::{FileOutcome, FilePipeline};
use crate::translation::{RunOptions, Translator};

// @module: Application controller for batch source translation

/// Totals for one run over a set of files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_found: usize,
    pub files_changed: usize,
    pub files_unchanged: usize,
    /// Files left untouched because they could not be read, parsed, printed or written
    pub files_failed: usize,
    pub nodes_found: usize,
    pub nodes_translated: usize,
    /// Candidates that kept their original text
    pub nodes_kept: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &FileOutcome) {
        if outcome.is_failed() {
            self.files_failed += 1;
        } else if outcome.changed {
            self.files_changed += 1;
        } else {
            self.files_unchanged += 1;
        }

        let translated = outcome.translated_count();
        self.nodes_found += outcome.nodes.len();
        self.nodes_translated += translated;
        self.nodes_kept += outcome.nodes.len() - translated;
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Shared by every file of a run
    translator: Translator,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let translator = Translator::from_config(&config.translation)
            .context("Failed to create translation provider")?;
        Ok(Self { config, translator })
    }

    /// Create a controller around an existing translator
    pub fn with_translator(config: Config, translator: Translator) -> Self {
        Self { config, translator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Translate every source file under `paths`
    ///
    /// Files are processed one after another. A file that fails is logged and
    /// skipped; only discovery errors abort the run.
    pub async fn run(&self, paths: &[PathBuf], options: RunOptions) -> Result<RunSummary> {
        let start_time = Instant::now();

        let files = FileManager::find_source_files(
            paths,
            &self.config.files.extensions,
            &self.config.files.exclude_dirs,
        )?;

        let mut summary = RunSummary {
            files_found: files.len(),
            ..RunSummary::default()
        };

        if files.is_empty() {
            warn!("No source files found");
            return Ok(summary);
        }

        if options.dry_run {
            info!("Dry run: {} file(s), nothing will be written", files.len());
        } else {
            info!(
                "Translating {} file(s) with {} - {}",
                files.len(),
                self.config.translation.provider.display_name(),
                self.config.translation.get_model()
            );
        }

        let progress_bar = Self::create_progress_bar(files.len() as u64);
        let pipeline = FilePipeline::new(&self.translator, options);

        for file in &files {
            let file_name = file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            progress_bar.set_message(file_name);

            match self.process_one(&pipeline, file, options).await {
                Ok(outcome) => summary.record(&outcome),
                Err(e) => {
                    error!("Skipping {}: {:#}", file.display(), e);
                    summary.files_failed += 1;
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_and_clear();

        let (hits, _, _) = self.translator.cache().stats();
        debug!("Translation cache: {} entries, {} hits", self.translator.cache().len(), hits);

        info!(
            "Done in {}: {} changed, {} unchanged, {} failed; {} of {} node(s) translated",
            Self::format_duration(start_time.elapsed()),
            summary.files_changed,
            summary.files_unchanged,
            summary.files_failed,
            summary.nodes_translated,
            summary.nodes_found
        );

        Ok(summary)
    }

    async fn process_one(&self, pipeline: &FilePipeline<'_>, file: &Path, options: RunOptions) -> Result<FileOutcome> {
        let outcome = pipeline.process_file(file).await?;

        if outcome.changed && !options.dry_run {
            FileManager::write_to_file(file, &outcome.output)?;
            info!("Updated {}", file.display());
        } else {
            debug!("{}: nothing to write", file.display());
        }

        Ok(outcome)
    }

    fn create_progress_bar(len: u64) -> ProgressBar {
        if !std::io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
