//! Batch conversion of a directory tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::WalkDir;

use foliant_highlight::HighlightEngine;

use crate::convert::{ConvertOptions, convert_file, is_markdown_path};

/// Options for batch processing.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Directory to search for Markdown files.
    pub input_dir: PathBuf,
    /// Where to mirror the tree of generated pages (next to the inputs if
    /// absent).
    pub output_dir: Option<PathBuf>,
    /// Per-file conversion options; the output path is derived per file.
    pub convert: ConvertOptions,
    /// Whether to log each file as it is converted.
    pub verbose: bool,
}

/// Aggregate statistics from a batch run.
#[derive(Debug, Default)]
pub struct ProcessorStats {
    /// Markdown files converted.
    pub files_converted: usize,
    /// Files that failed; their errors were reported as warnings.
    pub files_failed: usize,
    /// Code blocks highlighted across all pages.
    pub blocks_highlighted: usize,
    /// Code blocks skipped across all pages.
    pub blocks_skipped: usize,
    /// Languages no grammar was available for, deduplicated.
    pub unsupported_languages: Vec<String>,
    /// Webfont notices raised during the run, deduplicated.
    pub notices: Vec<String>,
    /// Markdown bytes read.
    pub bytes_input: u64,
    /// HTML bytes written.
    pub bytes_output: u64,
    /// Wall time spent converting.
    pub duration: Duration,
}

impl ProcessorStats {
    /// Output size relative to input size.
    pub fn expansion_ratio(&self) -> f64 {
        if self.bytes_input == 0 {
            1.0
        } else {
            self.bytes_output as f64 / self.bytes_input as f64
        }
    }

    /// Conversion throughput in MB/s.
    pub fn throughput_mb_s(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            (self.bytes_input as f64 / (1024.0 * 1024.0)) / secs
        }
    }
}

/// Batch converter for a directory of Markdown files.
pub struct Processor {
    options: ProcessOptions,
}

impl Processor {
    pub fn new(options: ProcessOptions) -> Self {
        Self { options }
    }

    /// Convert every Markdown file under the input directory.
    ///
    /// `make_engine` is called once per worker thread, not once per file, so
    /// engines can amortize grammar setup across a whole run. Individual
    /// file failures are reported as warnings and counted; they do not abort
    /// the run.
    pub fn process<E, F>(&mut self, make_engine: F) -> Result<ProcessorStats, std::io::Error>
    where
        E: HighlightEngine,
        F: Fn() -> E + Send + Sync,
    {
        let files: Vec<PathBuf> = WalkDir::new(&self.options.input_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_markdown_path(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        if let Some(output_dir) = &self.options.output_dir {
            fs::create_dir_all(output_dir)?;
        }

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.green}] {pos}/{len} ({per_sec})")
                .unwrap()
                .progress_chars("=> "),
        );

        let files_converted = AtomicUsize::new(0);
        let files_failed = AtomicUsize::new(0);
        let blocks_highlighted = AtomicUsize::new(0);
        let blocks_skipped = AtomicUsize::new(0);
        let bytes_input = AtomicU64::new(0);
        let bytes_output = AtomicU64::new(0);
        let unsupported_languages = Mutex::new(Vec::<String>::new());
        let notices = Mutex::new(Vec::<String>::new());

        let verbose = self.options.verbose;
        let started = Instant::now();

        files.par_iter().for_each_init(
            || make_engine(),
            |engine, path| {
                if verbose {
                    eprintln!("Converting: {}", path.display());
                }

                match self.convert_one(path, engine) {
                    Ok(report) => {
                        files_converted.fetch_add(1, Ordering::Relaxed);
                        blocks_highlighted
                            .fetch_add(report.summary.blocks_highlighted, Ordering::Relaxed);
                        blocks_skipped.fetch_add(report.summary.blocks_skipped, Ordering::Relaxed);
                        bytes_input.fetch_add(report.bytes_input, Ordering::Relaxed);
                        bytes_output.fetch_add(report.bytes_output, Ordering::Relaxed);

                        if !report.summary.unsupported_languages.is_empty() {
                            let mut languages = unsupported_languages.lock().unwrap();
                            for language in report.summary.unsupported_languages {
                                if !languages.contains(&language) {
                                    languages.push(language);
                                }
                            }
                        }
                        if !report.notices.is_empty() {
                            let mut all = notices.lock().unwrap();
                            for notice in report.notices {
                                if !all.contains(&notice) {
                                    all.push(notice);
                                }
                            }
                        }
                    }
                    Err(e) => {
                        files_failed.fetch_add(1, Ordering::Relaxed);
                        progress.println(format!(
                            "Warning: failed to convert {}: {}",
                            path.display(),
                            e
                        ));
                    }
                }
                progress.inc(1);
            },
        );

        let duration = started.elapsed();
        progress.finish_and_clear();

        Ok(ProcessorStats {
            files_converted: files_converted.load(Ordering::Relaxed),
            files_failed: files_failed.load(Ordering::Relaxed),
            blocks_highlighted: blocks_highlighted.load(Ordering::Relaxed),
            blocks_skipped: blocks_skipped.load(Ordering::Relaxed),
            unsupported_languages: unsupported_languages.into_inner().unwrap(),
            notices: notices.into_inner().unwrap(),
            bytes_input: bytes_input.load(Ordering::Relaxed),
            bytes_output: bytes_output.load(Ordering::Relaxed),
            duration,
        })
    }

    fn convert_one<E: HighlightEngine>(
        &self,
        path: &Path,
        engine: &mut E,
    ) -> Result<crate::convert::ConvertReport, crate::convert::ConvertError> {
        let mut per_file = self.options.convert.clone();
        per_file.title = None;
        per_file.output = match &self.options.output_dir {
            Some(output_dir) => {
                let relative = path.strip_prefix(&self.options.input_dir).unwrap_or(path);
                let output = output_dir.join(relative).with_extension("html");
                if let Some(parent) = output.parent() {
                    fs::create_dir_all(parent)?;
                }
                Some(output)
            }
            None => None,
        };

        convert_file(path, &per_file, engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foliant_highlight::HighlightError;

    struct EmEngine;

    impl HighlightEngine for EmEngine {
        fn highlight(&mut self, _language: &str, source: &str) -> Result<String, HighlightError> {
            Ok(format!(
                "<em>{}</em>",
                foliant_highlight::html_escape(source)
            ))
        }

        fn supports(&self, _language: &str) -> bool {
            true
        }
    }

    #[test]
    fn converts_a_tree_into_the_output_dir() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("a.md"), "# A\n").unwrap();
        fs::create_dir(input.path().join("sub")).unwrap();
        fs::write(input.path().join("sub").join("b.md"), "# B\n").unwrap();
        fs::write(input.path().join("notes.txt"), "skip me").unwrap();

        let mut processor = Processor::new(ProcessOptions {
            input_dir: input.path().to_path_buf(),
            output_dir: Some(output.path().to_path_buf()),
            convert: ConvertOptions::default(),
            verbose: false,
        });
        let stats = processor.process(|| EmEngine).unwrap();

        assert_eq!(stats.files_converted, 2);
        assert_eq!(stats.files_failed, 0);
        assert!(output.path().join("a.html").is_file());
        assert!(output.path().join("sub").join("b.html").is_file());
        assert!(!output.path().join("notes.html").exists());
    }

    #[test]
    fn failures_are_counted_not_fatal() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(input.path().join("good.md"), "fine\n").unwrap();
        fs::write(input.path().join("bad.md"), "also fine\n").unwrap();
        // Pre-create the colliding output; without --force that file fails.
        fs::write(output.path().join("bad.html"), "occupied").unwrap();

        let mut processor = Processor::new(ProcessOptions {
            input_dir: input.path().to_path_buf(),
            output_dir: Some(output.path().to_path_buf()),
            convert: ConvertOptions::default(),
            verbose: false,
        });
        let stats = processor.process(|| EmEngine).unwrap();

        assert_eq!(stats.files_converted, 1);
        assert_eq!(stats.files_failed, 1);
    }

    #[test]
    fn stats_ratios_are_stable_for_empty_runs() {
        let stats = ProcessorStats::default();
        assert_eq!(stats.expansion_ratio(), 1.0);
        assert_eq!(stats.throughput_mb_s(), 0.0);
    }
}
