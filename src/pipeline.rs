/*!
 * Per-file pipeline: parse, classify and translate, print.
 *
 * Every failure inside the pipeline stays inside it. A file that cannot be
 * parsed or printed comes out exactly as it went in, with the reason recorded
 * on the outcome and logged.
 */

use log::{debug, error, info};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, SyntaxError};
use crate::file_utils::FileManager;
use crate::syntax::{Dialect, SourceTree};
use crate::translation::{NodeReport, RunOptions, Translator, apply_translations};

/// Where a file is in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Pending,
    Parsed,
    Translated,
    Printed,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Parsed => "parsed",
            Self::Translated => "translated",
            Self::Printed => "printed",
            Self::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Result of running one file through the pipeline
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Terminal state, `Printed` or `Failed`
    pub state: PipelineState,
    /// Text to emit; the original text when the pipeline failed
    pub output: String,
    /// Whether `output` differs from the original text
    pub changed: bool,
    /// One entry per candidate node
    pub nodes: Vec<NodeReport>,
    /// Why the pipeline failed
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn is_failed(&self) -> bool {
        self.state == PipelineState::Failed
    }

    /// Number of nodes that received a new text
    pub fn translated_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.translated()).count()
    }
}

/// Runs files through parse, translation and print
pub struct FilePipeline<'a> {
    translator: &'a Translator,
    options: RunOptions,
}

impl<'a> FilePipeline<'a> {
    pub fn new(translator: &'a Translator, options: RunOptions) -> Self {
        Self { translator, options }
    }

    /// Read `path` and run its text through the pipeline
    ///
    /// Only a failure to read the file is returned as an error.
    pub async fn process_file(&self, path: &Path) -> Result<FileOutcome, AppError> {
        let source = FileManager::read_to_string(path).map_err(|e| AppError::File(format!("{:#}", e)))?;
        Ok(self.process_source(path, source).await)
    }

    /// Run `source`, the contents of `path`, through the pipeline
    pub async fn process_source(&self, path: &Path, source: String) -> FileOutcome {
        let dialect = Dialect::from_path(path);
        let mut state = PipelineState::Pending;

        let result = self.run(path, &source, dialect, &mut state).await;
        match result {
            Ok((output, nodes)) => {
                if self.options.dry_run {
                    for node in &nodes {
                        info!(
                            "{}:{} [{}] {:?} -> {:?}",
                            path.display(),
                            node.line,
                            node.kind,
                            node.original,
                            node.replacement
                        );
                    }
                }
                FileOutcome {
                    path: path.to_path_buf(),
                    state,
                    changed: output != source,
                    output,
                    nodes,
                    error: None,
                }
            }
            Err(e) => {
                debug!("{} failed after reaching state '{}'", path.display(), state);
                error!("Leaving {} unchanged: {}", path.display(), e);
                FileOutcome {
                    path: path.to_path_buf(),
                    state: PipelineState::Failed,
                    output: source,
                    changed: false,
                    nodes: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    // Leaves `state` at the last stage reached
    async fn run(
        &self,
        path: &Path,
        source: &str,
        dialect: Dialect,
        state: &mut PipelineState,
    ) -> Result<(String, Vec<NodeReport>), SyntaxError> {
        *state = PipelineState::Pending;
        let mut tree = SourceTree::parse(source, dialect)?;

        *state = PipelineState::Parsed;
        let nodes = apply_translations(&mut tree, self.translator, self.options, path).await?;

        *state = PipelineState::Translated;
        let output = tree.print()?;

        *state = PipelineState::Printed;
        Ok((output, nodes))
    }
}
