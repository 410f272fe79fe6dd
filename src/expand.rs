use crate::{
    CommentRules, DocCommenter, Error, ExtensionPredicate, FormatSettings, LanguageType, LineEnding,
    MemoryBuffer, Result, TextSource,
};
use ignore::Walk;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Configuration for expanding comment triggers in files on disk.
#[derive(Debug, Clone)]
pub struct ExpandConfig {
    /// A file or a directory to walk
    pub root: PathBuf,

    /// Formatting used for the generated blocks. A `system` line ending
    /// follows the line endings already used by each file.
    pub settings: FormatSettings,

    /// File extensions to process
    pub extensions: Vec<String>,

    /// Report the changes without writing them back
    pub dry_run: bool,
}

impl ExpandConfig {
    pub fn new(root: impl Into<PathBuf>, settings: FormatSettings) -> Self {
        Self {
            root: root.into(),
            settings,
            extensions: default_extensions(),
            dry_run: false,
        }
    }
}

fn default_extensions() -> Vec<String> {
    CommentRules::for_language(LanguageType::CSharp)
        .extensions
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// The outcome of expanding one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandReport {
    pub path: PathBuf,

    /// Number of comment blocks generated
    pub blocks: usize,

    /// File content after expansion
    pub content: String,
}

/// Expands every lone `///` line in a set of files, as if the user had just
/// typed it there.
///
/// # Examples
///
/// ```
/// use xmldoc::{Expander, ExpandConfig, FormatSettings};
///
/// let settings = FormatSettings { translate_tabs_to_spaces: true, ..Default::default() };
/// let expander = Expander::new(ExpandConfig::new("src", settings));
///
/// let (content, blocks) = expander.expand_text("    ///\n    public int Count { get; }", "Model.cs");
/// assert_eq!(blocks, 1);
/// assert!(content.starts_with("    /// <summary>"));
/// ```
pub struct Expander {
    config: ExpandConfig,
    filter: ExtensionPredicate,
    commenter: DocCommenter,
}

impl Expander {
    pub fn new(config: ExpandConfig) -> Self {
        let filter = ExtensionPredicate::new(config.extensions.iter().cloned());
        let commenter =
            DocCommenter::new(LanguageType::CSharp).with_predicate(filter.clone());
        Self {
            config,
            filter,
            commenter,
        }
    }

    /// Expand every trigger line in `text`, returning the new content and
    /// the number of blocks generated.
    ///
    /// `path` only decides whether the text is handled at all.
    pub fn expand_text(&self, text: &str, path: impl AsRef<Path>) -> (String, usize) {
        let mut settings = self.config.settings.clone();
        if settings.default_line_ending == LineEnding::System {
            settings.default_line_ending = if text.contains("\r\n") {
                LineEnding::Windows
            } else {
                LineEnding::Unix
            };
        }

        let mut buffer = MemoryBuffer::new(text)
            .with_path(path.as_ref())
            .with_settings(settings);
        let sigil = self.commenter.rules().sigil;
        let mut blocks = 0;
        let mut line = 0;

        while let Some(current) = buffer.line_at(line) {
            if self.commenter.rules().is_trigger(current) {
                let indent = current.chars().take_while(|c| c.is_whitespace()).count();
                buffer.set_caret(line, indent + sigil.chars().count());
                if self.commenter.run(&mut buffer) {
                    blocks += 1;
                }
            }
            line += 1;
        }

        (buffer.into_text(), blocks)
    }

    /// Expand a single file. Returns `None` for files that are not handled.
    pub fn expand_file(&self, path: &Path) -> Result<Option<ExpandReport>> {
        if !self.filter.matches_path(path) {
            return Ok(None);
        }

        let source = fs::read_to_string(path)?;
        let (content, blocks) = self.expand_text(&source, path);
        debug!(path = %path.display(), blocks, "expanded file");

        if blocks > 0 && !self.config.dry_run {
            fs::write(path, &content)?;
        }

        Ok(Some(ExpandReport {
            path: path.to_path_buf(),
            blocks,
            content,
        }))
    }

    /// Expand the configured file or every handled file below the configured
    /// directory. Only files that received at least one block are reported,
    /// sorted by path.
    pub fn run(&self) -> Result<Vec<ExpandReport>> {
        let root = &self.config.root;

        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }

        if root.is_file() {
            if !self.filter.matches_path(root) {
                return Err(Error::InvalidConfig(format!(
                    "{} is not a handled source file",
                    root.display()
                )));
            }
            return Ok(self
                .expand_file(root)?
                .into_iter()
                .filter(|report| report.blocks > 0)
                .collect());
        }

        let mut reports = Vec::new();
        for entry in Walk::new(root).filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            match self.expand_file(path) {
                Ok(Some(report)) if report.blocks > 0 => reports.push(report),
                Ok(_) => {}
                Err(e) => warn!(path = %path.display(), "skipping file: {}", e),
            }
        }

        reports.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(reports)
    }
}
