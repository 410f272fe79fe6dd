//! The host editor seam.
//!
//! The engine never talks to an editor directly. It reads through
//! [`TextSource`] and asks a [`TextSink`] to perform the single write. Any
//! editor integration implements these two traits; [`MemoryBuffer`] is the
//! in-process implementation used by the expander, the CLI and the tests.

use crate::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A selection in the buffer, as byte offsets. Empty when it is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty region at `position`.
    pub fn caret(position: usize) -> Self {
        Self::new(position, position)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The lower bound of the region regardless of its direction.
    pub fn begin(&self) -> usize {
        self.start.min(self.end)
    }
}

/// Line ending preference, using the host settings vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Follow the platform the engine runs on
    #[default]
    System,
    /// Always `\r\n`
    Windows,
    /// Always `\n`
    Unix,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Windows => "\r\n",
            LineEnding::Unix => "\n",
            LineEnding::System if cfg!(windows) => "\r\n",
            LineEnding::System => "\n",
        }
    }
}

/// Formatting settings read from the host.
///
/// Field names follow the Sublime Text settings keys so a
/// `.sublime-settings` object can be deserialized directly. Missing keys
/// fall back to the host defaults.
///
/// # Examples
///
/// ```
/// use xmldoc::{FormatSettings, LineEnding};
///
/// let settings = FormatSettings::from_json(
///     r#"{ "translate_tabs_to_spaces": true, "default_line_ending": "windows" }"#,
/// ).unwrap();
///
/// assert_eq!(settings.tab_size, 8);
/// assert_eq!(settings.indent_char(), ' ');
/// assert_eq!(settings.default_line_ending, LineEnding::Windows);
/// assert_eq!(settings.newline(), "\r\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Width of a tab stop. Indentation is counted in characters, so this is
    /// carried for hosts but does not change the generated block.
    pub tab_size: usize,

    /// Indent with spaces instead of tabs
    pub translate_tabs_to_spaces: bool,

    /// Newline sequence for the generated block
    pub default_line_ending: LineEnding,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            tab_size: 8,
            translate_tabs_to_spaces: false,
            default_line_ending: LineEnding::System,
        }
    }
}

impl FormatSettings {
    /// Parse settings from a JSON object.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load settings from a JSON settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The character repeated to build an indentation prefix.
    pub fn indent_char(&self) -> char {
        if self.translate_tabs_to_spaces {
            ' '
        } else {
            '\t'
        }
    }

    pub fn newline(&self) -> &'static str {
        self.default_line_ending.as_str()
    }
}

/// The single write the engine asks the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Text to insert
    pub text: String,

    /// Byte offset at which the text is inserted
    pub position: usize,

    /// Line the caret moves to after the insertion
    pub caret_line: usize,

    /// Column (in characters) the caret moves to after the insertion
    pub caret_column: usize,
}

/// Read access to a host text buffer.
///
/// Positions are byte offsets into the buffer; columns are counted in
/// characters, the way editors report them.
pub trait TextSource {
    /// Number of lines in the buffer.
    fn line_count(&self) -> usize;

    /// Text of line `index` without its line terminator.
    fn line_at(&self, index: usize) -> Option<&str>;

    /// The `(start, end)` offsets of the line containing `position`.
    fn line_of(&self, position: usize) -> (usize, usize);

    /// The current selection, if the buffer has one.
    fn selection(&self) -> Option<Region>;

    /// The `(line, column)` of `position`.
    fn row_col(&self, position: usize) -> (usize, usize);

    /// The offset of `(line, column)`, clamped to the buffer.
    fn point_of(&self, line: usize, column: usize) -> usize;

    fn format_settings(&self) -> FormatSettings;

    /// First match of `pattern` at or after `from`.
    fn find_pattern(&self, pattern: &Regex, from: usize) -> Option<Region>;

    /// Text covered by `region`.
    fn substr(&self, region: Region) -> &str;

    /// Path of the file backing the buffer, if any.
    fn file_path(&self) -> Option<&Path> {
        None
    }

    /// Name of the syntax definition assigned to the buffer, if any.
    fn syntax(&self) -> Option<&str> {
        None
    }

    /// Text of the line holding the start of the selection.
    fn current_line(&self) -> Option<&str> {
        let region = self.selection()?;
        let (line, _) = self.row_col(region.begin());
        self.line_at(line)
    }
}

/// Write access to a host text buffer.
pub trait TextSink {
    /// Insert the text and move the caret.
    fn apply(&mut self, insertion: &Insertion);
}

/// A plain in-memory text buffer.
///
/// # Examples
///
/// ```
/// use xmldoc::{MemoryBuffer, TextSource};
///
/// let mut buffer = MemoryBuffer::new("class A\n{\n    ///\n    int X;\n}");
/// buffer.set_caret(2, 7);
///
/// assert_eq!(buffer.line_count(), 5);
/// assert_eq!(buffer.current_line(), Some("    ///"));
/// assert_eq!(buffer.row_col(buffer.selection().unwrap().start), (2, 7));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBuffer {
    text: String,
    line_starts: Vec<usize>,
    selection: Option<Region>,
    settings: FormatSettings,
    path: Option<PathBuf>,
    syntax: Option<String>,
}

impl MemoryBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = index_lines(&text);
        Self {
            text,
            line_starts,
            selection: None,
            settings: FormatSettings::default(),
            path: None,
            syntax: None,
        }
    }

    pub fn with_settings(mut self, settings: FormatSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    pub fn select(&mut self, region: Region) {
        self.selection = Some(region);
    }

    /// Place an empty selection at `(line, column)`.
    pub fn set_caret(&mut self, line: usize, column: usize) {
        let point = self.point_of(line, column);
        self.selection = Some(Region::caret(point));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    fn line_bounds(&self, index: usize) -> (usize, usize) {
        let start = self.line_starts[index];
        let mut end = self
            .line_starts
            .get(index + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        if self.text[start..end].ends_with('\r') {
            end -= 1;
        }
        (start, end)
    }

    fn line_index(&self, position: usize) -> usize {
        match self.line_starts.binary_search(&position) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        }
    }
}

fn index_lines(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

impl TextSource for MemoryBuffer {
    fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    fn line_at(&self, index: usize) -> Option<&str> {
        if index >= self.line_starts.len() {
            return None;
        }
        let (start, end) = self.line_bounds(index);
        Some(&self.text[start..end])
    }

    fn line_of(&self, position: usize) -> (usize, usize) {
        self.line_bounds(self.line_index(position.min(self.text.len())))
    }

    fn selection(&self) -> Option<Region> {
        self.selection
    }

    fn row_col(&self, position: usize) -> (usize, usize) {
        let position = position.min(self.text.len());
        let line = self.line_index(position);
        let start = self.line_starts[line];
        let column = self.text.get(start..position).map_or(0, |s| s.chars().count());
        (line, column)
    }

    fn point_of(&self, line: usize, column: usize) -> usize {
        let line = line.min(self.line_starts.len() - 1);
        let (start, end) = self.line_bounds(line);
        self.text[start..end]
            .char_indices()
            .nth(column)
            .map_or(end, |(offset, _)| start + offset)
    }

    fn format_settings(&self) -> FormatSettings {
        self.settings.clone()
    }

    fn find_pattern(&self, pattern: &Regex, from: usize) -> Option<Region> {
        if from > self.text.len() {
            return None;
        }
        pattern
            .find_at(&self.text, from)
            .map(|m| Region::new(m.start(), m.end()))
    }

    fn substr(&self, region: Region) -> &str {
        let start = region.begin().min(self.text.len());
        let end = region.start.max(region.end).min(self.text.len());
        self.text.get(start..end).unwrap_or_default()
    }

    fn file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn syntax(&self) -> Option<&str> {
        self.syntax.as_deref()
    }
}

impl TextSink for MemoryBuffer {
    fn apply(&mut self, insertion: &Insertion) {
        let position = insertion.position.min(self.text.len());
        self.text.insert_str(position, &insertion.text);
        self.line_starts = index_lines(&self.text);
        self.set_caret(insertion.caret_line, insertion.caret_column);
    }
}
