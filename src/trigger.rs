//! Deciding whether an edit should produce a comment block.

use crate::{CommentRules, LanguageType, TextSource};
use regex::Regex;
use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;

/// Decides whether a buffer holds a language the engine handles.
///
/// Hosts identify files differently, some by file name and some by the
/// syntax assigned to the buffer, so the check is a capability handed to
/// [`DocCommenter`](crate::DocCommenter) rather than baked into it.
pub trait TriggerPredicate {
    fn applies(&self, source: &dyn TextSource) -> bool;
}

impl<F> TriggerPredicate for F
where
    F: Fn(&dyn TextSource) -> bool,
{
    fn applies(&self, source: &dyn TextSource) -> bool {
        self(source)
    }
}

/// Accepts buffers backed by a file with one of the given extensions.
///
/// # Examples
///
/// ```
/// use xmldoc::{ExtensionPredicate, MemoryBuffer, TriggerPredicate};
///
/// let predicate = ExtensionPredicate::default();
/// assert!(predicate.applies(&MemoryBuffer::new("").with_path("Program.cs")));
/// assert!(!predicate.applies(&MemoryBuffer::new("").with_path("main.rs")));
/// assert!(!predicate.applies(&MemoryBuffer::new("")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPredicate {
    extensions: Vec<String>,
}

impl ExtensionPredicate {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| {
                    let ext: String = ext.into();
                    ext.trim_start_matches('.').to_string()
                })
                .collect(),
        }
    }

    pub fn for_language(lang: LanguageType) -> Self {
        Self::new(CommentRules::for_language(lang).extensions.iter().copied())
    }

    pub fn matches_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

impl Default for ExtensionPredicate {
    fn default() -> Self {
        Self::for_language(LanguageType::CSharp)
    }
}

impl TriggerPredicate for ExtensionPredicate {
    fn applies(&self, source: &dyn TextSource) -> bool {
        source.file_path().is_some_and(|path| self.matches_path(path))
    }
}

/// Accepts buffers whose syntax name matches a pattern.
///
/// The default recognizes the C# scope name and the C# syntax definition
/// files (`C#.tmLanguage`, `C#.sublime-syntax`).
#[derive(Debug, Clone)]
pub struct SyntaxPredicate {
    pattern: Option<Regex>,
}

impl SyntaxPredicate {
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern: Some(pattern),
        }
    }

    /// Match a syntax name equal to one of the language's names, or a path
    /// ending with one.
    pub fn for_language(lang: LanguageType) -> Self {
        let names = CommentRules::for_language(lang)
            .syntax_names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        if names.is_empty() {
            return Self { pattern: None };
        }
        Self::new(Regex::new(&format!("(?:^|/)(?:{names})$")).unwrap())
    }
}

impl Default for SyntaxPredicate {
    fn default() -> Self {
        Self::for_language(LanguageType::CSharp)
    }
}

impl TriggerPredicate for SyntaxPredicate {
    fn applies(&self, source: &dyn TextSource) -> bool {
        match (&self.pattern, source.syntax()) {
            (Some(pattern), Some(syntax)) => pattern.is_match(syntax),
            _ => false,
        }
    }
}

/// Where the trigger sigil was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    /// Caret offset, right after the sigil
    pub position: usize,
    pub line: usize,
    pub column: usize,
}

/// Detect a comment trigger at the caret.
///
/// Fires only for an empty selection on a line holding nothing but the
/// sigil, and only when the next line is not already part of a comment.
pub fn detect<S>(source: &S, rules: &CommentRules) -> Option<Trigger>
where
    S: TextSource + ?Sized,
{
    let region = source.selection()?;
    if !region.is_empty() {
        return None;
    }

    let current = source.current_line()?;
    if !rules.is_trigger(current) {
        return None;
    }

    let (line, column) = source.row_col(region.start);
    if source
        .line_at(line + 1)
        .is_some_and(|next| rules.is_continuation(next))
    {
        debug!(line, "comment already present below trigger");
        return None;
    }

    debug!(line, column, "comment trigger detected");
    Some(Trigger {
        position: region.start,
        line,
        column,
    })
}
