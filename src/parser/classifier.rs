//! Declaration classification.
//!
//! A declaration is recognized by its shape on a single line (keyword,
//! identifier, optional parenthesis), not by parsing the language. The rules
//! are tried in order and the first match wins, so a callable without a
//! separate return type word is taken as a constructor before the generic
//! value-returning method rule gets a chance.

use super::{CommentRules, DeclarationCategory, RawLine};
use crate::TextSource;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Declaration shapes in priority order.
const DECLARATION_PATTERNS: &[(DeclarationCategory, &str)] = &[
    // [modifiers] class|interface|enum Name
    (
        DeclarationCategory::Type,
        r"^\s*(?:[a-z]\w*\s+)*(?:class|interface|enum)\s+[A-Za-z_]\w*",
    ),
    // [modifiers] void Name(
    (
        DeclarationCategory::VoidMethod,
        r"^\s*(?:[a-z]\w*\s+)*void\s+[A-Za-z_]\w*\s*\(",
    ),
    // [access modifiers] Name(
    (
        DeclarationCategory::Constructor,
        r"^\s*(?:(?:public|private|internal|protected)\s+)*[A-Za-z_]\w*\s*\(",
    ),
    // [modifiers] ReturnType<...> Name<...>(
    (
        DeclarationCategory::ValueMethod,
        r"^\s*[<>\w\s,\[\]?.]*\s+[A-Za-z_]\w*(?:<[\w\s,]*>)?\s*\(",
    ),
];

static DECLARATION_RULES: LazyLock<Vec<(DeclarationCategory, Regex)>> = LazyLock::new(|| {
    DECLARATION_PATTERNS
        .iter()
        .map(|(category, pattern)| (*category, Regex::new(pattern).unwrap()))
        .collect()
});

impl DeclarationCategory {
    /// Classify a single declaration line by its shape.
    ///
    /// This does not skip blank or attribute lines; use [`classify`] for that.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmldoc::DeclarationCategory;
    ///
    /// assert_eq!(DeclarationCategory::from_shape("public class Foo"), DeclarationCategory::Type);
    /// assert_eq!(DeclarationCategory::from_shape("public MyClass(int id)"), DeclarationCategory::Constructor);
    /// assert_eq!(DeclarationCategory::from_shape("public int Count { get; }"), DeclarationCategory::Property);
    /// ```
    pub fn from_shape(line: &str) -> Self {
        DECLARATION_RULES
            .iter()
            .find(|(_, pattern)| pattern.is_match(line))
            .map(|(category, _)| *category)
            .unwrap_or_default()
    }
}

/// The outcome of classifying the code below a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub category: DeclarationCategory,

    /// The line the category was read from, `None` when the lookahead ran
    /// out before reaching a declaration.
    pub declaration: Option<RawLine<'a>>,
}

/// Lines of a [`TextSource`] from a starting index to the end of the buffer.
pub struct Lookahead<'a, S: ?Sized> {
    source: &'a S,
    next: usize,
}

impl<'a, S: TextSource + ?Sized> Lookahead<'a, S> {
    pub fn new(source: &'a S, start: usize) -> Self {
        Self {
            source,
            next: start,
        }
    }
}

impl<'a, S: TextSource + ?Sized> Iterator for Lookahead<'a, S> {
    type Item = RawLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.source.line_at(self.next)?;
        let line = RawLine::new(self.next, text);
        self.next += 1;
        Some(line)
    }
}

/// Classify the first declaration in `lines`.
///
/// Blank and attribute lines are skipped, at most `rules.max_lookahead` of
/// them. Past that, or when the lines run out, the result is
/// [`DeclarationCategory::Property`].
///
/// # Examples
///
/// ```
/// use xmldoc::{classify, CommentRules, DeclarationCategory, LanguageType, RawLine};
///
/// let rules = CommentRules::for_language(LanguageType::CSharp);
/// let lines = ["", "    [HttpGet]", "    public void Get(int id)"];
/// let result = classify(
///     lines.iter().enumerate().map(|(i, text)| RawLine::new(i, text)),
///     &rules,
/// );
///
/// assert_eq!(result.category, DeclarationCategory::VoidMethod);
/// assert_eq!(result.declaration.map(|line| line.index), Some(2));
/// ```
pub fn classify<'a, I>(lines: I, rules: &CommentRules) -> Classification<'a>
where
    I: IntoIterator<Item = RawLine<'a>>,
{
    let mut skipped = 0;

    for line in lines {
        if !rules.is_skippable(line.text) {
            let category = DeclarationCategory::from_shape(line.text);
            debug!(line = line.index, %category, "classified declaration");
            return Classification {
                category,
                declaration: Some(line),
            };
        }

        if skipped >= rules.max_lookahead {
            debug!(line = line.index, "lookahead limit reached");
            break;
        }
        skipped += 1;
    }

    Classification {
        category: DeclarationCategory::Property,
        declaration: None,
    }
}
