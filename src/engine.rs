use crate::{
    CommentRules, ExtensionPredicate, Insertion, LanguageType, Region, SyntaxPredicate,
    TextSink, TextSource, TriggerPredicate,
    parser::{Layout, Lookahead, ParameterList, RawLine, build, classify},
    trigger,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static PARAMETER_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*\)").unwrap());

/// The documentation comment engine.
///
/// One engine serves every host: what differs between hosts is how a
/// buffer is recognized as C#, which is the [`TriggerPredicate`].
///
/// # Examples
///
/// ```
/// use xmldoc::{DocCommenter, MemoryBuffer, TextSource};
///
/// let mut buffer = MemoryBuffer::new("///\npublic void Bar(int x, string y)")
///     .with_path("Bar.cs");
/// buffer.set_caret(0, 3);
///
/// assert!(DocCommenter::default().run(&mut buffer));
/// assert!(buffer.text().contains("/// <param name=\"y\"></param>"));
///
/// // the caret sits on the blank summary line
/// let caret = buffer.selection().unwrap();
/// assert_eq!(buffer.row_col(caret.start), (1, 4));
/// ```
pub struct DocCommenter {
    rules: CommentRules,
    predicate: Box<dyn TriggerPredicate>,
}

impl DocCommenter {
    /// Create an engine for `lang`, recognizing buffers by file extension.
    pub fn new(lang: LanguageType) -> Self {
        Self {
            rules: CommentRules::for_language(lang),
            predicate: Box::new(ExtensionPredicate::for_language(lang)),
        }
    }

    /// Replace the predicate deciding which buffers the engine handles.
    pub fn with_predicate(mut self, predicate: impl TriggerPredicate + 'static) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    pub fn rules(&self) -> &CommentRules {
        &self.rules
    }

    /// Compute the insertion for the edit that just happened, if any.
    ///
    /// Returns `None` when the buffer is not handled by this engine or the
    /// caret is not on a comment trigger.
    pub fn on_modified<S: TextSource>(&self, source: &S) -> Option<Insertion> {
        if !self.predicate.applies(source) {
            return None;
        }

        let trigger = trigger::detect(source, &self.rules)?;
        let classification = classify(Lookahead::new(source, trigger.line + 1), &self.rules);
        let declaration = classification.declaration;
        let parameters = declaration.and_then(|line| parameter_span(source, line));

        let layout = Layout::new(
            &self.rules,
            &source.format_settings(),
            trigger.line,
            trigger.column,
        );
        let block = build(
            classification.category,
            declaration.map_or("", |line| line.text),
            parameters,
            &layout,
        );

        debug!(
            line = trigger.line,
            category = %classification.category,
            "generated comment block"
        );

        Some(Insertion {
            text: block.text,
            position: trigger.position,
            caret_line: block.caret_line,
            caret_column: block.caret_column,
        })
    }

    /// Handle an edit on `buffer`, inserting the comment block when the edit
    /// was a trigger. Returns whether anything was inserted.
    pub fn run<B: TextSource + TextSink>(&self, buffer: &mut B) -> bool {
        match self.on_modified(&*buffer) {
            Some(insertion) => {
                buffer.apply(&insertion);
                true
            }
            None => false,
        }
    }
}

impl Default for DocCommenter {
    /// A C# engine accepting `.cs` files as well as buffers with a C# syntax.
    fn default() -> Self {
        let extension = ExtensionPredicate::default();
        let syntax = SyntaxPredicate::default();
        Self::new(LanguageType::CSharp).with_predicate(move |source: &dyn TextSource| {
            extension.applies(source) || syntax.applies(source)
        })
    }
}

/// The parameter list on the declaration line, searched for in the buffer.
fn parameter_span<'a, S: TextSource>(
    source: &'a S,
    declaration: RawLine<'_>,
) -> Option<ParameterList<'a>> {
    let start = source.point_of(declaration.index, 0);
    let (_, end) = source.line_of(start);
    let found = source.find_pattern(&PARAMETER_SPAN, start)?;
    if found.end > end {
        return None;
    }
    ParameterList::locate(source.substr(Region::new(found.start, found.end)))
}
