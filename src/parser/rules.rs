use crate::parser::LanguageType;

#[derive(Debug, Clone, Copy)]
pub struct CommentRules {
    /// Marker that starts a documentation comment line
    pub sigil: &'static str,
    /// First character of an attribute line skipped during lookahead
    pub attribute_marker: char,
    /// How many blank or attribute lines the classifier skips before giving up
    pub max_lookahead: usize,
    /// File extensions, without the dot
    pub extensions: &'static [&'static str],
    /// Syntax scope and syntax definition file names
    pub syntax_names: &'static [&'static str],
}

const CSHARP_RULES: CommentRules = CommentRules {
    sigil: "///",
    attribute_marker: '[',
    max_lookahead: 15,
    extensions: &["cs"],
    syntax_names: &["source.cs", "C#.tmLanguage", "C#.sublime-syntax"],
};

const UNKNOWN_RULES: CommentRules = CommentRules {
    sigil: "///",
    attribute_marker: '[',
    max_lookahead: 0,
    extensions: &[],
    syntax_names: &[],
};

impl CommentRules {
    #[inline(always)]
    pub fn for_language(lang: LanguageType) -> Self {
        match lang {
            LanguageType::CSharp => CSHARP_RULES,
            LanguageType::Unknown => UNKNOWN_RULES,
        }
    }

    /// A line holding nothing but the sigil.
    pub fn is_trigger(&self, line: &str) -> bool {
        line.trim() == self.sigil
    }

    /// A line that already continues a documentation comment, such as the
    /// `/// </summary>` of a generated block.
    pub fn is_continuation(&self, line: &str) -> bool {
        line.trim_start().starts_with(self.sigil)
    }

    /// Blank and attribute lines sit between a comment and its declaration.
    pub fn is_skippable(&self, line: &str) -> bool {
        let line = line.trim();
        line.is_empty() || line.starts_with(self.attribute_marker)
    }
}
