mod builder;
mod classifier;
mod rules;

use std::fmt;

pub use builder::{CommentBlock, Layout, ParameterList, build};
pub use classifier::{Classification, Lookahead, classify};
pub use rules::CommentRules;

/// The kind of declaration that follows a comment trigger.
///
/// Exactly one category applies to a classified line. [`Property`] is the
/// fallback for anything the rules do not recognize.
///
/// [`Property`]: DeclarationCategory::Property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeclarationCategory {
    /// Fields, auto-properties and any unrecognized construct
    #[default]
    Property,

    /// A class, interface or enum
    Type,

    /// A method returning `void`
    VoidMethod,

    /// A constructor: access modifiers directly followed by `Name(`
    Constructor,

    /// A method with an explicit, non-void return type
    ValueMethod,
}

impl DeclarationCategory {
    /// Whether the declaration takes a parameter list.
    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            DeclarationCategory::VoidMethod
                | DeclarationCategory::Constructor
                | DeclarationCategory::ValueMethod
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationCategory::Property => "property",
            DeclarationCategory::Type => "type",
            DeclarationCategory::VoidMethod => "void-method",
            DeclarationCategory::Constructor => "constructor",
            DeclarationCategory::ValueMethod => "value-method",
        }
    }
}

impl fmt::Display for DeclarationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the buffer together with its zero-based line index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub index: usize,
    pub text: &'a str,
}

impl<'a> RawLine<'a> {
    pub fn new(index: usize, text: &'a str) -> Self {
        Self { index, text }
    }
}

/// The language type supported by the comment engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageType {
    /// C# source files
    CSharp,
    /// Unknown language (used for unsupported files)
    Unknown,
}
