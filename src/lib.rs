//! # xmldoc
//!
//! `xmldoc` generates XML documentation comment skeletons for C# source.
//! Type `///` alone on the line above a declaration and the engine inspects
//! the code below it, decides what kind of declaration it is, and produces a
//! `<summary>` block with `<param>`, `<typeparam>` and `<returns>` tags where
//! they apply, indented to match and with the caret placed inside the
//! summary.
//!
//! ## Features
//!
//! - **Editor independent**: the engine reads through the [`TextSource`] trait
//!   and writes through [`TextSink`], so any host can plug it in
//! - **Declaration heuristics**: classes, void methods, constructors,
//!   value-returning methods and properties are recognized from one line of
//!   code, skipping blank and attribute lines in between
//! - **Parameter extraction**: commas inside string literals, nested calls
//!   and generic arguments never split a parameter
//! - **Batch expansion**: [`Expander`] fills in every pending `///` line in a
//!   file or a directory tree
//!
//! ## Quick Start
//!
//! ```rust
//! use xmldoc::{DocCommenter, FormatSettings, LineEnding, MemoryBuffer};
//!
//! let settings = FormatSettings {
//!     translate_tabs_to_spaces: true,
//!     default_line_ending: LineEnding::Unix,
//!     ..Default::default()
//! };
//! let mut buffer = MemoryBuffer::new("    ///\n    public int Compute(int a)")
//!     .with_path("Calculator.cs")
//!     .with_settings(settings);
//!
//! // the user just typed the sigil
//! buffer.set_caret(0, 7);
//!
//! let commenter = DocCommenter::default();
//! assert!(commenter.run(&mut buffer));
//! assert_eq!(
//!     buffer.text(),
//!     "    /// <summary>\n    /// \n    /// </summary>\n    /// <param name=\"a\"></param>\n    /// <returns></returns>\n    public int Compute(int a)"
//! );
//! ```
//!
//! ## Classification
//!
//! Classification works on single lines and never fails. Anything it does
//! not recognize is documented like a property:
//!
//! ```rust
//! use xmldoc::DeclarationCategory;
//!
//! assert_eq!(DeclarationCategory::from_shape("public class Foo"), DeclarationCategory::Type);
//! assert_eq!(DeclarationCategory::from_shape("private void Bar(int x)"), DeclarationCategory::VoidMethod);
//! assert_eq!(DeclarationCategory::from_shape("public Foo(int id)"), DeclarationCategory::Constructor);
//! assert_eq!(DeclarationCategory::from_shape("public int Compute(int a)"), DeclarationCategory::ValueMethod);
//! assert_eq!(DeclarationCategory::from_shape("x += 1;"), DeclarationCategory::Property);
//! ```
//!
//! ## Error Handling
//!
//! Only the file based [`Expander`] can fail, with the crate [`Error`]:
//!
//! ```rust
//! use xmldoc::{Error, ExpandConfig, Expander, FormatSettings};
//!
//! let expander = Expander::new(ExpandConfig::new("nonexistent", FormatSettings::default()));
//!
//! if let Err(err) = expander.run() {
//!     eprintln!("Failed to expand comments: {}", err);
//!     assert!(matches!(err, Error::PathNotFound(_)));
//! }
//! ```

mod engine;
mod error;
mod expand;
mod parser;
mod source;
mod trigger;

pub use engine::DocCommenter;
pub use error::{Error, Result};
pub use expand::{ExpandConfig, ExpandReport, Expander};
pub use parser::*;
pub use source::{
    FormatSettings, Insertion, LineEnding, MemoryBuffer, Region, TextSink, TextSource,
};
pub use trigger::{ExtensionPredicate, SyntaxPredicate, Trigger, TriggerPredicate, detect};
