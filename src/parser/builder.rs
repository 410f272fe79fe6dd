use super::{CommentRules, DeclarationCategory};
use crate::FormatSettings;
use regex::Regex;
use std::sync::LazyLock;

/// `Name<T, U>(` right after the return type of a method
static TYPE_PARAMETERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[<>\w\s,\[\]?.]*\s+[A-Za-z_]\w*<([\w\s,]*)>\s*\(").unwrap()
});

/// Whitespace followed by a trailing identifier, `@` verbatim prefix allowed
static PARAMETER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*\s@?([A-Za-z_]\w*)$").unwrap());

/// Where and how a comment block is laid out in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Prefix of every continuation line, before the sigil
    pub indent: String,
    pub newline: &'static str,
    pub sigil: &'static str,
    /// Line holding the trigger sigil
    pub trigger_line: usize,
}

impl Layout {
    /// Derive the layout from the caret sitting right after the sigil.
    ///
    /// The indent has one indent character per column before the sigil.
    pub fn new(
        rules: &CommentRules,
        settings: &FormatSettings,
        trigger_line: usize,
        trigger_column: usize,
    ) -> Self {
        let width = trigger_column.saturating_sub(rules.sigil.len());
        Self {
            indent: std::iter::repeat_n(settings.indent_char(), width).collect(),
            newline: settings.newline(),
            sigil: rules.sigil,
            trigger_line,
        }
    }
}

/// A generated comment and where the caret goes once it is inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// Text inserted right after the trigger sigil
    pub text: String,
    pub caret_line: usize,
    pub caret_column: usize,
}

impl CommentBlock {
    /// Build a block for `declaration`, locating its parameter list on the
    /// same line.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmldoc::{CommentBlock, CommentRules, DeclarationCategory, FormatSettings, LanguageType, Layout};
    ///
    /// let rules = CommentRules::for_language(LanguageType::CSharp);
    /// let settings = FormatSettings::from_json(
    ///     r#"{ "translate_tabs_to_spaces": true, "default_line_ending": "unix" }"#,
    /// ).unwrap();
    /// let layout = Layout::new(&rules, &settings, 10, 7);
    ///
    /// let block = CommentBlock::for_declaration(
    ///     DeclarationCategory::ValueMethod,
    ///     "    public int Compute(int a)",
    ///     &layout,
    /// );
    ///
    /// assert_eq!(
    ///     block.text,
    ///     " <summary>\n    /// \n    /// </summary>\n    /// <param name=\"a\"></param>\n    /// <returns></returns>"
    /// );
    /// assert_eq!((block.caret_line, block.caret_column), (11, 8));
    /// ```
    pub fn for_declaration(
        category: DeclarationCategory,
        declaration: &str,
        layout: &Layout,
    ) -> Self {
        build(
            category,
            declaration,
            ParameterList::locate(declaration),
            layout,
        )
    }
}

struct BlockWriter<'a> {
    layout: &'a Layout,
    text: String,
}

impl<'a> BlockWriter<'a> {
    fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            text: String::from(" <summary>"),
        }
    }

    fn line(&mut self, body: &str) {
        let layout = self.layout;
        self.text.push_str(layout.newline);
        self.text.push_str(&layout.indent);
        self.text.push_str(layout.sigil);
        self.text.push(' ');
        self.text.push_str(body);
    }
}

/// Assemble the comment block for a classified declaration.
///
/// Callables get one `<param>` line per parameter. Value-returning methods
/// also get `<typeparam>` lines for a generic list after the method name and
/// a trailing `<returns>` line. A callable whose parameter list could not be
/// located falls back to the summary-only shape.
pub fn build(
    category: DeclarationCategory,
    declaration: &str,
    parameters: Option<ParameterList<'_>>,
    layout: &Layout,
) -> CommentBlock {
    let mut writer = BlockWriter::new(layout);
    writer.line("");
    writer.line("</summary>");

    let parameters = match parameters {
        Some(parameters) if category.is_callable() => Some(parameters),
        _ => None,
    };

    if let Some(parameters) = parameters {
        if category == DeclarationCategory::ValueMethod {
            for name in type_parameters(declaration) {
                writer.line(&format!("<typeparam name=\"{name}\"></typeparam>"));
            }
        }

        for name in parameters.names() {
            writer.line(&format!("<param name=\"{name}\"></param>"));
        }

        if category == DeclarationCategory::ValueMethod {
            writer.line("<returns></returns>");
        }
    }

    CommentBlock {
        text: writer.text,
        caret_line: layout.trigger_line + 1,
        caret_column: layout.indent.chars().count() + layout.sigil.len() + 1,
    }
}

fn type_parameters(declaration: &str) -> Vec<&str> {
    TYPE_PARAMETERS
        .captures(declaration)
        .and_then(|caps| caps.get(1))
        .map(|list| {
            list.as_str()
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// The raw text between the outer parentheses of a callable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterList<'a> {
    raw: &'a str,
}

impl<'a> ParameterList<'a> {
    /// Find the first `(` in `text` and the `)` that closes it.
    ///
    /// Returns `None` when the parenthesis is never closed, e.g. for a
    /// declaration whose parameters continue on the next line.
    pub fn locate(text: &'a str) -> Option<Self> {
        let open = text.find('(')?;
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for (offset, c) in text[open..].char_indices() {
            if let Some(q) = quote {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    _ if c == q => quote = None,
                    _ => {}
                }
                continue;
            }

            match c {
                '"' | '\'' => quote = Some(c),
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(Self {
                            raw: &text[open + 1..open + offset],
                        });
                    }
                }
                _ => {}
            }
        }

        None
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Parameter names in declaration order.
    ///
    /// Nested bracketed spans and literals are dropped before splitting on
    /// commas, and default values are cut at `=`. Fragments without a
    /// trailing identifier are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmldoc::ParameterList;
    ///
    /// let list = ParameterList::locate(r#"void Log(string msg = "a,b", params object[] args)"#).unwrap();
    /// assert_eq!(list.names(), vec!["msg", "args"]);
    /// ```
    pub fn names(&self) -> Vec<String> {
        top_level(self.raw)
            .split(',')
            .filter_map(|fragment| {
                let fragment = fragment.split('=').next().unwrap_or_default().trim();
                PARAMETER_NAME
                    .captures(fragment)
                    .and_then(|caps| caps.get(1))
                    .map(|name| name.as_str().to_string())
            })
            .collect()
    }
}

/// Keep only the characters outside of nested brackets and literals.
fn top_level(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in raw.chars() {
        if let Some(q) = quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                _ if c == q => quote = None,
                _ => {}
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => output.push(c),
            _ => {}
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LanguageType, LineEnding};

    fn layout(indent: usize) -> Layout {
        let settings = FormatSettings {
            translate_tabs_to_spaces: true,
            default_line_ending: LineEnding::Unix,
            ..Default::default()
        };
        let rules = CommentRules::for_language(LanguageType::CSharp);
        Layout::new(&rules, &settings, 4, indent + 3)
    }

    fn block(line: &str) -> CommentBlock {
        let category = DeclarationCategory::from_shape(line);
        CommentBlock::for_declaration(category, line, &layout(0))
    }

    fn count(text: &str, tag: &str) -> usize {
        text.matches(tag).count()
    }

    #[test]
    fn test_type_gets_summary_only() {
        let block = block("public class Foo");
        assert_eq!(block.text, " <summary>\n/// \n/// </summary>");
        assert_eq!(count(&block.text, "<summary>"), 1);
        assert_eq!(count(&block.text, "<param"), 0);
        assert_eq!(count(&block.text, "<returns>"), 0);
    }

    #[test]
    fn test_void_method_params_in_order() {
        let block = block("private void Bar(int x, string y)");
        assert_eq!(
            block.text,
            " <summary>\n/// \n/// </summary>\n\
             /// <param name=\"x\"></param>\n\
             /// <param name=\"y\"></param>"
        );
        assert_eq!(count(&block.text, "<returns>"), 0);
    }

    #[test]
    fn test_value_method_param_then_returns() {
        let block = block("public int Compute(int a)");
        let param = block.text.find("<param name=\"a\"></param>").unwrap();
        let returns = block.text.find("<returns></returns>").unwrap();
        assert!(param < returns);
        assert_eq!(count(&block.text, "<param"), 1);
        assert_eq!(count(&block.text, "<returns>"), 1);
        assert!(block.text.ends_with("/// <returns></returns>"));
    }

    #[test]
    fn test_constructor_scenario() {
        let line = "public MyClass(int id, string name)";
        assert_eq!(
            DeclarationCategory::from_shape(line),
            DeclarationCategory::Constructor
        );

        let block = block(line);
        assert!(block.text.contains("<param name=\"id\"></param>"));
        assert!(block.text.contains("<param name=\"name\"></param>"));
        assert_eq!(count(&block.text, "<param"), 2);
        assert_eq!(count(&block.text, "<returns>"), 0);
    }

    #[test]
    fn test_type_parameter_before_params() {
        let block = block("    public static T Get<T>(string key)");
        assert_eq!(
            block.text,
            " <summary>\n/// \n/// </summary>\n\
             /// <typeparam name=\"T\"></typeparam>\n\
             /// <param name=\"key\"></param>\n\
             /// <returns></returns>"
        );
    }

    #[test]
    fn test_multiple_type_parameters() {
        let block = block("public TValue Lookup<TKey, TValue>(TKey key)");
        assert!(block.text.contains("<typeparam name=\"TKey\"></typeparam>"));
        assert!(block.text.contains("<typeparam name=\"TValue\"></typeparam>"));
    }

    #[test]
    fn test_generic_return_type_is_not_a_type_parameter() {
        let block = block("public List<T> Items(int count)");
        assert_eq!(count(&block.text, "<typeparam"), 0);
        assert_eq!(count(&block.text, "<param"), 1);
    }

    #[test]
    fn test_quoted_comma() {
        let block = block(r#"Log(string msg = "a,b")"#);
        assert_eq!(count(&block.text, "<param"), 1);
        assert!(block.text.contains("<param name=\"msg\"></param>"));
    }

    #[test]
    fn test_empty_parameter_list() {
        let block = block("public void Run()");
        assert_eq!(block.text, " <summary>\n/// \n/// </summary>");
    }

    #[test]
    fn test_unclosed_parameter_list_degrades_to_summary() {
        let block = block("public int Compute(int a,");
        assert_eq!(block.text, " <summary>\n/// \n/// </summary>");
    }

    #[test]
    fn test_property_ignores_parameters() {
        let parameters = ParameterList::locate("(int a)");
        let block = build(
            DeclarationCategory::Property,
            "public int X",
            parameters,
            &layout(0),
        );
        assert_eq!(block.text, " <summary>\n/// \n/// </summary>");
    }

    #[test]
    fn test_indent_and_caret() {
        let block = CommentBlock::for_declaration(
            DeclarationCategory::VoidMethod,
            "        void Stop(bool force)",
            &layout(8),
        );
        assert_eq!(
            block.text,
            " <summary>\n        /// \n        /// </summary>\n        /// <param name=\"force\"></param>"
        );
        assert_eq!(block.caret_line, 5);
        assert_eq!(block.caret_column, 12);
    }

    #[test]
    fn test_tabs_and_crlf() {
        let rules = CommentRules::for_language(LanguageType::CSharp);
        let settings = FormatSettings {
            translate_tabs_to_spaces: false,
            default_line_ending: LineEnding::Windows,
            ..Default::default()
        };
        let layout = Layout::new(&rules, &settings, 0, 5);
        assert_eq!(layout.indent, "\t\t");

        let block = CommentBlock::for_declaration(DeclarationCategory::Type, "class A", &layout);
        assert_eq!(block.text, " <summary>\r\n\t\t/// \r\n\t\t/// </summary>");
        assert_eq!(block.caret_column, 6);
    }

    #[test]
    fn test_layout_saturates_short_columns() {
        let rules = CommentRules::for_language(LanguageType::CSharp);
        let layout = Layout::new(&rules, &FormatSettings::default(), 0, 1);
        assert!(layout.indent.is_empty());
    }

    #[test]
    fn test_locate_parameter_list() {
        let list = ParameterList::locate("public int Foo(int a) => Bar(a);").unwrap();
        assert_eq!(list.as_str(), "int a");

        let list = ParameterList::locate("void Call(Func<int> f = null, int x = (1 + 2))").unwrap();
        assert_eq!(list.as_str(), "Func<int> f = null, int x = (1 + 2)");

        let list = ParameterList::locate(r#"void Odd(string s = ")")"#).unwrap();
        assert_eq!(list.as_str(), r#"string s = ")""#);

        assert_eq!(ParameterList::locate("public int X;"), None);
        assert_eq!(ParameterList::locate("void Open(int a,"), None);
    }

    #[test]
    fn test_parameter_names() {
        let names = |text| ParameterList::locate(text).unwrap().names();

        assert_eq!(names("()"), Vec::<String>::new());
        assert_eq!(names("(int x)"), vec!["x"]);
        assert_eq!(names("(ref int x, out string y, in Point p)"), vec!["x", "y", "p"]);
        assert_eq!(names("(this IEnumerable<T> source)"), vec!["source"]);
        assert_eq!(names("(Dictionary<string, int> map, int[] values)"), vec!["map", "values"]);
        assert_eq!(names("(int count = 5, char sep = ',')"), vec!["count", "sep"]);
        assert_eq!(names("([FromBody] Item item, int? id)"), vec!["item", "id"]);
        assert_eq!(names("(object @class)"), vec!["class"]);
        // a bare type without a name has no trailing identifier
        assert_eq!(names("(int)"), Vec::<String>::new());
    }
}
