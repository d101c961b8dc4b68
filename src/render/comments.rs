//! Comment removal for source files.
//!
//! Stripping keeps every newline so line numbers in the exported content
//! still match the original file.

/// Extensions whose comments are stripped unless configured otherwise.
pub const DEFAULT_STRIP_EXTENSIONS: &[&str] = &[
    "js", "ts", "jsx", "tsx", "css", "less", "scss", "html", "xml", "svg", "yaml", "yml", "py",
    "rb", "php", "java", "c", "cpp", "cs", "go", "rs", "swift", "kt",
];

/// Removes comments from file content.
pub trait CommentStripper {
    /// Stripped content, or `None` when the extension is not supported.
    fn strip(&self, content: &str, extension: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy)]
struct Syntax {
    line: &'static [&'static str],
    block: Option<(&'static str, &'static str)>,
    quotes: &'static [char],
    /// Quotes without escapes that may span lines, like Go's backtick strings.
    raw_quotes: &'static [char],
}

const C_LIKE: Syntax =
    Syntax { line: &["//"], block: Some(("/*", "*/")), quotes: &['"', '\''], raw_quotes: &[] };
const GO: Syntax =
    Syntax { line: &["//"], block: Some(("/*", "*/")), quotes: &['"', '\''], raw_quotes: &['`'] };
const JS_LIKE: Syntax = Syntax {
    line: &["//"],
    block: Some(("/*", "*/")),
    quotes: &['"', '\'', '`'],
    raw_quotes: &[],
};
// Single quotes are lifetimes and char literals in Rust.
const RUST: Syntax =
    Syntax { line: &["//"], block: Some(("/*", "*/")), quotes: &['"'], raw_quotes: &[] };
const CSS: Syntax =
    Syntax { line: &[], block: Some(("/*", "*/")), quotes: &['"', '\''], raw_quotes: &[] };
const PHP: Syntax = Syntax {
    line: &["//", "#"],
    block: Some(("/*", "*/")),
    quotes: &['"', '\''],
    raw_quotes: &[],
};
const HASH: Syntax = Syntax { line: &["#"], block: None, quotes: &['"', '\''], raw_quotes: &[] };
// Apostrophes in plain YAML scalars are text, not quotes.
const YAML: Syntax = Syntax { line: &["#"], block: None, quotes: &['"'], raw_quotes: &[] };
const MARKUP: Syntax =
    Syntax { line: &[], block: Some(("<!--", "-->")), quotes: &[], raw_quotes: &[] };

fn syntax_for(extension: &str) -> Option<Syntax> {
    let syntax = match extension {
        "js" | "ts" | "jsx" | "tsx" => JS_LIKE,
        "less" | "scss" | "java" | "c" | "cpp" | "cs" | "swift" | "kt" => C_LIKE,
        "go" => GO,
        "rs" => RUST,
        "css" => CSS,
        "php" => PHP,
        "py" | "rb" => HASH,
        "yaml" | "yml" => YAML,
        "html" | "xml" | "svg" => MARKUP,
        _ => return None,
    };
    Some(syntax)
}

/// Built-in lexical stripper limited to a configured extension list.
#[derive(Debug, Clone)]
pub struct BuiltinStripper {
    extensions: Vec<String>,
}

impl BuiltinStripper {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }
}

impl Default for BuiltinStripper {
    fn default() -> Self {
        Self::new(DEFAULT_STRIP_EXTENSIONS)
    }
}

impl CommentStripper for BuiltinStripper {
    fn strip(&self, content: &str, extension: &str) -> Option<String> {
        let extension = extension.to_ascii_lowercase();
        if !self.extensions.iter().any(|e| *e == extension) {
            return None;
        }
        syntax_for(&extension).map(|syntax| strip_with(content, syntax))
    }
}

fn strip_with(content: &str, syntax: Syntax) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(c) = rest.chars().next() {
        if syntax.raw_quotes.contains(&c) {
            let len = raw_literal_len(rest, c);
            out.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }

        if syntax.quotes.contains(&c) {
            let len = string_literal_len(rest, c);
            out.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }

        if syntax.line.iter().any(|token| rest.starts_with(token)) {
            let end = rest.find('\n').unwrap_or(rest.len());
            rest = &rest[end..];
            continue;
        }

        if let Some((open, close)) = syntax.block {
            if rest.starts_with(open) {
                let end = rest[open.len()..]
                    .find(close)
                    .map(|i| open.len() + i + close.len())
                    .unwrap_or(rest.len());
                out.extend(rest[..end].chars().filter(|&ch| ch == '\n'));
                rest = &rest[end..];
                continue;
            }
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Byte length of the string literal at the start of `s`, closing quote
/// included. Unterminated `'`/`"` literals end at the line break.
fn string_literal_len(s: &str, quote: char) -> usize {
    let multiline = quote == '`';
    let mut escaped = false;
    for (i, ch) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return i + ch.len_utf8();
        } else if ch == '\n' && !multiline {
            return i;
        }
    }
    s.len()
}

/// Byte length of a raw literal: everything up to the next `quote`.
fn raw_literal_len(s: &str, quote: char) -> usize {
    s[quote.len_utf8()..]
        .find(quote)
        .map(|i| i + 2 * quote.len_utf8())
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(content: &str, ext: &str) -> Option<String> {
        BuiltinStripper::default().strip(content, ext)
    }

    #[test]
    fn test_c_like_comments_removed_newlines_kept() {
        let src = "let a = 1; // one\n/* block\nspans */let b = 2;\n";
        assert_eq!(strip(src, "ts").unwrap(), "let a = 1; \n\nlet b = 2;\n");
    }

    #[test]
    fn test_comment_markers_inside_strings_survive() {
        let src = "const url = \"http://example.com\"; // trailing\n";
        assert_eq!(strip(src, "js").unwrap(), "const url = \"http://example.com\"; \n");

        let src = "s = '# not a comment'  # comment\n";
        assert_eq!(strip(src, "py").unwrap(), "s = '# not a comment'  \n");
    }

    #[test]
    fn test_rust_lifetimes_do_not_open_strings() {
        let src = "fn f<'a>(x: &'a str) {} // done\n";
        assert_eq!(strip(src, "rs").unwrap(), "fn f<'a>(x: &'a str) {} \n");
    }

    #[test]
    fn test_yaml_apostrophe_does_not_hide_comment() {
        let src = "title: don't  # note\nname: \"a # b\" # c\n";
        assert_eq!(strip(src, "yaml").unwrap(), "title: don't  \nname: \"a # b\" \n");
    }

    #[test]
    fn test_go_raw_strings_are_kept() {
        let src = "p := `//x\n/* y */ C:\\` // gone\n";
        assert_eq!(strip(src, "go").unwrap(), "p := `//x\n/* y */ C:\\` \n");
    }

    #[test]
    fn test_markup_comments() {
        let src = "<a>\n<!-- note\nmore -->\n<b/>\n";
        assert_eq!(strip(src, "html").unwrap(), "<a>\n\n\n<b/>\n");
    }

    #[test]
    fn test_css_has_no_line_comments() {
        let src = "a { background: url(//cdn/x.png); } /* c */\n";
        assert_eq!(strip(src, "css").unwrap(), "a { background: url(//cdn/x.png); } \n");
    }

    #[test]
    fn test_unsupported_extension_returns_none() {
        assert!(strip("# heading", "md").is_none());
        assert!(BuiltinStripper::new(["py"]).strip("// x", "ts").is_none());
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        assert_eq!(strip("x # c\n", "PY").unwrap(), "x \n");
    }
}
