//! Comment stripping — the first stage of the pipeline.
//!
//! Consumes raw source text and yields logical, non-empty, trimmed lines
//! with all comments removed. Jack comments do not nest, so the whole
//! algorithm carries exactly one piece of state, `inside_block`, across
//! line boundaries.

/// A source line with comments removed, paired with its 1-based line
/// number in the original file (for diagnostics further down the pipeline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedLine {
    pub line: u32,
    pub text: String,
}

/// Strips `//` and `/* */` comments from `source`, dropping any line that
/// becomes empty once comments and surrounding whitespace are removed.
///
/// A block comment may open and close on one line, span several lines, or
/// appear more than once on a single line. A stray `*/` with no matching
/// open is left as literal text — Jack treats that as a syntax error, but
/// stripping does not flag it.
pub fn strip_comments(source: &str) -> Vec<StrippedLine> {
    let mut inside_block = false;
    let mut out = Vec::new();

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx as u32 + 1;
        let mut rest = raw_line;
        let mut buf = String::new();

        loop {
            if inside_block {
                match rest.find("*/") {
                    Some(pos) => {
                        rest = &rest[pos + 2..];
                        inside_block = false;
                    },
                    None => {
                        rest = "";
                        break;
                    },
                }
            } else {
                match rest.find("/*") {
                    Some(open) => match rest[open + 2..].find("*/") {
                        Some(rel_close) => {
                            let close = open + 2 + rel_close + 2;
                            buf.push_str(&rest[..open]);
                            rest = &rest[close..];
                        },
                        None => {
                            buf.push_str(&rest[..open]);
                            inside_block = true;
                            rest = "";
                            break;
                        },
                    },
                    None => break,
                }
            }
        }

        if !inside_block {
            buf.push_str(rest);
        } else {
            continue;
        }

        let before_line_comment = match buf.find("//") {
            Some(pos) => &buf[..pos],
            None => &buf[..],
        };
        let trimmed = before_line_comment.trim();

        if !trimmed.is_empty() {
            out.push(StrippedLine { line: line_no, text: trimmed.to_string() });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        strip_comments(source).into_iter().map(|l| l.text).collect()
    }

    #[test]
    fn line_comment_is_removed() {
        assert_eq!(texts("let x = 1; // comment"), vec!["let x = 1;"]);
    }

    #[test]
    fn whole_line_comment_is_dropped() {
        assert_eq!(texts("// just a comment\nlet x = 1;"), vec!["let x = 1;"]);
    }

    #[test]
    fn block_comment_on_one_line() {
        assert_eq!(texts("let /* inline */ x = 1;"), vec!["let  x = 1;"]);
    }

    #[test]
    fn block_comment_spanning_lines_collapses_to_one_line() {
        let source = "/* a\nb */ var int i;";
        assert_eq!(texts(source), vec!["var int i;"]);
    }

    #[test]
    fn multiple_block_comments_on_one_line() {
        assert_eq!(texts("/*a*/ x /*b*/ y"), vec!["x  y"]);
    }

    #[test]
    fn line_comment_inside_live_block_comment_is_inert() {
        let source = "/* still open // not a line comment\nclosed */ let x = 1;";
        assert_eq!(texts(source), vec!["let x = 1;"]);
    }

    #[test]
    fn stray_close_without_open_is_literal_text() {
        assert_eq!(texts("x */ y;"), vec!["x */ y;"]);
    }

    #[test]
    fn line_that_is_only_a_comment_is_dropped_entirely() {
        let source = "/* header */\nclass Main {\n}";
        assert_eq!(texts(source), vec!["class Main {", "}"]);
    }

    #[test]
    fn preserves_original_line_numbers_across_dropped_lines() {
        let source = "class Main {\n// skip\n  static int x;\n}";
        let stripped = strip_comments(source);
        assert_eq!(stripped[0].line, 1);
        assert_eq!(stripped[1].line, 3);
        assert_eq!(stripped[1].text, "static int x;");
        assert_eq!(stripped[2].line, 4);
    }

    #[test]
    fn idempotent_on_already_stripped_text() {
        let source = "class Main {\n  static int x;\n}";
        let once = texts(source);
        let twice = texts(&once.join("\n"));
        assert_eq!(once, twice);
    }
}
