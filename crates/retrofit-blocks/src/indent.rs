//! Line indentation helpers shared by the renderer and the extractors.

/// Options for [`add_indent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentOptions {
    /// Spaces prepended to every line
    pub indent: usize,

    /// Overrides `indent` for the first line
    pub start_indent: Option<usize>,

    /// Overrides `indent` for the last line
    pub end_indent: Option<usize>,

    /// Leave empty lines empty instead of padding them
    pub skip_empty: bool,
}

impl Default for IndentOptions {
    fn default() -> Self {
        Self::new(4)
    }
}

impl IndentOptions {
    /// Indent every line by `indent` spaces.
    pub fn new(indent: usize) -> Self {
        Self {
            indent,
            start_indent: None,
            end_indent: None,
            skip_empty: false,
        }
    }

    /// Keep empty lines unindented.
    pub fn skip_empty(mut self) -> Self {
        self.skip_empty = true;
        self
    }

    /// Use a different indentation for the first line.
    pub fn start(mut self, start_indent: usize) -> Self {
        self.start_indent = Some(start_indent);
        self
    }
}

/// Prefix lines of `text` with spaces.
pub fn add_indent(text: &str, options: IndentOptions) -> String {
    let indent_text = " ".repeat(options.indent);
    let start_text = " ".repeat(options.start_indent.unwrap_or(options.indent));
    let end_text = " ".repeat(options.end_indent.unwrap_or(options.indent));

    let lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len() - 1;

    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if options.skip_empty && line.is_empty() {
                return String::new();
            }
            let prefix = if i == 0 {
                &start_text
            } else if i == last {
                &end_text
            } else {
                &indent_text
            };
            format!("{prefix}{line}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Column of the first non-whitespace character.
///
/// With `last_line` the last line of `text` is measured, otherwise the first
/// line that has any content. Blank input yields 0.
pub fn find_indent(text: &str, last_line: bool) -> usize {
    let line = if last_line {
        text.split('\n').next_back().unwrap_or("")
    } else {
        text.split('\n')
            .find(|line| !line.trim().is_empty())
            .unwrap_or("")
    };
    leading_whitespace(line).unwrap_or(0)
}

/// Strip up to `columns` leading whitespace characters from every line.
///
/// Whitespace-only lines are left untouched.
pub fn remove_indent(text: &str, columns: usize) -> String {
    text.split('\n')
        .map(|line| {
            let strip = leading_whitespace(line).unwrap_or(0).min(columns);
            match line.char_indices().nth(strip) {
                Some((offset, _)) => &line[offset..],
                None => "",
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn leading_whitespace(line: &str) -> Option<usize> {
    line.chars().position(|c| !c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn indents_every_line() {
        assert_eq!(add_indent("a\nb", IndentOptions::new(2)), "  a\n  b");
    }

    #[test]
    fn skip_empty_keeps_blank_lines_bare() {
        let text = add_indent("a\n\nb", IndentOptions::new(4).skip_empty());
        assert_eq!(text, "    a\n\n    b");
    }

    #[test]
    fn start_indent_overrides_first_line() {
        let text = add_indent(" x\ny", IndentOptions::new(4).start(0));
        assert_eq!(text, " x\n    y");
    }

    #[test]
    fn finds_indent_of_last_line() {
        assert_eq!(find_indent("foo\n        bar\n    }", true), 4);
        assert_eq!(find_indent("   \n  first", false), 2);
        assert_eq!(find_indent("", true), 0);
    }

    #[test]
    fn removes_common_indent() {
        let text = "() => {\n        call();\n    }";
        assert_eq!(remove_indent(text, 4), "() => {\n    call();\n}");
    }

    #[test]
    fn remove_indent_never_strips_content() {
        assert_eq!(remove_indent("  a\nb\n    ", 4), "a\nb\n    ");
    }
}
