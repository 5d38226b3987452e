//! Delimiter region matching and bracket-aware splitting.
//!
//! The region functions do a single linear scan per delimiter: the closer is
//! the *first* occurrence after the opener, not the balanced one. Callers
//! that need balance use [`split_text`].

use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on regions collected by [`match_text_areas`].
pub const MAX_AREAS: usize = 4096;

/// A literal or regex delimiter.
#[derive(Debug, Clone, Copy)]
pub enum Delimiter<'a> {
    Literal(&'a str),
    Pattern(&'a Regex),
}

impl<'a> From<&'a str> for Delimiter<'a> {
    fn from(text: &'a str) -> Self {
        Delimiter::Literal(text)
    }
}

impl<'a> From<&'a String> for Delimiter<'a> {
    fn from(text: &'a String) -> Self {
        Delimiter::Literal(text)
    }
}

impl<'a> From<&'a Regex> for Delimiter<'a> {
    fn from(regex: &'a Regex) -> Self {
        Delimiter::Pattern(regex)
    }
}

struct Found {
    start: usize,
    end: usize,
    groups: Vec<Option<String>>,
}

impl Delimiter<'_> {
    fn find(&self, text: &str) -> Option<Found> {
        match self {
            Delimiter::Literal(literal) => text.find(literal).map(|start| Found {
                start,
                end: start + literal.len(),
                groups: vec![Some(literal.to_string())],
            }),
            Delimiter::Pattern(regex) => regex.captures(text).and_then(|caps| {
                let whole = caps.get(0)?;
                Some(Found {
                    start: whole.start(),
                    end: whole.end(),
                    groups: caps
                        .iter()
                        .map(|group| group.map(|m| m.as_str().to_string()))
                        .collect(),
                })
            }),
        }
    }
}

/// One delimiter occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchArea {
    /// Capture groups of the delimiter (group 0 is the whole match); empty when not found
    pub groups: Vec<Option<String>>,

    /// Byte offset of the delimiter in the searched text
    pub index: Option<usize>,

    /// Text from the match point (opener) or up to it (closer)
    pub text: String,

    /// `text` without the delimiter itself
    pub original_text: String,
}

impl MatchArea {
    pub fn is_match(&self) -> bool {
        self.index.is_some()
    }

    /// Capture group `i`, if it participated in the match.
    pub fn group(&self, i: usize) -> Option<&str> {
        self.groups.get(i).and_then(|g| g.as_deref())
    }
}

/// A region between an opener and a closer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub opener: MatchArea,
    pub closer: MatchArea,

    /// The region (including delimiters when they were kept)
    pub text: String,

    /// The region without delimiters
    pub original_text: String,
}

/// Locate the first `open` in `text` and return everything from it onward.
pub fn match_text_open<'a>(
    text: &str,
    open: impl Into<Delimiter<'a>>,
    keep_delimiter: bool,
) -> MatchArea {
    let Some(found) = open.into().find(text) else {
        return MatchArea::default();
    };
    let original_text = text[found.end..].to_string();

    MatchArea {
        text: if keep_delimiter {
            text[found.start..].to_string()
        } else {
            original_text.clone()
        },
        original_text,
        groups: found.groups,
        index: Some(found.start),
    }
}

/// Locate the first `close` in `text` and return everything before it.
pub fn match_text_close<'a>(
    text: &str,
    close: impl Into<Delimiter<'a>>,
    keep_delimiter: bool,
) -> MatchArea {
    let Some(found) = close.into().find(text) else {
        return MatchArea::default();
    };
    let original_text = text[..found.start].to_string();

    MatchArea {
        text: if keep_delimiter {
            text[..found.end].to_string()
        } else {
            original_text.clone()
        },
        original_text,
        groups: found.groups,
        index: Some(found.start),
    }
}

/// The span between the first `open` and the first following `close`.
pub fn match_text_area<'a, 'b>(
    text: &str,
    open: impl Into<Delimiter<'a>>,
    close: impl Into<Delimiter<'b>>,
    keep_delimiter: bool,
) -> MatchResult {
    let close = close.into();
    let opener = match_text_open(text, open, keep_delimiter);
    let closer = match_text_close(&opener.text, close, keep_delimiter);
    let region = closer.text.clone();

    let original_text = if keep_delimiter {
        match_text_close(&opener.original_text, close, false).text
    } else {
        region.clone()
    };

    MatchResult {
        opener,
        closer,
        text: region,
        original_text,
    }
}

/// Every non-overlapping region, in order.
pub fn match_text_areas<'a, 'b>(
    text: &str,
    open: impl Into<Delimiter<'a>>,
    close: impl Into<Delimiter<'b>>,
    keep_delimiter: bool,
) -> Vec<MatchResult> {
    let open = open.into();
    let close = close.into();
    let mut areas = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let area = match_text_area(rest, open, close, keep_delimiter);

        if area.text.is_empty() {
            break;
        }
        let (Some(open_at), Some(close_at)) = (area.opener.index, area.closer.index) else {
            break;
        };
        // closer offsets are relative to the opener's text
        let base = if keep_delimiter {
            open_at
        } else {
            open_at + area.opener.groups[0].as_deref().map_or(0, str::len)
        };
        let close_len = area.closer.groups[0].as_deref().map_or(0, str::len);
        let advance = (base + close_at + close_len).max(1);

        areas.push(area);
        if areas.len() >= MAX_AREAS {
            tracing::warn!("Stopped collecting regions after {} matches", MAX_AREAS);
            break;
        }
        rest = rest.get(advance..).unwrap_or("");
    }
    areas
}

/// How [`split_text`] cuts top-level text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Separator {
    /// Split at a character (`,` for argument and specifier lists)
    Char(char),
    /// Split at whitespace (attribute lists)
    Whitespace,
    /// Top-level groups opened by these characters become their own
    /// segments; the text runs between them are segments too
    Groups(Vec<char>),
}

/// A nesting pair. Pairs whose open and close are equal are quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenClose {
    pub open: char,
    pub close: char,
}

impl OpenClose {
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    fn is_quote(&self) -> bool {
        self.open == self.close
    }
}

/// Parentheses, brackets, braces and string quotes.
pub const DEFAULT_PAIRS: &[OpenClose] = &[
    OpenClose::new('(', ')'),
    OpenClose::new('[', ']'),
    OpenClose::new('{', '}'),
    OpenClose::new('"', '"'),
    OpenClose::new('\'', '\''),
    OpenClose::new('`', '`'),
];

static MARKUP_IGNORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=>|\s>=?\s|\s<=?\s").expect("Invalid markup ignore regex"));

/// Options for [`split_text`].
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub separator: Separator,
    pub pairs: Vec<OpenClose>,

    /// Matches that never open or close a pair (`=>` inside markup)
    pub ignore: Option<Regex>,

    /// Stop after the first segment
    pub first_only: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            separator: Separator::Char(','),
            pairs: DEFAULT_PAIRS.to_vec(),
            ignore: None,
            first_only: false,
        }
    }
}

impl SplitOptions {
    /// Whitespace-separated attribute list.
    pub fn attributes() -> Self {
        Self {
            separator: Separator::Whitespace,
            ..Self::default()
        }
    }

    /// Tag stream: each `<...>` is a segment, text between tags is a segment.
    pub fn markup() -> Self {
        Self {
            separator: Separator::Groups(vec!['<']),
            pairs: vec![
                OpenClose::new('(', ')'),
                OpenClose::new('[', ']'),
                OpenClose::new('{', '}'),
                OpenClose::new('"', '"'),
                OpenClose::new('\'', '\''),
                OpenClose::new('`', '`'),
                OpenClose::new('<', '>'),
            ],
            ignore: Some(MARKUP_IGNORE_RE.clone()),
            first_only: false,
        }
    }

    /// First bracketed group (call arguments, array or object literal).
    pub fn first_group() -> Self {
        Self {
            separator: Separator::Groups(vec!['(', '[', '{']),
            first_only: true,
            ..Self::default()
        }
    }
}

/// Split `text` at top level, tracking bracket and quote nesting.
///
/// Segments are trimmed; empty segments are dropped.
pub fn split_text(text: &str, options: &SplitOptions) -> Vec<String> {
    let ignored: Vec<(usize, usize)> = options
        .ignore
        .as_ref()
        .map(|re| re.find_iter(text).map(|m| (m.start(), m.end())).collect())
        .unwrap_or_default();
    let group_openers: &[char] = match &options.separator {
        Separator::Groups(openers) => openers,
        _ => &[],
    };
    let groups_mode = matches!(options.separator, Separator::Groups(_));

    let mut segments: Vec<String> = Vec::new();
    let push = |segments: &mut Vec<String>, piece: &str| {
        let piece = piece.trim();
        if !piece.is_empty() {
            segments.push(piece.to_string());
        }
        options.first_only && !segments.is_empty()
    };

    let mut stack: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut segment_group = false;
    let mut start = 0;
    let mut skip_until = 0;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if i < skip_until {
            continue;
        }
        let next = i + c.len_utf8();

        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if let Some(&(_, end)) = ignored.iter().find(|(s, _)| *s == i) {
            skip_until = end;
            continue;
        }

        if stack.last() == Some(&c) {
            stack.pop();
            if stack.is_empty() && segment_group {
                segment_group = false;
                if push(&mut segments, &text[start..next]) {
                    return segments;
                }
                start = next;
            }
            continue;
        }

        if let Some(pair) = options.pairs.iter().find(|pair| pair.open == c) {
            if pair.is_quote() {
                // quotes in free text between tags are apostrophes, not strings
                if !(groups_mode && stack.is_empty()) {
                    quote = Some(c);
                }
                continue;
            }
            if stack.is_empty() && group_openers.contains(&c) {
                if push(&mut segments, &text[start..i]) {
                    return segments;
                }
                start = i;
                segment_group = true;
            }
            stack.push(pair.close);
            continue;
        }

        if stack.is_empty() {
            let cut = match options.separator {
                Separator::Char(separator) => c == separator,
                Separator::Whitespace => c.is_whitespace(),
                Separator::Groups(_) => false,
            };
            if cut {
                if push(&mut segments, &text[start..i]) {
                    return segments;
                }
                start = next;
            }
        }
    }

    push(&mut segments, &text[start..]);
    segments
}

/// Split at top-level commas.
pub fn split_comma(text: &str) -> Vec<String> {
    split_text(text, &SplitOptions::default())
}

/// The first top-level bracketed group of `text`, delimiters included.
pub fn first_group(text: &str) -> Option<String> {
    split_text(text, &SplitOptions::first_group())
        .into_iter()
        .next()
        .filter(|segment| segment.starts_with(['(', '[', '{']))
}
