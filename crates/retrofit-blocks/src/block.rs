//! Code block model and pure builders.
//!
//! Builders only assemble the tree; nothing here renders.

use indexmap::IndexMap;

/// A node of the generated-source document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeBlock {
    /// A literal leaf (or a flat run of nested blocks)
    Text(TextBlock),
    /// A delimited group: opener, contents, closer
    Group(GroupBlock),
}

/// Value of a [`TextBlock`].
#[derive(Debug, Clone, PartialEq)]
pub enum TextValue {
    Text(String),
    Blocks(Vec<CodeBlock>),
}

/// A literal leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub value: TextValue,

    /// Opens a tag pair when rendered as an inline sequence
    pub is_open: bool,

    /// Closes a tag pair when rendered as an inline sequence
    pub is_close: bool,
}

/// A group rendered as `opener contents closer`.
///
/// `value` always starts with the opener leaf and ends with the closer leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBlock {
    pub value: Vec<CodeBlock>,

    /// Space after the opener in inline mode
    pub padding: bool,

    /// Space before the closer in inline mode (defaults to `padding`)
    pub last_padding: Option<bool>,

    /// Always multi-line (function and class bodies)
    pub area: bool,

    /// Put the closer on its own line in wrapped mode
    pub last_line_break: bool,

    /// Inline rendering longer than this wraps; 0 never wraps
    pub max_length: usize,

    /// Separator between contents
    pub suffix: String,

    pub is_open: bool,
    pub is_close: bool,
}

impl Default for GroupBlock {
    fn default() -> Self {
        Self {
            value: Vec::new(),
            padding: false,
            last_padding: None,
            area: false,
            last_line_break: true,
            max_length: 0,
            suffix: ",".to_string(),
            is_open: false,
            is_close: false,
        }
    }
}

impl GroupBlock {
    /// Create a group from opener text, contents and closer text.
    pub fn new(open: &str, blocks: Vec<CodeBlock>, close: &str) -> Self {
        let mut value = Vec::with_capacity(blocks.len() + 2);
        value.push(text_block(open));
        value.extend(blocks);
        value.push(text_block(close));

        Self {
            value,
            ..Self::default()
        }
    }

    /// Opener, contents and closer. Groups with fewer than two blocks have
    /// no contents.
    pub fn parts(&self) -> (Option<&CodeBlock>, &[CodeBlock], Option<&CodeBlock>) {
        match self.value.len() {
            0 => (None, &[], None),
            1 => (self.value.first(), &[], None),
            len => (
                self.value.first(),
                &self.value[1..len - 1],
                self.value.last(),
            ),
        }
    }
}

impl CodeBlock {
    pub fn is_open(&self) -> bool {
        match self {
            CodeBlock::Text(block) => block.is_open,
            CodeBlock::Group(block) => block.is_open,
        }
    }

    pub fn is_close(&self) -> bool {
        match self {
            CodeBlock::Text(block) => block.is_close,
            CodeBlock::Group(block) => block.is_close,
        }
    }
}

impl From<GroupBlock> for CodeBlock {
    fn from(block: GroupBlock) -> Self {
        CodeBlock::Group(block)
    }
}

/// Element of a [`join_blocks`] pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Joiner {
    /// Placeholder for the element being joined (`$`)
    Item,
    Block(CodeBlock),
}

/// Keyword of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Var => "var",
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
        }
    }
}

pub fn text_block(text: impl Into<String>) -> CodeBlock {
    CodeBlock::Text(TextBlock {
        value: TextValue::Text(text.into()),
        is_open: false,
        is_close: false,
    })
}

pub fn line_break_block() -> CodeBlock {
    text_block("\n")
}

pub fn empty_block() -> CodeBlock {
    text_block("")
}

pub fn comma_block() -> CodeBlock {
    text_block(",")
}

/// Concatenate blocks into a single leaf without a separator.
pub fn flock_blocks(blocks: Vec<CodeBlock>) -> CodeBlock {
    CodeBlock::Text(TextBlock {
        value: TextValue::Blocks(blocks),
        is_open: false,
        is_close: false,
    })
}

/// `<target attr attr>` (or `/>` when `inline`), wrapping attributes past 100 columns.
pub fn open_tag_block(target: &str, attributes: Vec<CodeBlock>, inline: bool) -> CodeBlock {
    let mut group = GroupBlock::new(
        &format!("<{target}"),
        attributes,
        if inline { "/>" } else { ">" },
    );
    group.max_length = 100;
    group.suffix = String::new();
    group.padding = true;
    group.last_padding = Some(false);
    group.last_line_break = false;
    group.is_open = true;
    group.is_close = inline;
    group.into()
}

pub fn close_tag_block(target: &str) -> CodeBlock {
    CodeBlock::Text(TextBlock {
        value: TextValue::Text(format!("</{target}>")),
        is_open: false,
        is_close: true,
    })
}

/// `(a, b)` wrapping past 50 columns.
pub fn parentheses_block(blocks: Vec<CodeBlock>) -> CodeBlock {
    let mut group = GroupBlock::new("(", blocks, ")");
    group.max_length = 50;
    group.into()
}

/// `{ a, b }` wrapping past 50 columns.
pub fn object_block(blocks: Vec<CodeBlock>) -> CodeBlock {
    let mut group = GroupBlock::new("{", blocks, "}");
    group.max_length = 50;
    group.padding = true;
    group.into()
}

/// `{ name: value, ... }` from an ordered map.
pub fn object_block_from(options: &IndexMap<String, String>) -> CodeBlock {
    object_block(
        options
            .iter()
            .map(|(name, value)| option_block(name, value))
            .collect(),
    )
}

pub fn group_block(open: &str, blocks: Vec<CodeBlock>, close: &str) -> CodeBlock {
    GroupBlock::new(open, blocks, close).into()
}

/// Multi-line body: opener line, indented contents, closer line.
pub fn area_block(open: &str, blocks: Vec<CodeBlock>, close: &str) -> CodeBlock {
    let mut group = GroupBlock::new(open, blocks, close);
    group.area = true;
    group.into()
}

/// Interleave `blocks` with a pattern.
///
/// A pattern with one [`Joiner::Item`] is repeated around every element
/// (`[LB, $]` puts a line break before each). A pattern with two or more
/// items joins strictly between elements (`[$, ",", " ", $]`).
pub fn join_blocks(blocks: Vec<CodeBlock>, pattern: &[Joiner]) -> Vec<CodeBlock> {
    let items = pattern.iter().filter(|j| matches!(j, Joiner::Item)).count();
    let separators: Vec<&CodeBlock> = pattern
        .iter()
        .filter_map(|joiner| match joiner {
            Joiner::Block(block) => Some(block),
            Joiner::Item => None,
        })
        .collect();

    let mut joined = Vec::new();

    for (i, block) in blocks.into_iter().enumerate() {
        if items > 1 {
            if i != 0 {
                joined.extend(separators.iter().map(|b| (*b).clone()));
            }
            joined.push(block);
        } else {
            for joiner in pattern {
                match joiner {
                    Joiner::Item => joined.push(block.clone()),
                    Joiner::Block(separator) => joined.push(separator.clone()),
                }
            }
        }
    }
    joined
}

pub fn indent_block(indent: usize) -> CodeBlock {
    text_block(" ".repeat(indent))
}

pub fn option_block(name: &str, value: &str) -> CodeBlock {
    text_block(format!("{name}: {value}"))
}

/// `let name = value;` (the initializer is omitted when empty).
pub fn variable_declaration_block(kind: DeclarationKind, name: &str, value: &str) -> CodeBlock {
    if value.is_empty() {
        text_block(format!("{} {name};", kind.as_str()))
    } else {
        text_block(format!("{} {name} = {value};", kind.as_str()))
    }
}

/// Class property: `name = value;`.
pub fn property_declaration_block(name: &str, value: &str) -> CodeBlock {
    if value.is_empty() {
        text_block(format!("{name};"))
    } else {
        text_block(format!("{name} = {value};"))
    }
}

/// Class method, or an arrow-function property when `is_arrow`.
pub fn method_block(name: &str, params: &[String], body: &str, is_arrow: bool) -> CodeBlock {
    let params = params.join(", ");
    let open = if is_arrow {
        format!("{name} = ({params}) => {{")
    } else {
        format!("{name}({params}) {{")
    };
    area_block(&open, vec![text_block(body)], "}")
}
