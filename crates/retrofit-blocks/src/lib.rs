//! Code block document model and pretty-printer.
//!
//! Generated source is assembled as a tree of [`CodeBlock`]s (text leaves and
//! delimited groups) and rendered to text with indentation propagation and
//! length-triggered line wrapping.

pub mod block;
pub mod indent;
pub mod render;

pub use block::{
    area_block, close_tag_block, comma_block, empty_block, flock_blocks, group_block,
    indent_block, join_blocks, line_break_block, method_block, object_block, object_block_from,
    open_tag_block, option_block, parentheses_block, property_declaration_block, text_block,
    variable_declaration_block, CodeBlock, DeclarationKind, GroupBlock, Joiner, TextBlock,
    TextValue,
};
pub use indent::{add_indent, find_indent, remove_indent, IndentOptions};
pub use render::{convert_blocks_to_code, convert_inline_blocks_to_code, merge_blocks};
