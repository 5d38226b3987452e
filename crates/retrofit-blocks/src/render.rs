//! Block tree renderer.

use crate::block::{text_block, CodeBlock, GroupBlock, TextValue};
use crate::indent::{add_indent, IndentOptions};

/// Render blocks back to back, indenting the result by `indent * depth`.
pub fn convert_blocks_to_code(blocks: &[CodeBlock], indent: usize, depth: usize) -> String {
    let code: String = blocks
        .iter()
        .map(|block| render_block(block, indent))
        .collect();

    if code.is_empty() {
        return code;
    }
    add_indent(&code, IndentOptions::new(indent * depth).skip_empty())
}

/// Render blocks at `depth` and freeze the result into a single leaf.
pub fn merge_blocks(blocks: &[CodeBlock], indent: usize, depth: usize) -> CodeBlock {
    text_block(convert_blocks_to_code(blocks, indent, depth))
}

/// Render a flat tag sequence, nesting between open and close blocks.
///
/// The depth grows after an open block and shrinks before a close block.
/// Blocks that are both or neither (self-closing tags, text, line breaks)
/// render at the current depth.
pub fn convert_inline_blocks_to_code(blocks: &[CodeBlock], indent: usize) -> String {
    let mut depth: usize = 0;

    blocks
        .iter()
        .map(|block| {
            let (is_open, is_close) = (block.is_open(), block.is_close());

            if is_open == is_close {
                return convert_blocks_to_code(std::slice::from_ref(block), indent, depth);
            }
            if is_close {
                depth = depth.saturating_sub(1);
            }
            let code = convert_blocks_to_code(std::slice::from_ref(block), indent, depth);

            if is_open {
                depth += 1;
            }
            code
        })
        .collect()
}

fn render_block(block: &CodeBlock, indent: usize) -> String {
    match block {
        CodeBlock::Group(group) => render_group(group, indent),
        CodeBlock::Text(text) => match &text.value {
            TextValue::Text(value) => value.clone(),
            TextValue::Blocks(blocks) => convert_blocks_to_code(blocks, indent, 0),
        },
    }
}

fn render_group(group: &GroupBlock, indent: usize) -> String {
    let (open, contents, close) = group.parts();
    let open = open.map(|b| render_block(b, indent)).unwrap_or_default();
    let close = close.map(|b| render_block(b, indent)).unwrap_or_default();

    if group.area {
        let body = convert_blocks_to_code(contents, indent, 1);
        let head = if contents.is_empty() { "" } else { "\n" };

        return format!("{open}{head}{body}\n{close}");
    }

    let rendered: Vec<String> = contents
        .iter()
        .map(|block| render_block(block, indent))
        .collect();
    let has_contents = !rendered.is_empty();
    let start_padding = if group.padding && has_contents { " " } else { "" };
    let end_padding = if group.last_padding.unwrap_or(group.padding) && has_contents {
        " "
    } else {
        ""
    };

    let code = format!(
        "{open}{start_padding}{}{end_padding}{close}",
        rendered.join(&format!("{} ", group.suffix))
    );

    if group.max_length == 0 || code.chars().count() <= group.max_length {
        return code;
    }

    let lines: String = rendered
        .iter()
        .map(|content| {
            let line = add_indent(
                &format!("{content}{}", group.suffix),
                IndentOptions::new(indent).skip_empty(),
            );
            format!("\n{line}")
        })
        .collect();
    let tail = if group.last_line_break { "\n" } else { "" };

    format!("{open}{lines}{tail}{close}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::*;
    use pretty_assertions::assert_eq;

    fn options() -> Vec<CodeBlock> {
        vec![
            option_block("a", "b"),
            option_block("addd", "b"),
            option_block("a", "bsdsdsdsdsdsd"),
            option_block("asdsd", "b"),
            option_block("asdsd", "bsdsdsd"),
        ]
    }

    #[test]
    fn wraps_nested_groups_past_max_length() {
        let blocks = vec![
            text_block("const viewer = new InfiniteViewer"),
            parentheses_block(vec![
                text_block(r#"document.querySelector(".a")"#),
                text_block(r#"document.querySelector(".b")"#),
                object_block(options()),
            ]),
            text_block(";\n"),
        ];

        let expected = r#"const viewer = new InfiniteViewer(
    document.querySelector(".a"),
    document.querySelector(".b"),
    {
        a: b,
        addd: b,
        a: bsdsdsdsdsdsd,
        asdsd: b,
        asdsd: bsdsdsd,
    },
);
"#;
        assert_eq!(convert_blocks_to_code(&blocks, 4, 0), expected);
    }

    #[test]
    fn renders_nested_areas() {
        let blocks = vec![area_block(
            "class A {",
            vec![area_block("constructor() {", vec![], "}")],
            "}\n",
        )];

        assert_eq!(
            convert_blocks_to_code(&blocks, 4, 0),
            "class A {\n    constructor() {\n    }\n}\n"
        );
    }

    #[test]
    fn short_object_stays_inline() {
        let block = object_block(vec![option_block("a", "b"), option_block("c", "d")]);
        assert_eq!(convert_blocks_to_code(&[block], 4, 0), "{ a: b, c: d }");
    }

    #[test]
    fn wrap_flips_once_as_max_length_grows() {
        let inline = "{ a: b, addd: b, a: bsdsdsdsdsdsd, asdsd: b, asdsd: bsdsdsd }";
        let width = inline.chars().count();
        let mut was_inline = false;

        for max_length in 1..width + 20 {
            let mut group = GroupBlock::new("{", options(), "}");
            group.padding = true;
            group.max_length = max_length;

            let block: CodeBlock = group.into();
            let code = convert_blocks_to_code(&[block], 4, 0);
            let is_inline = !code.contains('\n');

            assert!(!(was_inline && !is_inline), "re-wrapped at {max_length}");
            assert_eq!(is_inline, max_length >= width);
            was_inline = is_inline;
        }
    }

    #[test]
    fn depth_indents_every_line() {
        let blocks = vec![text_block("a\n\nb")];
        assert_eq!(convert_blocks_to_code(&blocks, 2, 2), "    a\n\n    b");
    }

    #[test]
    fn method_block_renders_body() {
        let block = method_block("onClick", &["e".to_string()], "this.count = 1;", false);
        assert_eq!(
            convert_blocks_to_code(&[block], 4, 0),
            "onClick(e) {\n    this.count = 1;\n}"
        );

        let block = method_block("onClick", &[], "run();", true);
        assert_eq!(
            convert_blocks_to_code(&[block], 2, 0),
            "onClick = () => {\n  run();\n}"
        );
    }

    #[test]
    fn inline_blocks_nest_tags() {
        let blocks = join_blocks(
            vec![
                open_tag_block("div", vec![text_block(r#"class="a""#)], false),
                open_tag_block("img", vec![text_block(r#"src="b""#)], true),
                text_block("Hello"),
                close_tag_block("div"),
            ],
            &[Joiner::Item, Joiner::Block(line_break_block()), Joiner::Item],
        );

        assert_eq!(
            convert_inline_blocks_to_code(&blocks, 4),
            "<div class=\"a\">\n    <img src=\"b\"/>\n    Hello\n</div>"
        );
    }

    #[test]
    fn long_open_tag_wraps_attributes() {
        let attributes = (0..6)
            .map(|i| text_block(format!(r#"attribute{i}="value-{i}""#)))
            .collect();
        let block = open_tag_block("section", attributes, false);
        let code = convert_blocks_to_code(&[block], 4, 0);

        assert!(code.starts_with("<section\n    attribute0=\"value-0\"\n"));
        assert!(code.ends_with("    attribute5=\"value-5\">"));
    }

    #[test]
    fn flocked_blocks_render_flat() {
        let block = flock_blocks(vec![
            open_tag_block("b", vec![], false),
            close_tag_block("b"),
        ]);
        assert_eq!(convert_blocks_to_code(&[block], 4, 0), "<b></b>");
    }
}
