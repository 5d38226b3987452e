//! Vanilla DOM targets: static markup plus imperative wiring code.

use std::collections::HashSet;

use retrofit_blocks::{
    close_tag_block, convert_blocks_to_code, convert_inline_blocks_to_code, join_blocks,
    line_break_block, open_tag_block, text_block, variable_declaration_block, CodeBlock,
    DeclarationKind, Joiner,
};
use retrofit_core::{
    camelize, convert_class_selector, InlineNode, InlineValue, NodeId, Plugin, PluginOptions,
    RefBinding, StateVariable, Template, TranspileError, TranspileResult,
};

/// Setters become assignments and refs become plain element variables.
pub fn vanilla_options() -> PluginOptions {
    PluginOptions {
        setter: |variable: &StateVariable, value: &str| format!("{} = {value};", variable.name),
        getter_ref: |binding: &RefBinding| binding.name.clone(),
        ref_name: |binding: &RefBinding| binding.name.clone(),
        ..PluginOptions::default()
    }
}

/// Static HTML for the component markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct VanillaHtml;

impl Plugin for VanillaHtml {
    fn framework(&self) -> &'static str {
        "vanilla"
    }

    fn options(&self) -> PluginOptions {
        vanilla_options()
    }

    fn convert(&self, result: &mut TranspileResult) -> Result<Template, TranspileError> {
        let wired: HashSet<NodeId> = result.event_nodes(false).into_iter().collect();
        let mut blocks = Vec::new();

        result.search_nodes(true, |result, inline| {
            blocks.push(html_block(result, inline, &wired)?);
            Ok(())
        })?;

        let blocks = join_blocks(
            blocks,
            &[Joiner::Item, Joiner::Block(line_break_block()), Joiner::Item],
        );
        Ok(Template::from_code(&convert_inline_blocks_to_code(
            &blocks,
            result.indent,
        )))
    }
}

fn html_block(
    result: &TranspileResult,
    inline: &InlineNode,
    wired: &HashSet<NodeId>,
) -> Result<CodeBlock, TranspileError> {
    let id = match &inline.value {
        InlineValue::Text(text) => return Ok(text_block(text.as_str())),
        InlineValue::Node(id) => *id,
    };
    let node = result.node(id);

    if !inline.is_open {
        return Ok(close_tag_block(&node.target));
    }
    // listeners are attached through a class selector or a ref
    if wired.contains(&id) && node.class_name.value.is_empty() && node.ref_binding.is_empty() {
        return Err(TranspileError::UnaddressableElement {
            target: node.target.clone(),
        });
    }

    let mut attributes = Vec::new();
    if !node.class_name.value.is_empty() {
        attributes.push(text_block(format!("class=\"{}\"", node.class_name.value)));
    }
    for attribute in &node.attributes {
        if attribute.dynamic && attribute.value == "true" {
            attributes.push(text_block(attribute.name.as_str()));
        } else {
            attributes.push(text_block(format!("{}=\"{}\"", attribute.name, attribute.value)));
        }
    }
    Ok(open_tag_block(&node.target, attributes, inline.is_close))
}

/// Script that declares state, binds elements and attaches listeners.
#[derive(Debug, Default, Clone, Copy)]
pub struct VanillaCode;

impl Plugin for VanillaCode {
    fn framework(&self) -> &'static str {
        "vanilla"
    }

    fn options(&self) -> PluginOptions {
        vanilla_options()
    }

    fn convert(&self, result: &mut TranspileResult) -> Result<Template, TranspileError> {
        let instances: Vec<CodeBlock> = result
            .how_to_uses(true)?
            .into_iter()
            .filter(|usage| !usage.code.is_empty())
            .map(|usage| text_block(usage.code.trim_end()))
            .collect();

        let mut listeners = Vec::new();
        for id in result.event_nodes(false) {
            let node = result.node(id).clone();
            let element = if !node.ref_binding.is_empty() {
                node.ref_binding.name.clone()
            } else if !node.class_name.value.is_empty() {
                let selector = convert_class_selector(&node.class_name.value);
                result.register_variable(
                    &camelize(&node.class_name.value),
                    StateVariable {
                        value: format!("document.querySelector(\"{selector}\")"),
                        ..StateVariable::default()
                    },
                )?
            } else {
                return Err(TranspileError::UnaddressableElement {
                    target: node.target.clone(),
                });
            };

            // DOM event names are lowercase: mouseEnter -> mouseenter
            for event in &node.events {
                listeners.push(text_block(format!(
                    "{element}.addEventListener(\"{}\", {});",
                    event.name.to_lowercase(),
                    event.text
                )));
            }
        }

        let mut refs = Vec::new();
        for id in result.ref_nodes() {
            let node = result.node(id);
            if node.is_component() {
                continue;
            }
            if node.class_name.value.is_empty() {
                return Err(TranspileError::MissingRefClass {
                    target: node.target.clone(),
                    reference: node.ref_binding.original_name.clone(),
                });
            }
            let selector = convert_class_selector(&node.class_name.value);
            refs.push(variable_declaration_block(
                DeclarationKind::Const,
                &node.ref_binding.name,
                &format!("document.querySelector(\"{selector}\")"),
            ));
        }

        let imports = result
            .import_codes()
            .into_iter()
            .map(|import| text_block(import.code))
            .collect();
        let variables = result
            .variables
            .iter()
            .map(|variable| {
                // only state with a setter is ever reassigned
                let kind = if variable.setter.is_empty() {
                    DeclarationKind::Const
                } else {
                    DeclarationKind::Let
                };
                variable_declaration_block(kind, &variable.name, &variable.value)
            })
            .collect();

        let code = render_sections(
            vec![imports, variables, refs, instances, listeners],
            result.indent,
        );
        Ok(Template::from_code(&code))
    }
}

/// Lines within a section, a blank line between sections.
pub(crate) fn render_sections(sections: Vec<Vec<CodeBlock>>, indent: usize) -> String {
    let line_break = Joiner::Block(line_break_block());
    let sections: Vec<CodeBlock> = sections
        .into_iter()
        .filter(|section| !section.is_empty())
        .map(|section| {
            retrofit_blocks::flock_blocks(join_blocks(
                section,
                &[Joiner::Item, line_break.clone(), Joiner::Item],
            ))
        })
        .collect();

    if sections.is_empty() {
        return String::new();
    }
    let blocks = join_blocks(
        sections,
        &[Joiner::Item, line_break.clone(), line_break, Joiner::Item],
    );
    format!("{}\n", convert_blocks_to_code(&blocks, indent, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use retrofit_core::{Props, TranspileConfig};

    fn convert(plugin: &dyn Plugin, source: &str) -> Result<String, TranspileError> {
        let mut result = TranspileResult::new(source, plugin, TranspileConfig::default());
        Ok(plugin.convert(&mut result)?.render(&Props::new()))
    }

    const TOGGLE: &str = r#"import { useState, useRef } from "react";

export default function Toggle() {
    const [open, setOpen] = useState(false);
    const panelRef = useRef(null);

    return (
        <div className="toggle">
            <button className="toggle-button" onClick={() => setOpen(!open)}>Toggle</button>
            <div className="panel" ref={panelRef} onMouseEnter={e => {
                panelRef.current.focus();
                setOpen(true);
            }}></div>
            <input type="checkbox" disabled />
        </div>
    );
}
"#;

    #[test]
    fn renders_static_markup() {
        let html = convert(&VanillaHtml, TOGGLE).unwrap();

        assert_eq!(
            html,
            r#"<div class="toggle">
    <button class="toggle-button">
        Toggle
    </button>
    <div class="panel">
    </div>
    <input type="checkbox" disabled/>
</div>"#
        );
    }

    #[test]
    fn wires_listeners_and_refs() {
        let code = convert(&VanillaCode, TOGGLE).unwrap();

        assert_eq!(
            code,
            r#"let open = false;
const toggleButton = document.querySelector(".toggle-button");

const panel = document.querySelector(".panel");

toggleButton.addEventListener("click", () => open = !open);
panel.addEventListener("mouseenter", e => {
    panel.focus();
    open = true;
});
"#
        );
    }

    #[test]
    fn unaddressable_element_is_an_error() {
        let source = "export default function A() {\n    return (\n        <button onClick={() => run()}>x</button>\n    );\n}\n";

        assert!(matches!(
            convert(&VanillaCode, source),
            Err(TranspileError::UnaddressableElement { target }) if target == "button"
        ));
        assert!(matches!(
            convert(&VanillaHtml, source),
            Err(TranspileError::UnaddressableElement { .. })
        ));
    }

    #[test]
    fn element_ref_needs_a_class() {
        let source = "export default function A() {\n    const boxRef = useRef();\n    return (\n        <div ref={boxRef}></div>\n    );\n}\n";

        assert!(matches!(
            convert(&VanillaCode, source),
            Err(TranspileError::MissingRefClass { reference, .. }) if reference == "boxRef"
        ));
    }

    #[test]
    fn state_without_setter_is_const() {
        let source = r#"export default function List() {
    const [items] = useState(["a"]);
    const [page, setPage] = useState(1);

    return (
        <ul className="list" onMouseLeave={() => setPage(page + 1)}></ul>
    );
}
"#;

        assert_eq!(
            convert(&VanillaCode, source).unwrap(),
            r#"const items = ["a"];
let page = 1;
const list = document.querySelector(".list");

list.addEventListener("mouseleave", () => page = page + 1);
"#
        );
    }

    #[test]
    fn empty_component_renders_nothing() {
        assert_eq!(convert(&VanillaCode, "const a = 1;").unwrap(), "");
    }
}
