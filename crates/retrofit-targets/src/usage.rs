//! Ready-made usage descriptors.

use retrofit_core::{
    convert_class_selector, ComponentNode, HowToUse, NodeAttribute, NodeResult, NodeRewrite,
    TranspileError, TranspileResult,
};

/// Render `<Component>` as a plain `<tag>`.
///
/// A `className` attribute becomes the element class; other attributes,
/// events, the ref and the children carry over.
pub fn tag_substitution(framework: &str, component: &str, tag: &str) -> HowToUse {
    let tag = tag.to_string();

    HowToUse::new(framework, component).html(move |previous, result| {
        let node = result.node(previous.root).clone();
        let mut element = ComponentNode::with_children(&tag, node.children);
        element.inline = node.inline;
        element.ref_binding = node.ref_binding;
        element.events = node.events;

        for attribute in node.attributes {
            if attribute.name == "className" {
                element.class_name = NodeAttribute {
                    name: "class".to_string(),
                    ..attribute
                };
            } else {
                element.attributes.push(attribute);
            }
        }
        Ok(NodeRewrite::Replace(result.tree.create_node(element)))
    })
}

/// Drop `<Component>` and everything inside it.
pub fn elision(framework: &str, component: &str) -> HowToUse {
    HowToUse::new(framework, component).html(|_, _| Ok(NodeRewrite::Elide))
}

/// Attach instance code to a descriptor.
///
/// `{selector}` in the snippet becomes the class selector of the
/// component's `className`; a snippet that needs one fails without it.
pub fn instance_snippet(how_to_use: HowToUse, snippet: &str) -> HowToUse {
    let snippet = snippet.to_string();
    let component = how_to_use.component.clone();

    how_to_use.instance(move |current: &NodeResult, result: &mut TranspileResult| {
        if !snippet.contains("{selector}") {
            return Ok(snippet.clone());
        }
        let class = result
            .node(current.root)
            .attribute("className")
            .map(|attribute| attribute.value.clone())
            .unwrap_or_default();

        if class.is_empty() {
            return Err(TranspileError::Usage {
                component: component.clone(),
                message: "a className is needed to locate the instance".to_string(),
            });
        }
        Ok(snippet.replace("{selector}", &convert_class_selector(&class)))
    })
}
