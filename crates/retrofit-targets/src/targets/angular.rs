//! Angular targets: component template and component class.

use indexmap::IndexMap;
use regex::Regex;
use retrofit_blocks::{
    area_block, close_tag_block, convert_blocks_to_code, convert_inline_blocks_to_code,
    flock_blocks, join_blocks, line_break_block, method_block, object_block_from, open_tag_block,
    property_declaration_block, text_block, CodeBlock, Joiner,
};
use retrofit_core::{
    camelize, ImportDescriptor, InlineNode, InlineValue, Method, NodeEvent, Plugin,
    PluginOptions, RefBinding, StateVariable, Template, TranspileError, TranspileResult,
};

use super::vanilla::render_sections;

const ANGULAR_CORE: &str = "@angular/core";

/// Setters assign component fields; refs resolve through `@ViewChild`.
pub fn angular_options() -> PluginOptions {
    PluginOptions {
        setter: |variable: &StateVariable, value: &str| {
            format!("this.{} = {value};", variable.name)
        },
        getter_ref: |binding: &RefBinding| format!("this.{}.nativeElement", binding.name),
        ref_name: |binding: &RefBinding| binding.name.clone(),
        ..PluginOptions::default()
    }
}

/// Register a handler method for every event of an open node.
///
/// Both Angular generators walk the same sequence, so they agree on names.
fn register_event_methods(
    result: &mut TranspileResult,
    inline: &InlineNode,
) -> Result<Vec<(NodeEvent, String)>, TranspileError> {
    let (true, InlineValue::Node(id)) = (inline.is_open, &inline.value) else {
        return Ok(Vec::new());
    };
    let events = result.node(*id).events.clone();
    let mut methods = Vec::with_capacity(events.len());

    for event in events {
        let text = qualify_state(&event.body(), &result.variables, &event.params);
        let name = result.register_method(
            &camelize(&format!("on {}", event.name)),
            Method {
                name: String::new(),
                params: event.params.clone(),
                text,
                is_arrow: false,
            },
        )?;
        methods.push((event, name));
    }
    Ok(methods)
}

/// Read state through the component: `count + 1` -> `this.count + 1`.
///
/// Member accesses (`this.count`, `a.count`) and handler parameters are left
/// alone.
fn qualify_state(text: &str, variables: &[StateVariable], params: &[String]) -> String {
    let mut text = text.to_string();

    for variable in variables.iter().filter(|v| !params.contains(&v.name)) {
        let Ok(pattern) = Regex::new(&format!(r"\b{}\b", regex::escape(&variable.name))) else {
            continue;
        };
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for found in pattern.find_iter(&text) {
            out.push_str(&text[last..found.start()]);
            if !text[..found.start()].ends_with('.') {
                out.push_str("this.");
            }
            out.push_str(found.as_str());
            last = found.end();
        }
        out.push_str(&text[last..]);
        text = out;
    }
    text
}

/// Component template with property, event and ref bindings.
#[derive(Debug, Default, Clone, Copy)]
pub struct AngularHtml;

impl Plugin for AngularHtml {
    fn framework(&self) -> &'static str {
        "angular"
    }

    fn options(&self) -> PluginOptions {
        angular_options()
    }

    fn convert(&self, result: &mut TranspileResult) -> Result<Template, TranspileError> {
        let mut blocks = Vec::new();

        result.search_nodes(true, |result, inline| {
            let methods = register_event_methods(result, inline)?;
            blocks.push(html_block(result, inline, &methods));
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
    methods: &[(NodeEvent, String)],
) -> CodeBlock {
    let id = match &inline.value {
        InlineValue::Text(text) => return text_block(text.as_str()),
        InlineValue::Node(id) => *id,
    };
    let node = result.node(id);

    if !inline.is_open {
        return close_tag_block(&node.target);
    }
    let mut attributes = Vec::new();

    if !node.ref_binding.is_empty() {
        attributes.push(text_block(format!("#{}", node.ref_binding.name)));
    }
    for attribute in std::iter::once(&node.class_name)
        .filter(|class| !class.value.is_empty())
        .chain(&node.attributes)
    {
        if attribute.dynamic {
            attributes.push(text_block(format!(
                "[{}]=\"{}\"",
                attribute.name, attribute.value
            )));
        } else {
            attributes.push(text_block(format!("{}=\"{}\"", attribute.name, attribute.value)));
        }
    }
    for (event, method) in methods {
        attributes.push(text_block(format!("({})=\"{method}($event)\"", event.name)));
    }
    open_tag_block(&node.target, attributes, inline.is_close)
}

/// `@Component` class with state fields, view children and handler methods.
#[derive(Debug, Default, Clone, Copy)]
pub struct AngularCode;

impl Plugin for AngularCode {
    fn framework(&self) -> &'static str {
        "angular"
    }

    fn options(&self) -> PluginOptions {
        angular_options()
    }

    fn convert(&self, result: &mut TranspileResult) -> Result<Template, TranspileError> {
        let view_children: Vec<String> = result
            .ref_nodes()
            .into_iter()
            .map(|id| result.node(id).ref_binding.name.clone())
            .collect();

        let mut core = ImportDescriptor::new(ANGULAR_CORE)
            .framework("angular")
            .named("Component");
        if !view_children.is_empty() {
            core = core.named("ElementRef").named("ViewChild");
        }
        result.register_import(core);

        result.search_nodes(true, |result, inline| {
            register_event_methods(result, inline).map(|_| ())
        })?;

        let mut properties: Vec<CodeBlock> = result
            .variables
            .iter()
            .map(|variable| property_declaration_block(&variable.name, &variable.value))
            .collect();
        properties.extend(view_children.iter().map(|name| {
            text_block(format!("@ViewChild(\"{name}\") {name}!: ElementRef;"))
        }));
        let methods: Vec<CodeBlock> = result
            .methods
            .iter()
            .map(|method| method_block(&method.name, &method.params, &method.text, method.is_arrow))
            .collect();

        let line_break = Joiner::Block(line_break_block());
        let mut body = join_blocks(properties, &[Joiner::Item, line_break.clone(), Joiner::Item]);
        if !body.is_empty() && !methods.is_empty() {
            body.push(line_break_block());
            body.push(line_break_block());
        }
        body.extend(join_blocks(
            methods,
            &[Joiner::Item, line_break.clone(), line_break, Joiner::Item],
        ));

        let metadata: IndexMap<String, String> = [
            ("selector", "\"app-root\""),
            ("templateUrl", "\"./app.component.html\""),
            ("styleUrls", "[\"./app.component.css\"]"),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
        let decorator = flock_blocks(vec![
            text_block("@Component("),
            object_block_from(&metadata),
            text_block(")"),
        ]);
        let class = area_block("export class AppComponent {", body, "}");
        let component = convert_blocks_to_code(
            &[decorator, line_break_block(), class],
            result.indent,
            0,
        );

        let imports = result
            .import_codes()
            .into_iter()
            .map(|import| text_block(import.code))
            .collect();
        let code = render_sections(vec![imports, vec![text_block(component)]], result.indent);
        Ok(Template::from_code(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use retrofit_core::{Props, TranspileConfig};

    const COUNTER: &str = r#"import React, { useState, useRef } from "react";

export default function App() {
    const [count, setCount] = useState(0);
    const inputRef = useRef(null);

    return (
        <div className="counter" title={count}>
            <input ref={inputRef} />
            <button onClick={e => setCount(count + 1)}>+</button>
            <button onClick={() => {
                inputRef.current.focus();
                setCount(0);
            }}>reset</button>
        </div>
    );
}
"#;

    fn convert(plugin: &dyn Plugin) -> String {
        let mut result = TranspileResult::new(COUNTER, plugin, TranspileConfig::default());
        plugin.convert(&mut result).unwrap().render(&Props::new())
    }

    #[test]
    fn renders_template_bindings() {
        assert_eq!(
            convert(&AngularHtml),
            r#"<div class="counter" [title]="count">
    <input #input/>
    <button (click)="onClick($event)">
        +
    </button>
    <button (click)="onClick2($event)">
        reset
    </button>
</div>"#
        );
    }

    #[test]
    fn renders_component_class() {
        assert_eq!(
            convert(&AngularCode),
            r#"import { Component, ElementRef, ViewChild } from "@angular/core";

@Component({
    selector: "app-root",
    templateUrl: "./app.component.html",
    styleUrls: ["./app.component.css"],
})
export class AppComponent {
    count = 0;
    @ViewChild("input") input!: ElementRef;

    onClick(e) {
        this.count = this.count + 1;
    }

    onClick2() {
        this.input.nativeElement.focus();
        this.count = 0;
    }
}
"#
        );
    }

    #[test]
    fn state_reads_go_through_this() {
        let variables = vec![StateVariable {
            name: "count".to_string(),
            ..StateVariable::default()
        }];

        assert_eq!(
            qualify_state("this.count = count * step.count;", &variables, &[]),
            "this.count = this.count * step.count;"
        );
        assert_eq!(
            qualify_state("log(count, counter);", &variables, &["count".to_string()]),
            "log(count, counter);"
        );
    }
}
