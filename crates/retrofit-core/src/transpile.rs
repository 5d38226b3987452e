//! Conversion state shared by every target plugin.
//!
//! A [`TranspileResult`] is built once per conversion from the React source.
//! Plugins read the extracted tree, imports and state, register the names
//! they generate, and walk the markup with [`TranspileResult::search_nodes`].

use crate::analyze::{analyze_markup, extract_variables, StateVariable};
use crate::imports::{
    filter_framework, parse_imports, render_imports, FrameworkScoped, ImportCode,
    ImportDescriptor, PathRule,
};
use crate::matcher::match_text_area;
use crate::node::{ComponentNode, InlineNode, NodeId, NodeResult, NodeTree, RefBinding};
use crate::options::PluginOptions;
use crate::traits::{HowToUse, HtmlRewriter, NodeRewrite, Plugin, TranspileError};
use regex::{NoExpand, Regex};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::sync::LazyLock;

/// Framework tag of imports parsed from the source.
pub const SOURCE_FRAMEWORK: &str = "react";

/// Suffixes tried by [`TranspileResult::register_name`] run from 2 up to this.
pub const MAX_NAME_SUFFIX: usize = 100;

const MAX_REWRITES: usize = 1024;
const MAX_VISITS: usize = 100_000;

static MARKUP_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"return\s*\(").expect("Invalid markup open regex"));

static MARKUP_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\s*;?\s*\n\}").expect("Invalid markup close regex"));

static BARE_MARKUP_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"return\s+<").expect("Invalid bare markup regex"));

static BARE_MARKUP_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";?\s*\n\}").expect("Invalid bare markup close regex"));

/// Settings for one conversion.
#[derive(Debug, Clone)]
pub struct TranspileConfig {
    pub indent: usize,
    pub how_to_uses: Vec<HowToUse>,
    pub path_rules: Vec<PathRule>,
}

impl Default for TranspileConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            how_to_uses: Vec::new(),
            path_rules: Vec::new(),
        }
    }
}

/// A method generated for a target class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub params: Vec<String>,

    /// Method body
    pub text: String,

    /// Render as an arrow-function property
    pub is_arrow: bool,
}

/// A component occurrence matched by a usage descriptor.
#[derive(Debug, Clone)]
pub struct HowToUseCode {
    pub node: NodeId,
    pub how_to_use: HowToUse,

    /// Instance code (empty unless requested and the descriptor writes one)
    pub code: String,
}

/// Everything a plugin needs to emit code for one component.
#[derive(Debug)]
pub struct TranspileResult {
    pub code: String,
    pub framework: String,
    pub indent: usize,
    pub options: PluginOptions,
    pub tree: NodeTree,
    pub node_result: NodeResult,
    pub imports: Vec<ImportDescriptor>,
    pub variables: Vec<StateVariable>,
    pub methods: Vec<Method>,
    pub how_to_uses: Vec<HowToUse>,
    pub path_rules: Vec<PathRule>,
}

impl TranspileResult {
    /// Analyze `code` for `plugin`.
    pub fn new(code: &str, plugin: &dyn Plugin, config: TranspileConfig) -> Self {
        Self::with_options(code, plugin.framework(), plugin.options(), config)
    }

    pub fn with_options(
        code: &str,
        framework: &str,
        options: PluginOptions,
        config: TranspileConfig,
    ) -> Self {
        let mut tree = NodeTree::new();
        let node_result = analyze_markup("", &mut tree);

        let mut result = Self {
            code: String::new(),
            framework: framework.to_string(),
            indent: config.indent,
            options,
            tree,
            node_result,
            imports: Vec::new(),
            variables: Vec::new(),
            methods: Vec::new(),
            how_to_uses: config.how_to_uses,
            path_rules: config.path_rules,
        };
        result.set_code(code);
        result
    }

    /// Re-analyze from new source. Registered methods are dropped.
    pub fn set_code(&mut self, code: &str) {
        self.code = code.to_string();
        self.tree = NodeTree::new();
        self.methods.clear();
        self.imports = parse_imports(code, SOURCE_FRAMEWORK);
        self.variables = extract_variables(code);
        self.node_result = analyze_markup(&extract_markup(code), &mut self.tree);

        tracing::debug!(
            framework = %self.framework,
            imports = self.imports.len(),
            variables = self.variables.len(),
            nodes = self.node_result.inline_nodes.len(),
            "Analyzed component source"
        );
        self.rewrite_handlers();
    }

    pub fn node(&self, id: NodeId) -> &ComponentNode {
        &self.tree[id]
    }

    /// Rewrite refs and setters inside handlers and dynamic attributes.
    fn rewrite_handlers(&mut self) {
        let refs: Vec<RefBinding> = self
            .ref_nodes()
            .into_iter()
            .map(|id| self.tree[id].ref_binding.clone())
            .collect();
        let ids: Vec<NodeId> = self.open_nodes().collect();

        for id in ids {
            let node = &self.tree[id];
            let events: Vec<String> = node
                .events
                .iter()
                .map(|event| self.replace_setter(&self.replace_ref_variables(&event.text, &refs)))
                .collect();
            let values: Vec<Option<String>> = node
                .attributes
                .iter()
                .map(|attribute| {
                    attribute
                        .dynamic
                        .then(|| self.replace_ref_variables(&attribute.value, &refs))
                })
                .collect();

            let node = &mut self.tree[id];
            for (event, text) in node.events.iter_mut().zip(events) {
                event.text = text;
            }
            for (attribute, value) in node.attributes.iter_mut().zip(values) {
                if let Some(value) = value {
                    attribute.default_value = value.clone();
                    attribute.value = value;
                }
            }
        }
    }

    fn open_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_result
            .inline_nodes
            .iter()
            .filter(|inline| inline.is_open)
            .filter_map(InlineNode::node_id)
    }

    /// Open nodes that carry a ref.
    pub fn ref_nodes(&self) -> Vec<NodeId> {
        self.open_nodes()
            .filter(|id| !self.tree[*id].ref_binding.is_empty())
            .collect()
    }

    /// Open nodes with events: components when `components`, DOM elements otherwise.
    pub fn event_nodes(&self, components: bool) -> Vec<NodeId> {
        self.open_nodes()
            .filter(|id| {
                let node = &self.tree[*id];
                !node.events.is_empty() && node.is_component() == components
            })
            .collect()
    }

    /// Replace every React ref access in `text` with the target's form.
    pub fn replace_ref_variables(&self, text: &str, refs: &[RefBinding]) -> String {
        let mut text = text.to_string();

        for binding in refs {
            if let Some(pattern) = (self.options.find_ref)(binding) {
                let getter = (self.options.getter_ref)(binding);
                text = pattern.replace_all(&text, NoExpand(&getter)).into_owned();
            }
            let Ok(name) = Regex::new(&format!(r"\b{}\b", regex::escape(&binding.original_name)))
            else {
                continue;
            };
            let ref_name = (self.options.ref_name)(binding);
            text = name.replace_all(&text, NoExpand(&ref_name)).into_owned();
        }
        text
    }

    /// Replace every `setX(value)` call in `text` with the target's assignment.
    ///
    /// A call written without a trailing `;` stays an expression.
    pub fn replace_setter(&self, text: &str) -> String {
        let mut text = text.to_string();

        for variable in self.variables.iter().filter(|v| !v.setter.is_empty()) {
            let mut out = String::with_capacity(text.len());
            let mut rest = text.as_str();
            let mut rewrites = 0;

            loop {
                let area = (self.options.find_setter_area)(rest, &variable.setter);
                if area.text.is_empty() {
                    break;
                }
                let Some(at) = area.opener.index.or_else(|| rest.find(&area.text)) else {
                    break;
                };
                let Some(next) = rest.get(at + area.text.len()..) else {
                    break;
                };
                let statement = (self.options.setter)(variable, &area.original_text);

                out.push_str(&rest[..at]);
                if area.text.ends_with(';') {
                    out.push_str(&statement);
                } else {
                    out.push_str(statement.trim_end_matches(';'));
                }
                rest = next;

                rewrites += 1;
                if rewrites >= MAX_REWRITES {
                    tracing::warn!(setter = %variable.setter, "Stopped rewriting setter calls");
                    break;
                }
            }
            out.push_str(rest);
            text = out;
        }
        text
    }

    /// Source code with import modules rewritten by the path rules.
    pub fn convert_path(&self) -> String {
        let mut code = self.code.clone();

        for rule in self.path_rules.iter().filter(|r| r.applies_to(&self.framework)) {
            for import in self.imports.iter().filter(|i| !i.text.is_empty()) {
                if !rule.rule.is_match(&import.module) {
                    continue;
                }
                let next = if rule.specifiers.is_empty() {
                    replace_module(&import.text, &import.module, &rule.module)
                } else {
                    let replacement = ImportDescriptor {
                        specifiers: rule.specifiers.clone(),
                        ..ImportDescriptor::new(&rule.module)
                    };
                    render_imports([&replacement], self.indent)
                        .into_iter()
                        .map(|import| import.code)
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                code = code.replacen(&import.text, &next, 1);
            }
        }
        code
    }

    /// The descriptor for `component` in this framework.
    pub fn find_how_to_use(&self, component: &str) -> Option<&HowToUse> {
        self.how_to_uses
            .iter()
            .find(|h| h.component == component && h.applies_to(&self.framework))
    }

    fn matched_how_to_uses(&self) -> Vec<(usize, HowToUse)> {
        self.node_result
            .inline_nodes
            .iter()
            .enumerate()
            .filter(|(_, inline)| inline.is_open)
            .filter_map(|(position, inline)| {
                let node = &self.tree[inline.node_id()?];
                if !node.is_component() {
                    return None;
                }
                self.find_how_to_use(&node.target)
                    .map(|how_to_use| (position, how_to_use.clone()))
            })
            .collect()
    }

    /// Descriptors of every component in the markup, in order.
    ///
    /// With `with_code`, each descriptor's instance writer runs on the
    /// component's own sub-sequence.
    pub fn how_to_uses(&mut self, with_code: bool) -> Result<Vec<HowToUseCode>, TranspileError> {
        let mut codes = Vec::new();

        for (position, how_to_use) in self.matched_how_to_uses() {
            let nodes = &self.node_result.inline_nodes[position..];
            let length = span(nodes.iter());
            let sub = NodeResult {
                root: nodes[0].node_id().unwrap_or(self.node_result.root),
                inline_nodes: nodes[..length].to_vec(),
            };

            let code = match (&how_to_use.instance, with_code) {
                (Some(instance), true) => {
                    let instance = instance.clone();
                    instance(&sub, self)?
                }
                _ => String::new(),
            };
            codes.push(HowToUseCode {
                node: sub.root,
                how_to_use,
                code,
            });
        }
        Ok(codes)
    }

    /// A name not yet used by a variable, method or ref.
    ///
    /// Tries `base`, then `base2` through `base100`.
    pub fn register_name(&self, base: &str) -> Result<String, TranspileError> {
        let taken: HashSet<String> = self
            .variables
            .iter()
            .map(|v| v.name.clone())
            .chain(self.methods.iter().map(|m| m.name.clone()))
            .chain(
                self.ref_nodes()
                    .into_iter()
                    .map(|id| self.tree[id].ref_binding.name.clone()),
            )
            .collect();

        if !taken.contains(base) {
            return Ok(base.to_string());
        }
        (2..=MAX_NAME_SUFFIX)
            .map(|i| format!("{base}{i}"))
            .find(|candidate| !taken.contains(candidate))
            .ok_or_else(|| TranspileError::NameExhausted(base.to_string()))
    }

    /// Register a generated variable under a fresh name derived from `base`.
    ///
    /// Empty `original_name` and `default_value` default to the name and value.
    pub fn register_variable(
        &mut self,
        base: &str,
        variable: StateVariable,
    ) -> Result<String, TranspileError> {
        let name = self.register_name(base)?;
        let original_name = if variable.original_name.is_empty() {
            name.clone()
        } else {
            variable.original_name
        };
        let default_value = if variable.default_value.is_empty() {
            variable.value.clone()
        } else {
            variable.default_value
        };

        self.variables.push(StateVariable {
            name: name.clone(),
            original_name,
            default_value,
            ..variable
        });
        Ok(name)
    }

    /// Register a generated method under a fresh name derived from `base`.
    pub fn register_method(&mut self, base: &str, method: Method) -> Result<String, TranspileError> {
        let name = self.register_name(base)?;

        self.methods.push(Method {
            name: name.clone(),
            ..method
        });
        Ok(name)
    }

    /// Add an import the generated code needs.
    pub fn register_import(&mut self, import: ImportDescriptor) {
        self.imports.push(import);
    }

    /// Rendered imports for this framework: registered ones first, then
    /// those of the descriptors in use. One statement per module.
    pub fn import_codes(&self) -> Vec<ImportCode> {
        let own = filter_framework(&self.imports, &self.framework);
        let used: Vec<ImportDescriptor> = self
            .matched_how_to_uses()
            .into_iter()
            .flat_map(|(_, how_to_use)| how_to_use.imports)
            .filter(|import| import.applies_to(&self.framework))
            .collect();

        render_imports(own.iter().chain(used.iter()), self.indent)
    }

    fn html_rewriter(&self, inline: &InlineNode) -> Option<(NodeId, HtmlRewriter)> {
        if !inline.is_open {
            return None;
        }
        let id = inline.node_id()?;
        let node = &self.tree[id];

        if !node.is_component() {
            return None;
        }
        let html = self.find_how_to_use(&node.target)?.html.clone()?;
        Some((id, html))
    }

    /// Visit the flat sequence in order.
    ///
    /// With `use_how_to_use`, a component whose descriptor rewrites markup is
    /// handed its own sub-sequence first. `Elide` drops the whole
    /// sub-sequence; `Replace` splices the new sequence in and the scan
    /// continues from its first entry. The rewritten sequence becomes the
    /// new node result.
    pub fn search_nodes<F>(&mut self, use_how_to_use: bool, mut visit: F) -> Result<(), TranspileError>
    where
        F: FnMut(&mut Self, &InlineNode) -> Result<(), TranspileError>,
    {
        let mut pending: VecDeque<InlineNode> =
            self.node_result.inline_nodes.iter().cloned().collect();
        let mut visited = Vec::with_capacity(pending.len());
        let mut rewritten = false;
        let mut steps = 0;

        while let Some(mut current) = pending.pop_front() {
            steps += 1;
            if steps > MAX_VISITS {
                tracing::warn!("Stopped walking markup after {} nodes", MAX_VISITS);
                break;
            }

            if let Some((root, html)) = use_how_to_use
                .then(|| self.html_rewriter(&current))
                .flatten()
            {
                let length = span(std::iter::once(&current).chain(pending.iter()));
                let previous = NodeResult {
                    root,
                    inline_nodes: std::iter::once(current.clone())
                        .chain(pending.iter().take(length - 1).cloned())
                        .collect(),
                };

                match html(&previous, self)? {
                    NodeRewrite::Unchanged => {}
                    NodeRewrite::Elide => {
                        pending.drain(..length - 1);
                        rewritten = true;
                        continue;
                    }
                    NodeRewrite::Replace(next) => {
                        pending.drain(..length - 1);
                        rewritten = true;

                        let mut entries = next.inline_nodes.into_iter();
                        let Some(head) = entries.next() else {
                            continue;
                        };
                        for entry in entries.rev() {
                            pending.push_front(entry);
                        }
                        current = head;
                    }
                }
            }

            visit(self, &current)?;
            visited.push(current);
        }

        if rewritten {
            if let Some(root) = self.tree.link(&visited) {
                self.node_result.root = root;
            }
        }
        self.node_result.inline_nodes = visited;
        Ok(())
    }
}

/// Swap the module of an import statement. The module is the last string of
/// the statement, so bindings that spell the same text are untouched.
fn replace_module(statement: &str, module: &str, replacement: &str) -> String {
    match statement.rfind(module) {
        Some(at) => format!(
            "{}{replacement}{}",
            &statement[..at],
            &statement[at + module.len()..]
        ),
        None => statement.to_string(),
    }
}

/// Number of entries from the first one through its matching close.
fn span<'a>(nodes: impl Iterator<Item = &'a InlineNode>) -> usize {
    let mut depth = 0usize;
    let mut length = 0;

    for inline in nodes {
        length += 1;
        if inline.node_id().is_some() {
            match (inline.is_open, inline.is_close) {
                (true, false) => depth += 1,
                (false, true) => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        if depth == 0 {
            break;
        }
    }
    length.max(1)
}

/// Markup returned by the component: the parenthesized `return (...)`
/// block, or a bare `return <...>;`.
pub fn extract_markup(code: &str) -> String {
    let area = match_text_area(code, &*MARKUP_OPEN_RE, &*MARKUP_CLOSE_RE, false);
    if area.closer.is_match() {
        return area.text;
    }
    let area = match_text_area(code, &*BARE_MARKUP_OPEN_RE, &*BARE_MARKUP_CLOSE_RE, true);
    if area.closer.is_match() {
        return format!("<{}", area.original_text);
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{InlineValue, NodeChild};
    use pretty_assertions::assert_eq;

    const COUNTER: &str = r#"import React, { useState, useRef } from "react";
import Button from "./Button";

export default function App() {
    const [count, setCount] = useState(0);
    const boxRef = useRef(null);

    return (
        <div className="a" ref={boxRef}>
            <Button onClick={() => setCount(count+1)}>{count}</Button>
            <span onClick={() => { boxRef.current.focus(); setCount(0); }}>reset</span>
        </div>
    );
}
"#;

    fn assignment_options() -> PluginOptions {
        PluginOptions {
            setter: |variable, value| format!("{} = {value};", variable.name),
            getter_ref: |binding| binding.name.clone(),
            ref_name: |binding| binding.name.clone(),
            ..PluginOptions::default()
        }
    }

    fn analyzed(options: PluginOptions, config: TranspileConfig) -> TranspileResult {
        TranspileResult::with_options(COUNTER, "vanilla", options, config)
    }

    fn targets(result: &TranspileResult) -> Vec<String> {
        result
            .node_result
            .inline_nodes
            .iter()
            .map(|inline| match &inline.value {
                InlineValue::Node(id) if inline.is_open => format!("<{}>", result.tree[*id].target),
                InlineValue::Node(id) => format!("</{}>", result.tree[*id].target),
                InlineValue::Text(text) => text.clone(),
            })
            .collect()
    }

    #[test]
    fn analyzes_source() {
        let result = analyzed(PluginOptions::default(), TranspileConfig::default());

        assert_eq!(result.imports.len(), 2);
        assert_eq!(result.variables.len(), 1);
        assert_eq!(result.variables[0].name, "count");
        assert_eq!(
            targets(&result),
            vec![
                "<div>", "<Button>", "{count}", "</Button>", "<span>", "reset", "</span>", "</div>"
            ]
        );
        assert_eq!(result.ref_nodes().len(), 1);
        assert_eq!(result.event_nodes(true).len(), 1);
        assert_eq!(result.event_nodes(false).len(), 1);
    }

    #[test]
    fn react_options_leave_handlers_alone() {
        let result = analyzed(PluginOptions::default(), TranspileConfig::default());
        let button = result.event_nodes(true)[0];
        let span = result.event_nodes(false)[0];

        assert_eq!(result.node(button).events[0].text, "() => setCount(count+1)");
        assert_eq!(
            result.node(span).events[0].text,
            "() => { boxRef.current.focus(); setCount(0); }"
        );
    }

    #[test]
    fn rewrites_setters_and_refs() {
        let result = analyzed(assignment_options(), TranspileConfig::default());
        let button = result.event_nodes(true)[0];
        let span = result.event_nodes(false)[0];

        assert_eq!(result.node(button).events[0].text, "() => count = count+1");
        assert_eq!(
            result.node(span).events[0].text,
            "() => { box.focus(); count = 0; }"
        );
    }

    #[test]
    fn registered_names_are_unique() {
        let mut result = analyzed(PluginOptions::default(), TranspileConfig::default());

        let first = result.register_variable("count", StateVariable::default()).unwrap();
        let second = result
            .register_method("count", Method::default())
            .unwrap();
        let third = result.register_variable("box", StateVariable::default()).unwrap();

        assert_eq!(first, "count2");
        assert_eq!(second, "count3");
        assert_eq!(third, "box2");
        assert_eq!(result.register_name("fresh").unwrap(), "fresh");
    }

    #[test]
    fn name_space_runs_out() {
        let mut result = analyzed(PluginOptions::default(), TranspileConfig::default());

        for _ in 0..MAX_NAME_SUFFIX {
            result.register_variable("x", StateVariable::default()).unwrap();
        }
        assert!(matches!(
            result.register_name("x"),
            Err(TranspileError::NameExhausted(name)) if name == "x"
        ));
    }

    #[test]
    fn registered_variable_defaults() {
        let mut result = analyzed(PluginOptions::default(), TranspileConfig::default());
        let name = result
            .register_variable(
                "el",
                StateVariable {
                    value: "document.body".into(),
                    ..StateVariable::default()
                },
            )
            .unwrap();
        let variable = result.variables.last().unwrap();

        assert_eq!(variable.name, name);
        assert_eq!(variable.original_name, "el");
        assert_eq!(variable.default_value, "document.body");
    }

    #[test]
    fn registering_an_import_twice_renders_once() {
        let mut result = analyzed(PluginOptions::default(), TranspileConfig::default());
        let import = ImportDescriptor::new("moveable")
            .framework("vanilla")
            .default_import("Moveable");

        result.register_import(import.clone());
        let once = result.import_codes();
        result.register_import(import);

        assert_eq!(result.import_codes(), once);
        assert_eq!(once.len(), 1);
        assert_eq!(once[0].code, r#"import Moveable from "moveable";"#);
    }

    #[test]
    fn converts_import_paths() {
        let config = TranspileConfig {
            path_rules: vec![PathRule::new(Some("vanilla"), r"^\./Button$", "./button.js").unwrap()],
            ..TranspileConfig::default()
        };
        let result = analyzed(PluginOptions::default(), config);
        let code = result.convert_path();

        assert!(code.contains(r#"import Button from "./button.js";"#));
        assert!(code.contains(r#"from "react";"#));
    }

    #[test]
    fn rules_for_other_frameworks_are_ignored() {
        let config = TranspileConfig {
            path_rules: vec![PathRule::new(Some("angular"), "react", "preact").unwrap()],
            ..TranspileConfig::default()
        };
        let result = analyzed(PluginOptions::default(), config);
        assert_eq!(result.convert_path(), COUNTER);
    }

    #[test]
    fn descriptor_replaces_component() {
        let button = HowToUse::new("vanilla", "Button").html(|previous, result| {
            let children = result.tree[previous.root].children.clone();
            let node = ComponentNode::with_children("button", children);
            Ok(NodeRewrite::Replace(result.tree.create_node(node)))
        });
        let config = TranspileConfig {
            how_to_uses: vec![button],
            ..TranspileConfig::default()
        };
        let mut result = analyzed(PluginOptions::default(), config);
        let mut seen = Vec::new();

        result
            .search_nodes(true, |result, inline| {
                if let InlineValue::Node(id) = inline.value {
                    seen.push(result.tree[id].target.clone());
                }
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec!["div", "button", "button", "span", "span", "div"]);
        assert_eq!(
            targets(&result),
            vec![
                "<div>", "<button>", "{count}", "</button>", "<span>", "reset", "</span>", "</div>"
            ]
        );
        let root = &result.tree[result.node_result.root];
        let NodeChild::Node(first) = root.children[0].clone() else {
            panic!("expected node");
        };
        assert_eq!(result.tree[first].parent, Some(result.node_result.root));
    }

    #[test]
    fn descriptor_can_elide_component() {
        let button = HowToUse::new("vanilla", "Button").html(|_, _| Ok(NodeRewrite::Elide));
        let config = TranspileConfig {
            how_to_uses: vec![button],
            ..TranspileConfig::default()
        };
        let mut result = analyzed(PluginOptions::default(), config);
        result.search_nodes(true, |_, _| Ok(())).unwrap();

        assert_eq!(
            targets(&result),
            vec!["<div>", "<span>", "reset", "</span>", "</div>"]
        );
    }

    #[test]
    fn search_without_descriptors_visits_everything() {
        let button = HowToUse::new("vanilla", "Button").html(|_, _| Ok(NodeRewrite::Elide));
        let config = TranspileConfig {
            how_to_uses: vec![button],
            ..TranspileConfig::default()
        };
        let mut result = analyzed(PluginOptions::default(), config);
        let mut count = 0;
        result
            .search_nodes(false, |_, _| {
                count += 1;
                Ok(())
            })
            .unwrap();

        assert_eq!(count, 8);
    }

    #[test]
    fn instance_writers_receive_component_subtree() {
        let button = HowToUse::new("vanilla", "Button")
            .import(ImportDescriptor::new("./button").default_import("Button"))
            .instance(|previous, result| {
                let parent = result.tree.parent(previous.root).map(|p| p.class_name.value.clone());
                Ok(format!(
                    "{} entries under {}",
                    previous.inline_nodes.len(),
                    parent.unwrap_or_default()
                ))
            });
        let config = TranspileConfig {
            how_to_uses: vec![button, HowToUse::new("angular", "Span")],
            ..TranspileConfig::default()
        };
        let mut result = analyzed(PluginOptions::default(), config);

        let codes = result.how_to_uses(true).unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].code, "3 entries under a");
        assert_eq!(result.how_to_uses(false).unwrap()[0].code, "");

        let imports: Vec<String> = result.import_codes().into_iter().map(|i| i.code).collect();
        assert_eq!(imports, vec![r#"import Button from "./button";"#]);
    }

    #[test]
    fn module_replacement_skips_bindings() {
        assert_eq!(
            replace_module(r#"import a from "a";"#, "a", "b"),
            r#"import a from "b";"#
        );
    }

    #[test]
    fn extracts_bare_return_markup() {
        let code = "function A() {\n    return <div className=\"x\"/>;\n}\n";
        assert_eq!(extract_markup(code), "<div className=\"x\"/>");
        assert_eq!(extract_markup("const a = 1;"), "");
    }
}
