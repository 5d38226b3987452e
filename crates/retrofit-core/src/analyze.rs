//! Extraction of the component tree and state hooks from React source.

use crate::case::{decamelize, lower_first};
use crate::matcher::{
    first_group, match_text_area, match_text_areas, split_comma, split_text, SplitOptions,
};
use crate::node::{
    ComponentNode, InlineNode, NodeAttribute, NodeEvent, NodeResult, NodeTree, RefBinding,
};
use regex::Regex;
use retrofit_blocks::{find_indent, remove_indent};
use serde::Serialize;
use std::sync::LazyLock;

static OPEN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([A-Za-z][\w.\-]*)").expect("Invalid open tag regex"));

static CLOSE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^</([A-Za-z][\w.\-]*))|(?:/>$)").expect("Invalid close tag regex")
});

static TAG_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/?>$").expect("Invalid tag end regex"));

static EVENT_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^on[A-Z]").expect("Invalid event name regex"));

static EVENT_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^on([A-Z][^=]*)=\{").expect("Invalid event open regex"));

static EVENT_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\}\s*$").expect("Invalid event close regex"));

static PARAMS_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*").expect("Invalid params open regex"));

static PARAMS_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*=>").expect("Invalid params close regex"));

static PARAMS_SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\([^()]*\)|[A-Za-z_$][\w$]*)$").expect("Invalid params shape regex")
});

static ATTRIBUTE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^([^=\s]+)=(["'{])"#).expect("Invalid attribute regex"));

static ATTRIBUTE_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["'}]$"#).expect("Invalid attribute close regex"));

static BARE_ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][\w\-:]*$").expect("Invalid bare attribute regex"));

static STATE_HOOK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"const\s*\[\s*([A-Za-z_$][\w$]*)\s*(?:,\s*([A-Za-z_$][\w$]*)\s*)?\]\s*=\s*(?:React\.)?useState(?:<[^>]*>)?",
    )
    .expect("Invalid state hook regex")
});

static THUNK_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\)\s*=>\s*[({]").expect("Invalid thunk open regex"));

static THUNK_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;\s]*[})]\s*$").expect("Invalid thunk close regex"));

/// A `useState` hook, or a variable registered during conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateVariable {
    pub name: String,
    pub original_name: String,

    /// Initial value expression, thunks unwrapped
    pub value: String,

    /// Argument of `useState(...)` as written
    pub default_value: String,

    /// Setter function name (empty when the hook ignores it)
    pub setter: String,

    /// Initial value was a lazy initializer
    pub is_function: bool,
}

/// Tokenize JSX markup into a flat sequence and a linked tree.
///
/// An empty or text-only fragment yields an empty `div` root.
pub fn analyze_markup(markup: &str, tree: &mut NodeTree) -> NodeResult {
    let tokens = split_text(markup, &SplitOptions::markup());
    let mut inline_nodes = Vec::with_capacity(tokens.len());

    for token in tokens {
        let open = OPEN_TAG_RE.captures(&token);
        let close = CLOSE_TAG_RE.captures(&token);

        if open.is_none() && close.is_none() {
            inline_nodes.push(InlineNode::text(token.clone()));
            continue;
        }
        let target = open
            .as_ref()
            .and_then(|caps| caps.get(1))
            .or_else(|| close.as_ref().and_then(|caps| caps.get(1)))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let is_close = close.is_some();

        let Some(open) = open else {
            let id = tree.insert(ComponentNode::new(target));
            inline_nodes.push(InlineNode::node(id, false, true));
            continue;
        };
        let name_end = open.get(0).map_or(token.len(), |m| m.end());
        let attributes = TAG_END_RE.replace(&token[name_end..], "");

        let mut node = ComponentNode::new(target);
        node.inline = is_close;
        apply_attributes(&mut node, &attributes);

        let id = tree.insert(node);
        inline_nodes.push(InlineNode::node(id, true, is_close));
    }

    let root = match tree.link(&inline_nodes) {
        Some(root) => root,
        None => {
            tracing::debug!("Markup has no elements");
            tree.insert(ComponentNode::with_children("div", vec![]))
        }
    };

    NodeResult { root, inline_nodes }
}

/// Parse an attribute list into `node`.
fn apply_attributes(node: &mut ComponentNode, text: &str) {
    let is_component = node.is_component();

    for token in split_text(text, &SplitOptions::attributes()) {
        if EVENT_NAME_RE.is_match(&token) {
            if let Some(event) = parse_event(&token) {
                node.events.push(event);
            }
            continue;
        }
        let Some(attribute) = parse_attribute(&token) else {
            tracing::debug!(attribute = %token, "Skipping unrecognized attribute");
            continue;
        };

        match attribute.name.as_str() {
            "ref" => node.ref_binding = RefBinding::new(&attribute.value),
            "className" if !is_component => {
                node.class_name = NodeAttribute {
                    name: "class".to_string(),
                    ..attribute
                };
            }
            "style" if !is_component && attribute.dynamic => {
                let css = convert_style(&attribute.value);
                node.attributes.push(NodeAttribute::literal("style", &css));
            }
            _ => node.attributes.push(attribute),
        }
    }
}

fn parse_attribute(token: &str) -> Option<NodeAttribute> {
    let area = match_text_area(token, &*ATTRIBUTE_OPEN_RE, &*ATTRIBUTE_CLOSE_RE, false);

    if !area.opener.is_match() {
        return BARE_ATTRIBUTE_RE
            .is_match(token)
            .then(|| NodeAttribute::dynamic(token, "true"));
    }
    let name = area.opener.group(1).unwrap_or_default();
    let value = remove_indent(&area.text, find_indent(&area.text, true));

    Some(if area.opener.group(2) == Some("{") {
        NodeAttribute::dynamic(name, &value)
    } else {
        NodeAttribute::literal(name, &value)
    })
}

/// Parse `onX={handler}`. Returns `None` for anything that is not a braced handler.
pub fn parse_event(token: &str) -> Option<NodeEvent> {
    let area = match_text_area(token, &*EVENT_OPEN_RE, &*EVENT_CLOSE_RE, false);
    let name = area.opener.group(1)?;

    if !area.closer.is_match() {
        return None;
    }
    let body = area.text.trim();
    let params_area = match_text_area(body, &*PARAMS_OPEN_RE, &*PARAMS_CLOSE_RE, false);
    let params_text = params_area.text.trim();
    let is_function = params_area.closer.is_match() && PARAMS_SHAPE_RE.is_match(params_text);

    let params = if is_function {
        let inner = params_text
            .strip_prefix('(')
            .and_then(|p| p.strip_suffix(')'))
            .unwrap_or(params_text);
        split_comma(inner)
    } else {
        Vec::new()
    };

    Some(NodeEvent {
        name: lower_first(name),
        params,
        params_area: is_function.then_some(params_area),
        text: remove_indent(body, find_indent(body, true)),
        is_function,
    })
}

/// JSX style object to a CSS declaration list.
///
/// `{ backgroundColor: "red", width: 10 }` -> `background-color: red; width: 10;`
pub fn convert_style(object: &str) -> String {
    let object = object.trim();
    let inner = object
        .strip_prefix('{')
        .and_then(|o| o.strip_suffix('}'))
        .unwrap_or(object);

    split_comma(inner)
        .iter()
        .filter_map(|property| {
            let (name, value) = property.split_once(':')?;
            let name = name.trim().trim_matches(|c| c == '"' || c == '\'');
            Some(format!("{}: {};", decamelize(name, '-'), style_value(value.trim())))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn style_value(value: &str) -> String {
    if let Some(inner) = value.strip_prefix('`').and_then(|v| v.strip_suffix('`')) {
        let mut out = inner.to_string();
        for area in match_text_areas(inner, "${", "}", true) {
            out = out.replacen(&area.text, area.original_text.trim(), 1);
        }
        return out;
    }
    value
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

/// Every `const [x, setX] = useState(...)` in source order.
pub fn extract_variables(code: &str) -> Vec<StateVariable> {
    STATE_HOOK_RE
        .captures_iter(code)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let original_name = caps.get(1)?.as_str();
            let setter = caps.get(2).map_or("", |m| m.as_str());

            let default_value = first_group(&code[whole.end()..])
                .and_then(|group| {
                    group
                        .strip_prefix('(')
                        .and_then(|g| g.strip_suffix(')'))
                        .map(str::to_string)
                })
                .unwrap_or_default();
            let default_value = default_value.trim();
            let default_value = remove_indent(default_value, find_indent(default_value, true));
            let is_function = default_value.contains("()");

            let value = if is_function {
                unwrap_thunk(&default_value)
            } else {
                default_value.clone()
            };

            Some(StateVariable {
                name: original_name
                    .strip_suffix("Ref")
                    .filter(|name| !name.is_empty())
                    .unwrap_or(original_name)
                    .to_string(),
                original_name: original_name.to_string(),
                value,
                default_value,
                setter: setter.to_string(),
                is_function,
            })
        })
        .collect()
}

/// `() => { return x; }` -> `x`. Anything that is not a thunk is kept as is.
fn unwrap_thunk(text: &str) -> String {
    let area = match_text_area(text, &*THUNK_OPEN_RE, &*THUNK_CLOSE_RE, false);

    let body = if area.opener.is_match() && area.closer.is_match() {
        area.text
    } else {
        match text.split_once("=>") {
            Some((head, body)) if head.trim() == "()" => body.to_string(),
            _ => return text.to_string(),
        }
    };
    let body = body.trim();
    let body = body.strip_prefix("return").map_or(body, str::trim_start);
    let body = body.trim_end_matches(';').trim();

    remove_indent(body, find_indent(body, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{InlineValue, NodeChild};
    use pretty_assertions::assert_eq;

    fn targets(tree: &NodeTree, result: &NodeResult) -> Vec<String> {
        result
            .inline_nodes
            .iter()
            .map(|inline| match &inline.value {
                InlineValue::Node(id) if inline.is_open => format!("<{}>", tree[*id].target),
                InlineValue::Node(id) => format!("</{}>", tree[*id].target),
                InlineValue::Text(text) => text.clone(),
            })
            .collect()
    }

    #[test]
    fn analyzes_nested_markup() {
        let mut tree = NodeTree::new();
        let markup = r#"<div className="app">
    <Button onClick={() => setCount(count + 1)}>{count}</Button>
    <img src="a.png" />
</div>"#;
        let result = analyze_markup(markup, &mut tree);

        assert_eq!(
            targets(&tree, &result),
            vec!["<div>", "<Button>", "{count}", "</Button>", "<img>", "</div>"]
        );

        let root = &tree[result.root];
        assert_eq!(root.target, "div");
        assert_eq!(root.class_name.value, "app");
        assert_eq!(root.children.len(), 2);

        let NodeChild::Node(button) = root.children[0].clone() else {
            panic!("expected button");
        };
        let button = &tree[button];
        assert!(button.is_component());
        assert_eq!(button.events.len(), 1);
        assert_eq!(button.events[0].name, "click");
        assert_eq!(button.events[0].text, "() => setCount(count + 1)");
        assert!(button.events[0].is_function);
        assert_eq!(button.children, vec![NodeChild::Text("{count}".into())]);
    }

    #[test]
    fn open_and_close_tags_balance() {
        let mut tree = NodeTree::new();
        let markup = "<section><ul><li>a</li><li><b>b</b><br/></li></ul></section>";
        let result = analyze_markup(markup, &mut tree);

        let mut depth: i32 = 0;
        for inline in &result.inline_nodes {
            if inline.node_id().is_none() {
                continue;
            }
            match (inline.is_open, inline.is_close) {
                (true, false) => depth += 1,
                (false, true) => depth -= 1,
                _ => {}
            }
            assert!(depth >= 0);
        }
        assert_eq!(depth, 0);
    }

    #[test]
    fn self_closing_tag_is_inline() {
        let mut tree = NodeTree::new();
        let result = analyze_markup(r#"<input type="text" disabled />"#, &mut tree);
        let input = &tree[result.root];

        assert!(input.inline);
        assert_eq!(input.attributes[0], NodeAttribute::literal("type", "text"));
        assert_eq!(input.attributes[1], NodeAttribute::dynamic("disabled", "true"));
    }

    #[test]
    fn empty_markup_yields_empty_root() {
        let mut tree = NodeTree::new();
        let result = analyze_markup("", &mut tree);

        assert!(result.inline_nodes.is_empty());
        assert_eq!(tree[result.root].target, "div");
    }

    #[test]
    fn captures_ref_and_dynamic_attributes() {
        let mut tree = NodeTree::new();
        let result = analyze_markup(
            r#"<input ref={inputRef} value={text} className="field" />"#,
            &mut tree,
        );
        let input = &tree[result.root];

        assert_eq!(input.ref_binding.name, "input");
        assert_eq!(input.ref_binding.original_name, "inputRef");
        assert_eq!(input.attributes, vec![NodeAttribute::dynamic("value", "text")]);
        assert_eq!(input.class_name.default_value, "\"field\"");
    }

    #[test]
    fn component_keeps_class_name_prop() {
        let mut tree = NodeTree::new();
        let result = analyze_markup(r#"<Card className="x" />"#, &mut tree);
        let card = &tree[result.root];

        assert_eq!(card.class_name.value, "");
        assert_eq!(card.attributes[0].name, "className");
    }

    #[test]
    fn converts_style_objects() {
        assert_eq!(
            convert_style(r#"{ backgroundColor: "red", width: 10, transform: `translate(${x}px)` }"#),
            "background-color: red; width: 10; transform: translate(xpx);"
        );

        let mut tree = NodeTree::new();
        let result = analyze_markup(r#"<div style={{ marginTop: "4px" }}></div>"#, &mut tree);
        assert_eq!(
            tree[result.root].attribute("style"),
            Some(&NodeAttribute::literal("style", "margin-top: 4px;"))
        );
    }

    #[test]
    fn parses_event_params() {
        let event = parse_event("onMouseDown={(e, index) => {\n    move(e);\n}}").unwrap();

        assert_eq!(event.name, "mouseDown");
        assert_eq!(event.params, vec!["e", "index"]);
        assert!(event.is_function);

        let event = parse_event("onChange={handleChange}").unwrap();
        assert!(!event.is_function);
        assert!(event.params.is_empty());
        assert_eq!(event.text, "handleChange");

        assert_eq!(parse_event("onClick=\"x\""), None);
    }

    #[test]
    fn extracts_state_variables() {
        let code = r#"
    const [count, setCount] = useState(0);
    const [items] = React.useState<string[]>(() => {
        return ["a", "b"];
    });
    const [now, setNow] = useState(Date.now());
"#;
        let variables = extract_variables(code);

        assert_eq!(variables.len(), 3);
        assert_eq!(variables[0].name, "count");
        assert_eq!(variables[0].setter, "setCount");
        assert_eq!(variables[0].value, "0");
        assert!(!variables[0].is_function);

        assert_eq!(variables[1].name, "items");
        assert_eq!(variables[1].setter, "");
        assert!(variables[1].is_function);
        assert_eq!(variables[1].value, r#"["a", "b"]"#);

        assert_eq!(variables[2].value, "Date.now()");
    }

    #[test]
    fn state_names_drop_ref_suffix() {
        let variables = extract_variables(
            "const [boxRef, setBoxRef] = useState(null);\nconst [Ref, setRef] = useState(1);",
        );

        assert_eq!(variables[0].name, "box");
        assert_eq!(variables[0].original_name, "boxRef");
        assert_eq!(variables[0].setter, "setBoxRef");
        assert_eq!(variables[1].name, "Ref");
    }

    #[test]
    fn unspaced_comparison_stays_inside_attribute() {
        let mut tree = NodeTree::new();
        let result = analyze_markup(r#"<div title={a>b}><span>x</span></div>"#, &mut tree);

        assert_eq!(result.inline_nodes.len(), 5);
        let div = &tree[result.root];
        assert_eq!(div.attribute("title").map(|a| a.value.as_str()), Some("a>b"));
        assert!(div.attribute("title").is_some_and(|a| a.dynamic));
    }

    #[test]
    fn unwraps_expression_thunks() {
        assert_eq!(unwrap_thunk("() => 5"), "5");
        assert_eq!(unwrap_thunk("() => ({ a: 1 })"), "{ a: 1 }");
    }
}
