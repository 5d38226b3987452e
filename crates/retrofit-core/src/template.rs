//! Prop-parameterized output templates.

use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Props passed to [`Template::render`].
pub type Props = Map<String, Value>;

/// Resolver for a [`TemplateValue::Computed`] slot. `None` falls back to the slot name.
pub type Resolver = Arc<dyn Fn(&Props) -> Option<String> + Send + Sync>;

static APP_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"App\([^)]*\)").expect("Invalid app call regex"));

static PROPS_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"props\.([a-zA-Z0-9_]+)").expect("Invalid props key regex"));

/// A slot between two literal strings.
#[derive(Clone)]
pub enum TemplateValue {
    /// Replaced by the JSON form of `props[key]`
    Key(String),
    Nested(Template),
    Computed { name: String, resolve: Resolver },
}

impl fmt::Debug for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Key(key) => f.debug_tuple("Key").field(key).finish(),
            TemplateValue::Nested(template) => f.debug_tuple("Nested").field(template).finish(),
            TemplateValue::Computed { name, .. } => {
                f.debug_struct("Computed").field("name", name).finish()
            }
        }
    }
}

/// Literal strings interleaved with slots; `strings` has one more entry than `values`.
#[derive(Debug, Clone)]
pub struct Template {
    pub strings: Vec<String>,
    pub values: Vec<TemplateValue>,
}

impl Default for Template {
    fn default() -> Self {
        Self::literal("")
    }
}

impl Template {
    /// A template with no slots.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            strings: vec![text.into()],
            values: Vec::new(),
        }
    }

    /// Turn generated code into a template.
    ///
    /// Calls to `App(...)` lose their arguments and every `props.<key>`
    /// becomes a slot.
    pub fn from_code(code: &str) -> Self {
        let preview = APP_CALL_RE.replace_all(code, "App()");
        let mut strings = Vec::new();
        let mut values = Vec::new();
        let mut last = 0;

        for caps in PROPS_KEY_RE.captures_iter(&preview) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            strings.push(preview[last..whole.start()].to_string());
            values.push(TemplateValue::Key(key.as_str().to_string()));
            last = whole.end();
        }
        strings.push(preview[last..].to_string());

        Self { strings, values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.strings.iter().all(String::is_empty)
    }

    /// Substitute props into the slots.
    ///
    /// Missing keys render as nothing. A computed slot whose resolver gives
    /// up renders its name.
    pub fn render(&self, props: &Props) -> String {
        let mut out = String::new();

        for (i, text) in self.strings.iter().enumerate() {
            out.push_str(text);

            let Some(value) = self.values.get(i) else {
                continue;
            };
            match value {
                TemplateValue::Key(key) => {
                    if let Some(prop) = props.get(key) {
                        out.push_str(&serde_json::to_string(prop).unwrap_or_default());
                    }
                }
                TemplateValue::Nested(template) => out.push_str(&template.render(props)),
                TemplateValue::Computed { name, resolve } => {
                    out.push_str(&resolve(props).unwrap_or_else(|| name.clone()));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn props(value: Value) -> Props {
        match value {
            Value::Object(map) => map,
            _ => Props::new(),
        }
    }

    #[test]
    fn splits_props_into_slots() {
        let template = Template::from_code("const a = props.width + props.height;");

        assert_eq!(template.strings, vec!["const a = ", " + ", ";"]);
        assert_eq!(template.values.len(), 2);
        assert_eq!(
            template.render(&props(json!({ "width": 10, "height": "2px" }))),
            r#"const a = 10 + "2px";"#
        );
    }

    #[test]
    fn missing_props_render_empty() {
        let template = Template::from_code("f(props.x);");
        assert_eq!(template.render(&Props::new()), "f();");
    }

    #[test]
    fn strips_app_call_arguments() {
        let template = Template::from_code("render(App(props, 1));");
        assert_eq!(template.render(&Props::new()), "render(App());");
    }

    #[test]
    fn code_without_props_is_unchanged() {
        let code = "export default function Button() {\n    return <button/>;\n}\n";
        let template = Template::from_code(code);

        assert_eq!(template.values.len(), 0);
        assert_eq!(template.render(&Props::new()), code);
    }

    #[test]
    fn computed_slot_falls_back_to_name() {
        let template = Template {
            strings: vec!["<".into(), " ".into(), ">".into()],
            values: vec![
                TemplateValue::Computed {
                    name: "tag".into(),
                    resolve: Arc::new(|props| props.get("tag")?.as_str().map(str::to_string)),
                },
                TemplateValue::Nested(Template::literal("x")),
            ],
        };

        assert_eq!(template.render(&props(json!({ "tag": "div" }))), "<div x>");
        assert_eq!(template.render(&Props::new()), "<tag x>");
    }
}
