//! React pass-through target.

use retrofit_core::{Plugin, Template, TranspileError, TranspileResult};

/// Re-emits the source with import paths rewritten.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReactCode;

impl Plugin for ReactCode {
    fn framework(&self) -> &'static str {
        "react"
    }

    fn convert(&self, result: &mut TranspileResult) -> Result<Template, TranspileError> {
        Ok(Template::from_code(&result.convert_path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use retrofit_core::{PathRule, Props, TranspileConfig};

    const SOURCE: &str = r#"import React, { useState } from "react";
import Moveable from "react-moveable";

export default function App() {
    const [count, setCount] = useState(0);

    return (
        <div className="app">
            <Moveable target={".app"} draggable={true} />
            <button onClick={() => setCount(count + 1)}>{count}</button>
        </div>
    );
}
"#;

    #[test]
    fn round_trips_without_rules() {
        let mut result = TranspileResult::new(SOURCE, &ReactCode, TranspileConfig::default());
        let template = ReactCode.convert(&mut result).unwrap();

        assert_eq!(template.render(&Props::new()), SOURCE);
    }

    #[test]
    fn rewrites_matching_modules() {
        let config = TranspileConfig {
            path_rules: vec![PathRule::new(Some("react"), "^react-moveable$", "preact-moveable").unwrap()],
            ..TranspileConfig::default()
        };
        let mut result = TranspileResult::new(SOURCE, &ReactCode, config);
        let code = ReactCode.convert(&mut result).unwrap().render(&Props::new());

        assert!(code.contains(r#"import Moveable from "preact-moveable";"#));
        assert!(code.contains(r#"import React, { useState } from "react";"#));
    }

    #[test]
    fn props_become_slots() {
        let source = "export default function App(props) {\n    return (\n        <div>{props.label}</div>\n    );\n}\n";
        let mut result = TranspileResult::new(source, &ReactCode, TranspileConfig::default());
        let template = ReactCode.convert(&mut result).unwrap();

        let mut props = Props::new();
        props.insert("label".into(), "Save".into());
        assert!(template.render(&props).contains(r#"<div>{"Save"}</div>"#));
    }
}
