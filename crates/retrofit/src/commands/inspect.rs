//! Analysis dump.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use retrofit_core::{ImportDescriptor, InlineNode, NodeId, NodeTree, StateVariable};
use retrofit_targets::{ReactCode, RetrofitConfig};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Inspection<'a> {
    imports: &'a [ImportDescriptor],
    variables: &'a [StateVariable],
    root: NodeId,
    inline_nodes: &'a [InlineNode],
    tree: &'a NodeTree,
}

/// Run the inspect command.
pub fn run(config_path: &Path, file: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    println!("{}", inspect_file(&config, file)?);
    Ok(())
}

/// Pretty JSON of what the analyzer extracted from `file`.
pub fn inspect_file(config: &RetrofitConfig, file: &Path) -> Result<String> {
    let source =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let result = config.converter(source)?.analyze(&ReactCode);

    let inspection = Inspection {
        imports: &result.imports,
        variables: &result.variables,
        root: result.node_result.root,
        inline_nodes: &result.node_result.inline_nodes,
        tree: &result.tree,
    };
    serde_json::to_string_pretty(&inspection).context("Failed to serialize analysis")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dumps_imports_state_and_nodes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Counter.tsx");
        fs::write(
            &file,
            r#"import { useState } from "react";

export default function Counter() {
    const [count, setCount] = useState(0);
    return (
        <div className="counter">{count}</div>
    );
}
"#,
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&inspect_file(&RetrofitConfig::default(), &file).unwrap()).unwrap();

        assert_eq!(json["imports"][0]["module"], "react");
        assert_eq!(json["variables"][0]["name"], "count");
        assert_eq!(json["variables"][0]["setter"], "setCount");
        assert_eq!(json["inline_nodes"].as_array().unwrap().len(), 3);
    }
}
