//! Import statements: parsing, module path rules and merged rendering.

use crate::matcher::{match_text_areas, split_comma, MatchResult};
use indexmap::IndexMap;
use regex::Regex;
use retrofit_blocks::{convert_blocks_to_code, object_block, text_block};
use serde::Serialize;
use std::sync::LazyLock;

static IMPORT_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bimport\s+").expect("Invalid import regex"));

static IMPORT_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s*from\s*["']([^"']+)["'];?"#).expect("Invalid import source regex")
});

static SIDE_EFFECT_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s*["'][^"']*["'];?"#).expect("Invalid side effect import regex")
});

static ALIAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+as\s+").expect("Invalid alias regex"));

/// Anything that applies to one framework, or to all of them.
pub trait FrameworkScoped {
    fn applies_to(&self, framework: &str) -> bool;
}

/// Items that apply to `framework`, in order.
pub fn filter_framework<T: FrameworkScoped + Clone>(items: &[T], framework: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.applies_to(framework))
        .cloned()
        .collect()
}

/// One import statement.
///
/// `specifiers` maps imported name to local name; `default` and `*` are the
/// default and namespace bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportDescriptor {
    /// Statement as written (empty for registered imports)
    pub text: String,
    pub framework: Option<String>,
    pub specifiers: IndexMap<String, String>,
    pub module: String,
}

impl ImportDescriptor {
    pub fn new(module: &str) -> Self {
        Self {
            module: module.to_string(),
            ..Self::default()
        }
    }

    pub fn framework(mut self, framework: &str) -> Self {
        self.framework = Some(framework.to_string());
        self
    }

    /// `import local from "module"`.
    pub fn default_import(mut self, local: &str) -> Self {
        self.specifiers.insert("default".to_string(), local.to_string());
        self
    }

    /// `import { name } from "module"`.
    pub fn named(mut self, name: &str) -> Self {
        self.specifiers.insert(name.to_string(), name.to_string());
        self
    }
}

impl FrameworkScoped for ImportDescriptor {
    fn applies_to(&self, framework: &str) -> bool {
        self.framework.as_deref().is_none_or(|f| f == framework)
    }
}

/// Rewrites the module of matching imports.
#[derive(Debug, Clone)]
pub struct PathRule {
    pub framework: Option<String>,
    pub rule: Regex,
    pub module: String,
    pub specifiers: IndexMap<String, String>,
}

impl PathRule {
    pub fn new(framework: Option<&str>, rule: &str, module: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            framework: framework.map(str::to_string),
            rule: Regex::new(rule)?,
            module: module.to_string(),
            specifiers: IndexMap::new(),
        })
    }
}

impl FrameworkScoped for PathRule {
    fn applies_to(&self, framework: &str) -> bool {
        self.framework.as_deref().is_none_or(|f| f == framework)
    }
}

/// Every import statement of `code`, tagged with `framework`.
///
/// Side-effect imports (`import "./style.css";`) bind nothing and are skipped.
pub fn parse_imports(code: &str, framework: &str) -> Vec<ImportDescriptor> {
    let code = SIDE_EFFECT_IMPORT_RE.replace_all(code, "");

    match_text_areas(&code, &*IMPORT_OPEN_RE, &*IMPORT_CLOSE_RE, true)
        .iter()
        .map(|area| parse_import(area, framework))
        .collect()
}

fn parse_import(area: &MatchResult, framework: &str) -> ImportDescriptor {
    let clause = area.original_text.trim();
    let clause = clause.strip_prefix("type ").unwrap_or(clause);
    let mut specifiers = IndexMap::new();

    collect_specifiers(clause, true, &mut specifiers);

    ImportDescriptor {
        text: area.text.clone(),
        framework: Some(framework.to_string()),
        specifiers,
        module: area.closer.group(1).unwrap_or_default().to_string(),
    }
}

fn collect_specifiers(clause: &str, is_root: bool, specifiers: &mut IndexMap<String, String>) {
    for part in split_comma(clause) {
        if let Some(inner) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
            collect_specifiers(inner, false, specifiers);
            continue;
        }
        let parts: Vec<&str> = ALIAS_RE.splitn(&part, 2).collect();
        let (name, local) = match parts.as_slice() {
            [name, local] => (name.trim(), local.trim()),
            _ => (part.trim(), part.trim()),
        };

        if name == "*" {
            specifiers.insert("*".to_string(), local.to_string());
        } else if is_root {
            specifiers.insert("default".to_string(), local.to_string());
        } else {
            let name = name.strip_prefix("type ").unwrap_or(name);
            specifiers.insert(name.to_string(), local.to_string());
        }
    }
}

/// A rendered import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCode {
    pub module: String,
    pub code: String,
}

/// Merge descriptors by module and render one statement per module.
///
/// Modules keep their first-registration order. A namespace import gets its
/// own statement. Modules with no bindings are omitted.
pub fn render_imports<'a>(
    descriptors: impl IntoIterator<Item = &'a ImportDescriptor>,
    indent: usize,
) -> Vec<ImportCode> {
    let mut merged: IndexMap<&str, IndexMap<&str, &str>> = IndexMap::new();

    for descriptor in descriptors {
        let specifiers = merged.entry(descriptor.module.as_str()).or_default();
        for (name, local) in &descriptor.specifiers {
            specifiers.insert(name.as_str(), local.as_str());
        }
    }

    let mut codes = Vec::new();

    for (module, specifiers) in merged {
        let mut clauses = Vec::new();

        if let Some(local) = specifiers.get("*") {
            codes.push(ImportCode {
                module: module.to_string(),
                code: format!("import * as {local} from \"{module}\";"),
            });
        }
        if let Some(local) = specifiers.get("default") {
            clauses.push(local.to_string());
        }
        let named: Vec<_> = specifiers
            .iter()
            .map(|(name, local)| (*name, *local))
            .filter(|(name, _)| !matches!(*name, "*" | "default"))
            .map(|(name, local)| {
                if name == local {
                    text_block(name)
                } else {
                    text_block(format!("{name} as {local}"))
                }
            })
            .collect();

        if !named.is_empty() {
            clauses.push(convert_blocks_to_code(&[object_block(named)], indent, 0));
        }
        if clauses.is_empty() {
            continue;
        }
        codes.push(ImportCode {
            module: module.to_string(),
            code: format!("import {} from \"{module}\";", clauses.join(", ")),
        });
    }
    codes
}
