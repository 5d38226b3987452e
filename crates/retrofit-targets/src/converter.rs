//! Converter façade: one source component, many targets.

use retrofit_core::{
    filter_framework, HowToUse, PathRule, Plugin, Props, Template, TranspileConfig,
    TranspileError, TranspileResult,
};

/// Holds a component's source plus the rules and descriptors to apply.
#[derive(Debug, Clone)]
pub struct CodeConverter {
    pub code: String,
    pub indent: usize,
    pub path_rules: Vec<PathRule>,
    pub how_to_uses: Vec<HowToUse>,
}

impl Default for CodeConverter {
    fn default() -> Self {
        Self {
            code: String::new(),
            indent: 4,
            path_rules: Vec::new(),
            how_to_uses: Vec::new(),
        }
    }
}

impl CodeConverter {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn add_path_rule(&mut self, rule: PathRule) -> &mut Self {
        self.path_rules.push(rule);
        self
    }

    pub fn add_how_to_use(&mut self, how_to_use: HowToUse) -> &mut Self {
        self.how_to_uses.push(how_to_use);
        self
    }

    /// Analysis state for `plugin`, with rules and descriptors narrowed to
    /// its framework.
    pub fn analyze(&self, plugin: &dyn Plugin) -> TranspileResult {
        let framework = plugin.framework();
        let config = TranspileConfig {
            indent: self.indent,
            how_to_uses: filter_framework(&self.how_to_uses, framework),
            path_rules: filter_framework(&self.path_rules, framework),
        };
        TranspileResult::new(&self.code, plugin, config)
    }

    pub fn try_convert_template(&self, plugin: &dyn Plugin) -> Result<Template, TranspileError> {
        let mut result = self.analyze(plugin);
        plugin.convert(&mut result)
    }

    /// Like [`try_convert_template`](Self::try_convert_template), but a
    /// failure is logged and yields an empty template.
    pub fn convert_template(&self, plugin: &dyn Plugin) -> Template {
        self.try_convert_template(plugin).unwrap_or_else(|e| {
            tracing::error!(framework = plugin.framework(), "Conversion failed: {}", e);
            Template::default()
        })
    }

    pub fn convert(&self, plugin: &dyn Plugin, props: &Props) -> String {
        self.convert_template(plugin).render(props)
    }
}
