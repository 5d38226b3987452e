//! Target plugins and component usage descriptors.

use crate::imports::{FrameworkScoped, ImportDescriptor};
use crate::node::NodeResult;
use crate::options::PluginOptions;
use crate::template::Template;
use crate::transpile::TranspileResult;
use std::fmt;
use std::sync::Arc;

/// Errors that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum TranspileError {
    #[error("Specify the class or ref of the <{target}> element that handles events")]
    UnaddressableElement { target: String },

    #[error("Specify the class of the <{target}> element bound to ref `{reference}`")]
    MissingRefClass { target: String, reference: String },

    #[error("No free name left for `{0}`")]
    NameExhausted(String),

    #[error("Usage of <{component}> failed: {message}")]
    Usage { component: String, message: String },
}

/// What a usage descriptor does with a component's markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRewrite {
    /// Keep the component as written
    Unchanged,
    /// Drop the component and its subtree
    Elide,
    /// Splice in another tree
    Replace(NodeResult),
}

/// Rewrites a component occurrence in the markup.
pub type HtmlRewriter =
    Arc<dyn Fn(&NodeResult, &mut TranspileResult) -> Result<NodeRewrite, TranspileError> + Send + Sync>;

/// Produces the imperative code that instantiates a component.
pub type InstanceWriter =
    Arc<dyn Fn(&NodeResult, &mut TranspileResult) -> Result<String, TranspileError> + Send + Sync>;

/// How a component library is used from one target framework.
#[derive(Clone)]
pub struct HowToUse {
    /// Frameworks this applies to (all when empty)
    pub frameworks: Vec<String>,

    /// Tag name the descriptor matches
    pub component: String,

    pub imports: Vec<ImportDescriptor>,
    pub html: Option<HtmlRewriter>,
    pub instance: Option<InstanceWriter>,
}

impl fmt::Debug for HowToUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HowToUse")
            .field("frameworks", &self.frameworks)
            .field("component", &self.component)
            .field("imports", &self.imports)
            .field("html", &self.html.is_some())
            .field("instance", &self.instance.is_some())
            .finish()
    }
}

impl HowToUse {
    pub fn new(framework: &str, component: &str) -> Self {
        Self {
            frameworks: vec![framework.to_string()],
            component: component.to_string(),
            imports: Vec::new(),
            html: None,
            instance: None,
        }
    }

    pub fn import(mut self, import: ImportDescriptor) -> Self {
        self.imports.push(import);
        self
    }

    pub fn html<F>(mut self, html: F) -> Self
    where
        F: Fn(&NodeResult, &mut TranspileResult) -> Result<NodeRewrite, TranspileError>
            + Send
            + Sync
            + 'static,
    {
        self.html = Some(Arc::new(html));
        self
    }

    pub fn instance<F>(mut self, instance: F) -> Self
    where
        F: Fn(&NodeResult, &mut TranspileResult) -> Result<String, TranspileError>
            + Send
            + Sync
            + 'static,
    {
        self.instance = Some(Arc::new(instance));
        self
    }
}

impl FrameworkScoped for HowToUse {
    fn applies_to(&self, framework: &str) -> bool {
        self.frameworks.is_empty() || self.frameworks.iter().any(|f| f == framework)
    }
}

/// A conversion target.
pub trait Plugin: Send + Sync {
    /// Framework identifier (e.g., "react", "vanilla", "angular")
    fn framework(&self) -> &'static str;

    /// Setter and ref templates used while analyzing the source.
    fn options(&self) -> PluginOptions {
        PluginOptions::default()
    }

    /// Generate the target code.
    fn convert(&self, result: &mut TranspileResult) -> Result<Template, TranspileError>;
}
