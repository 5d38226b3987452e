//! Analysis and conversion state for retrofitting React components.
//!
//! The source component is read with delimiter-based matching, not a full
//! parser: the markup block, import statements and `useState` hooks are
//! located by region and the markup is tokenized into a component tree.
//! Target plugins turn that state into code.

pub mod analyze;
pub mod case;
pub mod imports;
pub mod matcher;
pub mod node;
pub mod options;
pub mod template;
pub mod traits;
pub mod transpile;

pub use analyze::{analyze_markup, convert_style, extract_variables, parse_event, StateVariable};
pub use case::{camelize, decamelize, lower_first};
pub use imports::{
    filter_framework, parse_imports, render_imports, FrameworkScoped, ImportCode,
    ImportDescriptor, PathRule,
};
pub use matcher::{
    first_group, match_text_area, match_text_areas, match_text_close, match_text_open,
    split_comma, split_text, Delimiter, MatchArea, MatchResult, OpenClose, Separator,
    SplitOptions,
};
pub use node::{
    convert_class_selector, find_attribute, ComponentNode, InlineNode, InlineValue,
    NodeAttribute, NodeChild, NodeEvent, NodeId, NodeResult, NodeTree, RefBinding,
};
pub use options::{find_react_ref, find_setter_area, PluginOptions};
pub use template::{Props, Resolver, Template, TemplateValue};
pub use traits::{HowToUse, HtmlRewriter, InstanceWriter, NodeRewrite, Plugin, TranspileError};
pub use transpile::{
    extract_markup, HowToUseCode, Method, TranspileConfig, TranspileResult, SOURCE_FRAMEWORK,
};
