//! Target code generators and the converter façade.
//!
//! Each target is a [`Plugin`](retrofit_core::Plugin); [`CodeConverter`]
//! runs one source component through any of them.

pub mod config;
pub mod converter;
pub mod targets;
pub mod usage;

pub use config::{ComponentConfig, ConfigError, PathRuleConfig, RetrofitConfig};
pub use converter::CodeConverter;
pub use targets::{
    angular_options, vanilla_options, AngularCode, AngularHtml, ReactCode, Target, UnknownTarget,
    VanillaCode, VanillaHtml,
};
pub use usage::{elision, instance_snippet, tag_substitution};
