//! Per-target code templates for state setters and element refs.

use crate::analyze::StateVariable;
use crate::matcher::{first_group, match_text_open, MatchArea, MatchResult};
use crate::node::RefBinding;
use regex::Regex;
use std::fmt;

/// Statement that assigns `value` to a state variable.
pub type SetterTemplate = fn(&StateVariable, &str) -> String;

/// Expression naming a ref in the target.
pub type RefTemplate = fn(&RefBinding) -> String;

/// Pattern that finds uses of a ref in React source.
pub type RefFinder = fn(&RefBinding) -> Option<Regex>;

/// Locates the first `setter(...)` call in a text.
pub type SetterFinder = fn(&str, &str) -> MatchResult;

/// How a target writes setters and refs.
///
/// The default is React's own syntax, so converting with the defaults
/// rewrites nothing.
#[derive(Clone, Copy)]
pub struct PluginOptions {
    pub setter: SetterTemplate,
    pub getter_ref: RefTemplate,
    pub ref_name: RefTemplate,
    pub find_ref: RefFinder,
    pub find_setter_area: SetterFinder,
}

impl fmt::Debug for PluginOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginOptions").finish_non_exhaustive()
    }
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            setter: react_setter,
            getter_ref: react_getter_ref,
            ref_name: react_ref_name,
            find_ref: find_react_ref,
            find_setter_area,
        }
    }
}

fn react_setter(variable: &StateVariable, value: &str) -> String {
    format!("{}({value});", variable.setter)
}

fn react_getter_ref(binding: &RefBinding) -> String {
    format!("{}.current", binding.original_name)
}

fn react_ref_name(binding: &RefBinding) -> String {
    binding.original_name.clone()
}

/// `inputRef.current` (with any non-null assertions).
pub fn find_react_ref(binding: &RefBinding) -> Option<Regex> {
    Regex::new(&format!(
        r"\b{}\.current!*",
        regex::escape(&binding.original_name)
    ))
    .ok()
}

/// First `setter(args)` call with balanced parentheses, plus a trailing `;`.
///
/// `original_text` of the result is the argument text. Identifiers that
/// merely end with the setter name are not matched.
pub fn find_setter_area(text: &str, setter: &str) -> MatchResult {
    let Ok(call) = Regex::new(&format!(r"\b{}\s*\(", regex::escape(setter))) else {
        return MatchResult::default();
    };
    let opener = match_text_open(text, &call, true);
    let (Some(start), Some(call_start)) = (opener.index, opener.group(0)) else {
        return MatchResult::default();
    };
    let head_len = call_start.len() - 1;
    let Some(group) = first_group(&text[start + head_len..]) else {
        return MatchResult::default();
    };
    // an unterminated call yields the rest of the text, not a group
    let Some(arguments) = group.strip_prefix('(').and_then(|g| g.strip_suffix(')')) else {
        return MatchResult::default();
    };

    let end = start + head_len + group.len();
    let semicolon = text[end..].starts_with(';');
    let end = if semicolon { end + 1 } else { end };

    MatchResult {
        closer: MatchArea {
            groups: vec![Some(if semicolon { ");" } else { ")" }.to_string())],
            index: Some(end - start),
            text: text[start..end].to_string(),
            original_text: arguments.to_string(),
        },
        opener,
        text: text[start..end].to_string(),
        original_text: arguments.trim().to_string(),
    }
}
