//! Code generators, one [`Plugin`] per output kind.

pub mod angular;
pub mod react;
pub mod vanilla;

use std::fmt;
use std::str::FromStr;

use retrofit_core::Plugin;

pub use angular::{angular_options, AngularCode, AngularHtml};
pub use react::ReactCode;
pub use vanilla::{vanilla_options, VanillaCode, VanillaHtml};

/// Every generator, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    React,
    VanillaHtml,
    VanillaCode,
    AngularHtml,
    AngularCode,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown target `{0}` (expected one of: react, vanilla-html, vanilla, angular-html, angular)")]
pub struct UnknownTarget(pub String);

impl Target {
    pub const ALL: [Target; 5] = [
        Target::React,
        Target::VanillaHtml,
        Target::VanillaCode,
        Target::AngularHtml,
        Target::AngularCode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Target::React => "react",
            Target::VanillaHtml => "vanilla-html",
            Target::VanillaCode => "vanilla",
            Target::AngularHtml => "angular-html",
            Target::AngularCode => "angular",
        }
    }

    pub fn plugin(&self) -> Box<dyn Plugin> {
        match self {
            Target::React => Box::new(ReactCode),
            Target::VanillaHtml => Box::new(VanillaHtml),
            Target::VanillaCode => Box::new(VanillaCode),
            Target::AngularHtml => Box::new(AngularHtml),
            Target::AngularCode => Box::new(AngularCode),
        }
    }

    /// Output file suffix. `None` keeps the source extension.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Target::React => None,
            Target::VanillaHtml => Some("html"),
            Target::VanillaCode => Some("js"),
            Target::AngularHtml => Some("component.html"),
            Target::AngularCode => Some("component.ts"),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|target| target.name() == name)
            .ok_or_else(|| UnknownTarget(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for target in Target::ALL {
            assert_eq!(target.name().parse::<Target>().unwrap(), target);
        }
        assert!("svelte".parse::<Target>().is_err());
    }

    #[test]
    fn plugins_report_their_framework() {
        assert_eq!(Target::VanillaHtml.plugin().framework(), "vanilla");
        assert_eq!(Target::AngularCode.plugin().framework(), "angular");
        assert_eq!(Target::React.plugin().framework(), "react");
    }
}
