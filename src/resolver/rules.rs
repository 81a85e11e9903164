//! Override rules applied after the caller's overlay.
//!
//! Precedence is the order of [`OVERRIDE_RULES`] and nothing else: each rule
//! sees the result of the rules before it. The simplefacade gate runs after
//! the Windows dotnet rule, so a Windows host without simplefacade ends up
//! with dotnet disabled.

use std::fmt;

use crate::core::options::{OptionSet, UpstreamOptions};
use crate::core::platform::PlatformFacts;
use crate::core::recipe::UPSTREAM_LIBRARIES;

/// One derivation step over the working option state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideRule {
    /// Windows always builds the .NET wrapper.
    WindowsForcesDotnet,
    /// Both language wrappers need the simple facade.
    SimpleFacadeGatesWrappers,
    /// A shared build links shared upstream libraries. Never forces false.
    SharedPropagatesUpstream,
}

/// The override rules, in the order they are applied.
pub const OVERRIDE_RULES: [OverrideRule; 3] = [
    OverrideRule::WindowsForcesDotnet,
    OverrideRule::SimpleFacadeGatesWrappers,
    OverrideRule::SharedPropagatesUpstream,
];

/// Option state being derived during a single resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingState {
    pub options: OptionSet,
    pub upstream: UpstreamOptions,
}

impl OverrideRule {
    pub fn name(&self) -> &'static str {
        match self {
            OverrideRule::WindowsForcesDotnet => "windows-forces-dotnet",
            OverrideRule::SimpleFacadeGatesWrappers => "simplefacade-gates-wrappers",
            OverrideRule::SharedPropagatesUpstream => "shared-propagates-upstream",
        }
    }

    /// Apply the rule, returning whether anything changed.
    pub fn apply(&self, platform: &PlatformFacts, state: &mut WorkingState) -> bool {
        let before = state.clone();

        match self {
            OverrideRule::WindowsForcesDotnet => {
                if platform.os.is_windows() {
                    state.options.enable_dotnet = true;
                }
            }
            OverrideRule::SimpleFacadeGatesWrappers => {
                if !state.options.enable_simplefacade {
                    state.options.enable_java = false;
                    state.options.enable_dotnet = false;
                }
            }
            OverrideRule::SharedPropagatesUpstream => {
                if state.options.shared {
                    for package in UPSTREAM_LIBRARIES {
                        state.upstream.set_shared(package, true);
                    }
                }
            }
        }

        *state != before
    }
}

impl fmt::Display for OverrideRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run every rule in order, returning the rules that changed the state.
pub fn apply_all(platform: &PlatformFacts, state: &mut WorkingState) -> Vec<OverrideRule> {
    OVERRIDE_RULES
        .into_iter()
        .filter(|rule| rule.apply(platform, state))
        .collect()
}
