//! Configuration resolution.
//!
//! [`resolve`] is a pure function from platform facts, the caller's option
//! overlay and upstream options to everything the build and the package
//! consumers need. It has no error path: all inputs are already typed.

pub mod definitions;
pub mod rules;

use serde::Serialize;

use crate::core::dependency::{Channel, DependencySpec, Requirement};
use crate::core::metadata::PackageInfo;
use crate::core::options::{OptionOverlay, OptionSet, UpstreamOptions};
use crate::core::platform::PlatformFacts;
use crate::core::recipe::{
    Recipe, JAVA_INSTALLER, STABLE_USER, SWIG, UPSTREAM_LIBRARIES, VIRTUALENV_GENERATOR,
};

pub use definitions::Definitions;
pub use rules::{OverrideRule, OVERRIDE_RULES};

/// The outcome of resolving a recipe for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub platform: PlatformFacts,
    pub options: OptionSet,
    pub upstream: UpstreamOptions,
    pub requires: DependencySpec,
    pub build_requires: DependencySpec,
    pub definitions: Definitions,
    pub package_info: PackageInfo,
}

impl Resolution {
    /// Channel the upstream libraries are consumed from.
    pub fn channel(&self) -> Channel {
        Channel::for_workspace_build(self.options.workspace_build)
    }

    /// Library label published to consumers.
    pub fn library(&self) -> &str {
        self.package_info.library()
    }
}

/// Resolve the recipe's options and derived outputs.
pub fn resolve(
    recipe: &Recipe,
    platform: &PlatformFacts,
    requested: &OptionOverlay,
    upstream: &UpstreamOptions,
) -> Resolution {
    let mut state = rules::WorkingState {
        options: recipe.default_options.overlaid(requested),
        upstream: upstream.clone(),
    };

    for rule in rules::apply_all(platform, &mut state) {
        tracing::debug!("override `{}` applied", rule);
    }

    let rules::WorkingState { options, upstream } = state;

    let requires = requirements(recipe, &options);
    let build_requires = build_requirements(platform, &options);
    let definitions = Definitions::project(&options);
    let package_info = PackageInfo::new(recipe, platform, requires.clone(), options);

    tracing::debug!("resolved options: {}", options);

    Resolution {
        platform: platform.clone(),
        options,
        upstream,
        requires,
        build_requires,
        definitions,
        package_info,
    }
}

/// Upstream libraries on the selected channel, then the generator on `stable`.
pub fn requirements(recipe: &Recipe, options: &OptionSet) -> DependencySpec {
    let channel = Channel::for_workspace_build(options.workspace_build);
    let version = recipe.version.to_string();

    UPSTREAM_LIBRARIES
        .iter()
        .map(|name| Requirement::new(*name, version.clone(), STABLE_USER, channel))
        .chain(std::iter::once(VIRTUALENV_GENERATOR.requirement()))
        .collect()
}

/// Tool packages needed only while building.
///
/// Off Windows the interface generator is expected from the system package
/// manager and is not requested.
pub fn build_requirements(platform: &PlatformFacts, options: &OptionSet) -> DependencySpec {
    let mut spec = DependencySpec::new();
    if options.enable_java {
        spec.push(JAVA_INSTALLER.requirement());
    }
    if (options.enable_java || options.enable_dotnet) && platform.os.is_windows() {
        spec.push(SWIG.requirement());
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::OptionName;
    use crate::core::platform::{BuildType, Os};

    fn platform(os: Os, build_type: BuildType) -> PlatformFacts {
        PlatformFacts::new(os, build_type)
    }

    fn overlay(pairs: &[(OptionName, bool)]) -> OptionOverlay {
        pairs
            .iter()
            .fold(OptionOverlay::new(), |o, (name, value)| o.with(*name, *value))
    }

    fn run(platform: &PlatformFacts, requested: &OptionOverlay) -> Resolution {
        resolve(&Recipe::facade(), platform, requested, &UpstreamOptions::new())
    }

    fn all_overlays() -> Vec<OptionOverlay> {
        // Every total assignment of the six options.
        (0u32..64)
            .map(|bits| {
                OptionName::ALL
                    .iter()
                    .enumerate()
                    .fold(OptionOverlay::new(), |o, (i, name)| {
                        o.with(*name, bits & (1 << i) != 0)
                    })
            })
            .collect()
    }

    #[test]
    fn test_defaults_on_linux() {
        let res = run(&platform(Os::Linux, BuildType::Release), &OptionOverlay::new());
        assert_eq!(res.options, Recipe::facade().default_options);
        assert!(res.build_requires.is_empty());
        assert_eq!(res.library(), "utfacade");
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let p = platform(Os::Windows, BuildType::Debug);
        for requested in all_overlays() {
            assert_eq!(run(&p, &requested), run(&p, &requested));
        }
    }

    #[test]
    fn test_windows_forces_dotnet_when_simplefacade_enabled() {
        let p = platform(Os::Windows, BuildType::Release);
        for requested in all_overlays() {
            if requested.get(OptionName::EnableSimpleFacade) == Some(true) {
                assert!(run(&p, &requested).options.enable_dotnet);
            }
        }
    }

    #[test]
    fn test_simplefacade_gate_beats_windows_override() {
        for os in [Os::Windows, Os::Linux, Os::Macos] {
            let p = platform(os, BuildType::Release);
            for requested in all_overlays() {
                if requested.get(OptionName::EnableSimpleFacade) == Some(false) {
                    let res = run(&p, &requested);
                    assert!(!res.options.enable_java);
                    assert!(!res.options.enable_dotnet);
                }
            }
        }
    }

    #[test]
    fn test_shared_propagates_to_every_upstream() {
        let p = platform(Os::Linux, BuildType::Release);
        let upstream = UpstreamOptions::new().with_shared("ubitrack_vision", false);
        let res = resolve(
            &Recipe::facade(),
            &p,
            &overlay(&[(OptionName::Shared, true)]),
            &upstream,
        );
        for name in UPSTREAM_LIBRARIES {
            assert_eq!(res.upstream.shared(name), Some(true));
        }
    }

    #[test]
    fn test_static_build_leaves_upstream_alone() {
        let p = platform(Os::Linux, BuildType::Release);
        let upstream = UpstreamOptions::new().with_shared("ubitrack_core", true);
        let res = resolve(
            &Recipe::facade(),
            &p,
            &overlay(&[(OptionName::Shared, false)]),
            &upstream,
        );
        assert_eq!(res.upstream, upstream);
    }

    #[test]
    fn test_scenario_linux_gate_disables_java() {
        let p = platform(Os::Linux, BuildType::Release);
        let res = run(
            &p,
            &overlay(&[
                (OptionName::Shared, true),
                (OptionName::EnableSimpleFacade, false),
                (OptionName::EnableJava, true),
                (OptionName::WorkspaceBuild, false),
            ]),
        );

        assert!(res.options.shared);
        assert!(!res.options.enable_simplefacade);
        assert!(!res.options.enable_java);
        assert!(!res.options.enable_dotnet);
        assert_eq!(res.channel(), Channel::Stable);
        assert_eq!(res.library(), "utfacade");
        assert!(res.build_requires.is_empty());
    }

    #[test]
    fn test_scenario_windows_debug() {
        let p = platform(Os::Windows, BuildType::Debug);
        let res = run(
            &p,
            &overlay(&[
                (OptionName::Shared, true),
                (OptionName::EnableSimpleFacade, true),
                (OptionName::EnableJava, true),
                (OptionName::WorkspaceBuild, false),
            ]),
        );

        assert!(res.options.enable_dotnet);
        assert!(res.options.enable_java);
        assert_eq!(res.library(), "utfacade130d");
        assert_eq!(
            res.build_requires.references(),
            vec![
                "java_installer/9.0.0@bincrafters/stable",
                "swig/3.0.12@ulricheck/stable"
            ]
        );
        assert_eq!(res.definitions.get("ENABLE_DOTNET_WRAPPER"), Some(true));
    }

    #[test]
    fn test_scenario_workspace_build_channel() {
        let p = platform(Os::Windows, BuildType::Release);
        let res = run(&p, &overlay(&[(OptionName::WorkspaceBuild, true)]));

        assert_eq!(res.requires.len(), 4);
        for name in UPSTREAM_LIBRARIES {
            assert_eq!(res.requires.get(name).unwrap().channel, Channel::LocalDev);
        }
        let generator = res.requires.get(VIRTUALENV_GENERATOR.name).unwrap();
        assert_eq!(generator.channel, Channel::Stable);
        assert_eq!(
            res.requires.references(),
            vec![
                "ubitrack_core/1.3.0@local/dev",
                "ubitrack_vision/1.3.0@local/dev",
                "ubitrack_dataflow/1.3.0@local/dev",
                "ubitrack_virtualenv_generator/1.0@ulricheck/stable",
            ]
        );
    }

    #[test]
    fn test_swig_not_required_off_windows() {
        let p = platform(Os::Macos, BuildType::Release);
        let res = run(&p, &overlay(&[(OptionName::EnableJava, true)]));
        assert_eq!(
            res.build_requires.references(),
            vec!["java_installer/9.0.0@bincrafters/stable"]
        );
    }

    #[test]
    fn test_dotnet_only_on_windows_needs_swig_not_java() {
        let p = platform(Os::Windows, BuildType::Release);
        let res = run(&p, &OptionOverlay::new());
        assert_eq!(
            res.build_requires.references(),
            vec!["swig/3.0.12@ulricheck/stable"]
        );
    }

    #[test]
    fn test_declared_defaults_seed_before_overlay() {
        let recipe = Recipe::facade().with_defaults(OptionSet {
            shared: false,
            workspace_build: false,
            enable_basicfacade: true,
            enable_simplefacade: false,
            enable_dotnet: false,
            enable_java: true,
        });
        let requested = overlay(&[(OptionName::EnableSimpleFacade, true)]);
        let upstream = UpstreamOptions::new().with_shared("ubitrack_core", false);

        let res = resolve(
            &recipe,
            &platform(Os::Linux, BuildType::Release),
            &requested,
            &upstream,
        );
        assert!(res.options.enable_simplefacade);
        assert!(res.options.enable_java);
        assert!(!res.options.enable_dotnet);
        assert!(!res.options.shared);
        assert_eq!(res.upstream.shared("ubitrack_core"), Some(false));
        assert_eq!(res.build_requires.len(), 1);

        let res = resolve(
            &recipe,
            &platform(Os::Windows, BuildType::Release),
            &requested,
            &upstream,
        );
        assert!(res.options.enable_java);
        assert!(res.options.enable_dotnet);

        // Without the overlay the declared gate wins over the declared java flag.
        let res = resolve(
            &recipe,
            &platform(Os::Windows, BuildType::Release),
            &OptionOverlay::new(),
            &upstream,
        );
        assert!(!res.options.enable_java);
        assert!(!res.options.enable_dotnet);
    }

    #[test]
    fn test_definitions_follow_effective_options() {
        let p = platform(Os::Windows, BuildType::Release);
        let res = run(&p, &overlay(&[(OptionName::EnableSimpleFacade, false)]));
        for (key, option) in definitions::DEFINITION_KEYS {
            assert_eq!(res.definitions.get(key), Some(res.options.get(option)));
        }
    }
}
