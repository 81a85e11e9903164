//! Implementation of `facade-recipe resolve`.

use std::fmt;

use anyhow::{Context, Result};

use crate::core::options::{OptionOverlay, UpstreamOptions};
use crate::core::platform::{BuildType, Os, PlatformError, PlatformFacts};
use crate::core::recipe::Recipe;
use crate::resolver::{self, Resolution};
use crate::util::config::Config;

/// Caller input for a resolution, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Platform settings as `key=value` (os, build_type, compiler, arch)
    pub settings: Vec<String>,

    /// Option assignments as `name=value`
    pub options: Vec<String>,

    /// Upstream `shared` assignments as `package=value`
    pub upstream: Vec<String>,
}

/// Platform facts: host, then config settings, then command-line settings.
pub fn platform_facts(config: &Config, settings: &[String]) -> Result<PlatformFacts> {
    layer_platform(PlatformFacts::host(), config, settings)
}

fn layer_platform(
    host: Result<PlatformFacts, PlatformError>,
    config: &Config,
    settings: &[String],
) -> Result<PlatformFacts> {
    let base = match host {
        Ok(facts) => facts,
        Err(err) => {
            // An unrecognized host is usable only when the OS is given explicitly.
            let os = explicit_os(settings)
                .or(config.settings.os)
                .ok_or(err)
                .context("cannot detect the host platform; pass `-s os=<OS>`")?;
            PlatformFacts::new(os, BuildType::Release)
        }
    };

    let mut facts = config.platform(base);
    for setting in settings {
        facts = facts
            .with_setting(setting)
            .with_context(|| format!("invalid setting `{}`", setting))?;
    }
    Ok(facts)
}

/// Last `os=` value on the command line, if it parses.
fn explicit_os(settings: &[String]) -> Option<Os> {
    settings
        .iter()
        .rev()
        .filter_map(|s| s.split_once('='))
        .find(|(key, _)| key.trim() == "os")
        .and_then(|(_, value)| value.trim().parse().ok())
}

/// Resolve the recipe against configuration and command-line input.
pub fn resolve_recipe(recipe: &Recipe, config: &Config, opts: &ResolveOptions) -> Result<Resolution> {
    let platform = platform_facts(config, &opts.settings)?;

    let mut requested = config.options.clone();
    requested.merge(&OptionOverlay::parse_assignments(&opts.options)?);

    let mut upstream = config.upstream.clone();
    upstream.merge(&UpstreamOptions::parse_assignments(&opts.upstream)?);

    tracing::info!("Resolving {} {} for {}", recipe.name, recipe.version, platform);

    Ok(resolver::resolve(recipe, &platform, &requested, &upstream))
}

/// Human-readable summary of a resolution.
pub struct ResolutionSummary<'a>(pub &'a Resolution);

impl fmt::Display for ResolutionSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = self.0;

        writeln!(f, "platform: {}", res.platform)?;
        writeln!(f, "options:")?;
        for (name, value) in res.options.iter() {
            writeln!(f, "  {} = {}", name, value)?;
        }

        writeln!(f, "upstream:")?;
        for (name, shared) in res.upstream.iter() {
            writeln!(f, "  {}:shared = {}", name, shared)?;
        }

        writeln!(f, "requires:")?;
        for req in &res.requires {
            writeln!(f, "  {}", req)?;
        }

        if !res.build_requires.is_empty() {
            writeln!(f, "build_requires:")?;
            for req in &res.build_requires {
                writeln!(f, "  {}", req)?;
            }
        }

        writeln!(f, "definitions:")?;
        for (key, value) in res.definitions.iter() {
            writeln!(f, "  {} = {}", key, if value { "ON" } else { "OFF" })?;
        }

        writeln!(f, "libs: {}", res.package_info.libs.join(", "))
    }
}

pub fn format_resolution(resolution: &Resolution) -> String {
    ResolutionSummary(resolution).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::OptionName;

    fn opts(settings: &[&str], options: &[&str]) -> ResolveOptions {
        ResolveOptions {
            settings: settings.iter().map(|s| s.to_string()).collect(),
            options: options.iter().map(|s| s.to_string()).collect(),
            upstream: Vec::new(),
        }
    }

    #[test]
    fn test_cli_options_override_config() {
        let config = Config {
            options: OptionOverlay::new()
                .with(OptionName::EnableJava, true)
                .with(OptionName::Shared, false),
            ..Config::default()
        };

        let res = resolve_recipe(
            &Recipe::facade(),
            &config,
            &opts(&["os=Linux"], &["shared=True"]),
        )
        .unwrap();

        assert!(res.options.shared);
        assert!(res.options.enable_java);
    }

    #[test]
    fn test_settings_override_host() {
        let res = resolve_recipe(
            &Recipe::facade(),
            &Config::default(),
            &opts(&["os=Windows", "build_type=Debug"], &[]),
        )
        .unwrap();

        assert_eq!(res.platform.os, Os::Windows);
        assert_eq!(res.platform.build_type, BuildType::Debug);
        assert_eq!(res.library(), "utfacade130d");
    }

    #[test]
    fn test_invalid_input_fails_fast() {
        let recipe = Recipe::facade();
        let config = Config::default();

        let err = resolve_recipe(&recipe, &config, &opts(&["os=Amiga"], &[])).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown operating system `Amiga`"));

        let err = resolve_recipe(&recipe, &config, &opts(&[], &["turbo=True"])).unwrap_err();
        assert!(err.to_string().contains("unknown option `turbo`"));
    }

    #[test]
    fn test_unknown_host_needs_explicit_os() {
        let unknown =
            || -> Result<PlatformFacts, PlatformError> { Err(PlatformError::UnknownOs("netbsd".into())) };
        let config = Config::default();

        let err = layer_platform(unknown(), &config, &[]).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("-s os=<OS>"));
        assert!(message.contains("unknown operating system `netbsd`"));

        let facts =
            layer_platform(unknown(), &config, &["os=FreeBSD".to_string()]).unwrap();
        assert_eq!(facts.os, "FreeBSD".parse::<Os>().unwrap());
        assert_eq!(facts.build_type, BuildType::Release);

        let config = Config {
            settings: crate::util::config::SettingsConfig {
                os: Some(Os::Linux),
                ..Default::default()
            },
            ..Config::default()
        };
        let facts = layer_platform(unknown(), &config, &[]).unwrap();
        assert_eq!(facts.os, Os::Linux);
    }

    #[test]
    fn test_format_resolution() {
        let res = resolve_recipe(
            &Recipe::facade(),
            &Config::default(),
            &opts(&["os=Linux"], &["enable_java=True"]),
        )
        .unwrap();

        let text = format_resolution(&res);
        assert!(text.contains("enable_java = true"));
        assert!(text.contains("ubitrack_core:shared = true"));
        assert!(text.contains("java_installer/9.0.0@bincrafters/stable"));
        assert!(text.contains("ENABLE_JAVA_WRAPPER = ON"));
        assert!(text.contains("libs: utfacade"));
        assert!(text.contains("build_requires:\n"));
        assert_eq!(text, ResolutionSummary(&res).to_string());
    }
}
