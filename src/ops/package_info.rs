//! Implementation of `facade-recipe info`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::resolver::Resolution;
use crate::util::fs::write_string;

/// Package info as pretty-printed JSON.
pub fn package_info_json(resolution: &Resolution) -> Result<String> {
    serde_json::to_string_pretty(&resolution.package_info)
        .context("failed to serialize package info")
}

/// Write the package info JSON to `path`.
pub fn write_package_info(resolution: &Resolution, path: &Path) -> Result<()> {
    let json = package_info_json(resolution)?;
    write_string(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::{OptionOverlay, UpstreamOptions};
    use crate::core::platform::{BuildType, Os, PlatformFacts};
    use crate::core::recipe::Recipe;
    use crate::resolver::resolve;
    use tempfile::TempDir;

    fn windows_debug() -> Resolution {
        resolve(
            &Recipe::facade(),
            &PlatformFacts::new(Os::Windows, BuildType::Debug),
            &OptionOverlay::new(),
            &UpstreamOptions::new(),
        )
    }

    #[test]
    fn test_package_info_json() {
        let json = package_info_json(&windows_debug()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "ubitrack_facade");
        assert_eq!(value["version"], "1.3.0");
        assert_eq!(value["license"], "GPL");
        assert_eq!(value["libs"][0], "utfacade130d");
        assert_eq!(value["requires"][0], "ubitrack_core/1.3.0@ulricheck/stable");
        assert_eq!(value["options"]["enable_dotnet"], true);
    }

    #[test]
    fn test_write_package_info() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("package/package_info.json");

        write_package_info(&windows_debug(), &path).unwrap();
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("\"utfacade130d\""));
    }
}
