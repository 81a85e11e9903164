//! Import runtime libraries from upstream packages into the build tree.
//!
//! Windows needs upstream DLLs next to the executables in `bin/`; macOS
//! needs the dylibs (including versioned symlink names) in `lib/`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::{copy_file, glob_files};

/// A file pattern copied from `src` in each upstream package to `dst`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportRule {
    pub pattern: &'static str,
    pub src: &'static str,
    pub dst: &'static str,
}

/// Runtime library import rules.
pub const IMPORT_RULES: [ImportRule; 2] = [
    ImportRule {
        pattern: "*.dll",
        src: "bin",
        dst: "bin",
    },
    ImportRule {
        pattern: "*.dylib*",
        src: "lib",
        dst: "lib",
    },
];

/// Copy matching files from every upstream package root into `dest_root`.
///
/// Package roots or rule source directories that don't exist are skipped.
pub fn import_runtime_libs(package_roots: &[PathBuf], dest_root: &Path) -> Result<Vec<PathBuf>> {
    let mut imported = Vec::new();

    for root in package_roots {
        if !root.is_dir() {
            tracing::warn!("upstream package directory not found: {}", root.display());
            continue;
        }

        for rule in IMPORT_RULES {
            let src_dir = root.join(rule.src);
            if !src_dir.is_dir() {
                continue;
            }

            for file in glob_files(&src_dir, rule.pattern)? {
                let Some(name) = file.file_name() else {
                    continue;
                };
                let dst = dest_root.join(rule.dst).join(name);
                copy_file(&file, &dst)?;
                tracing::debug!("imported {}", dst.display());
                imported.push(dst);
            }
        }
    }

    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_imports_dlls_and_dylibs() {
        let tmp = TempDir::new().unwrap();
        let core = tmp.path().join("ubitrack_core");
        fs::create_dir_all(core.join("bin")).unwrap();
        fs::create_dir_all(core.join("lib")).unwrap();
        fs::write(core.join("bin/utcore130.dll"), "dll").unwrap();
        fs::write(core.join("bin/utcore-cli.exe"), "exe").unwrap();
        fs::write(core.join("lib/libutcore.dylib"), "dylib").unwrap();
        fs::write(core.join("lib/libutcore.1.3.0.dylib"), "dylib").unwrap();
        fs::write(core.join("lib/libutcore.a"), "static").unwrap();

        let dest = tmp.path().join("build");
        let imported = import_runtime_libs(&[core], &dest).unwrap();

        assert_eq!(imported.len(), 3);
        assert!(dest.join("bin/utcore130.dll").exists());
        assert!(!dest.join("bin/utcore-cli.exe").exists());
        assert!(dest.join("lib/libutcore.1.3.0.dylib").exists());
        assert!(!dest.join("lib/libutcore.a").exists());
    }

    #[test]
    fn test_missing_roots_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("vision");
        fs::create_dir_all(&empty).unwrap();

        let imported = import_runtime_libs(
            &[tmp.path().join("does-not-exist"), empty],
            &tmp.path().join("build"),
        )
        .unwrap();
        assert!(imported.is_empty());
    }
}
