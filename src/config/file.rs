//
//  goinstant-api
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O
//!
//! Small file helpers used by [`ConfigFile`](super::ConfigFile).
//!
//! ## Notes
//!
//! - Writes create missing parent directories
//! - On Unix the file is written with mode `0600`, since it may hold a
//!   client secret or an access token

use std::path::Path;

use anyhow::{Context, Result};

/// Reads the whole configuration file into a string.
///
/// # Errors
///
/// Fails if the file is missing, unreadable, or not UTF-8.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

/// Creates or overwrites the configuration file.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use goinstant_api::config::write_config_file;
///
/// write_config_file(Path::new("/tmp/gi/config.toml"), "[client]\nversion = \"v1\"\n")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("config.toml");

        assert!(!config_exists(&path));
        write_config_file(&path, "x = 1\n").unwrap();
        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap(), "x = 1\n");
    }

    #[test]
    fn test_directory_is_not_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!config_exists(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_file(&path, "").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
