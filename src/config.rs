//! Desktop-wide settings: screen geometry and the identity the shell shows.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::{
    DEFAULT_HOSTNAME, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DEFAULT_USER, DOCK_HEIGHT,
    HOME_DIR, INITIAL_CWD,
};
use crate::repository::{InMemoryRepository, RepositoryError};
use crate::window::Screen;

pub const MIN_SCREEN_WIDTH: f64 = 320.0;
pub const MIN_SCREEN_HEIGHT: f64 = 240.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("screen must be at least {MIN_SCREEN_WIDTH}x{MIN_SCREEN_HEIGHT}, got {width}x{height}")]
    ScreenTooSmall { width: f64, height: f64 },
    #[error("dock height {dock_height} must be below the screen height {height}")]
    DockTooTall { dock_height: f64, height: f64 },
    #[error("initial directory {0} is not absolute")]
    RelativeDirectory(String),
    #[error("failed to load seed file {path}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: RepositoryError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesktopConfig {
    pub screen: Screen,
    pub user: String,
    pub hostname: String,
    pub home_dir: String,
    pub initial_dir: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            screen: Screen::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT, DOCK_HEIGHT),
            user: DEFAULT_USER.to_string(),
            hostname: DEFAULT_HOSTNAME.to_string(),
            home_dir: HOME_DIR.to_string(),
            initial_dir: INITIAL_CWD.to_string(),
        }
    }
}

impl DesktopConfig {
    /// Check the geometry and directories, returning the config unchanged
    /// when they are usable.
    pub fn validated(self) -> Result<Self, ConfigError> {
        validate_screen(&self.screen)?;
        for dir in [&self.home_dir, &self.initial_dir] {
            if !dir.starts_with('/') {
                return Err(ConfigError::RelativeDirectory(dir.clone()));
            }
        }
        Ok(self)
    }
}

pub fn validate_screen(screen: &Screen) -> Result<(), ConfigError> {
    let Screen {
        width,
        height,
        dock_height,
    } = *screen;
    // NaN fails both comparisons, so test for the accepted range.
    if !(width >= MIN_SCREEN_WIDTH && height >= MIN_SCREEN_HEIGHT)
        || !width.is_finite()
        || !height.is_finite()
    {
        return Err(ConfigError::ScreenTooSmall { width, height });
    }
    if !(dock_height >= 0.0 && dock_height < height) {
        return Err(ConfigError::DockTooTall {
            dock_height,
            height,
        });
    }
    Ok(())
}

/// The repository behind the desktop: seeded from `seed` when given,
/// empty otherwise.
pub fn load_repository(seed: Option<&Path>) -> Result<InMemoryRepository, ConfigError> {
    let Some(path) = seed else {
        return Ok(InMemoryRepository::new());
    };
    InMemoryRepository::from_seed_file(path).map_err(|source| ConfigError::Seed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::repository::{ContentRepository, SIMULATED_FILES};

    #[test]
    fn default_config_is_valid() {
        let config = DesktopConfig::default().validated().unwrap();
        assert_eq!(config.screen.usable_height(), 1016.0);
        assert_eq!(config.initial_dir, "/home/developer/portfolio");
    }

    #[test]
    fn rejects_tiny_or_non_finite_screens() {
        for (width, height) in [(319.0, 600.0), (800.0, 200.0), (f64::NAN, 600.0)] {
            let err = validate_screen(&Screen::new(width, height, 64.0)).unwrap_err();
            assert!(matches!(err, ConfigError::ScreenTooSmall { .. }));
        }
        assert!(validate_screen(&Screen::new(320.0, 240.0, 64.0)).is_ok());
    }

    #[test]
    fn rejects_dock_covering_the_screen() {
        let err = validate_screen(&Screen::new(800.0, 600.0, 600.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "dock height 600 must be below the screen height 600"
        );
        assert!(validate_screen(&Screen::new(800.0, 600.0, -1.0)).is_err());
    }

    #[test]
    fn rejects_relative_directories() {
        let config = DesktopConfig {
            initial_dir: "portfolio".into(),
            ..DesktopConfig::default()
        };
        assert!(matches!(
            config.validated(),
            Err(ConfigError::RelativeDirectory(dir)) if dir == "portfolio"
        ));
    }

    #[tokio::test]
    async fn seed_file_populates_the_repository() {
        let mut seed = tempfile::NamedTempFile::new().unwrap();
        write!(
            seed,
            r#"{{"simulatedFiles": [{{"name": "a.txt", "path": "/", "type": "file"}}]}}"#
        )
        .unwrap();
        let repo = load_repository(Some(seed.path())).unwrap();
        assert_eq!(repo.list(SIMULATED_FILES).await.unwrap().len(), 1);
    }

    #[test]
    fn unreadable_seed_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = load_repository(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
        assert!(load_repository(None).is_ok());
    }
}
