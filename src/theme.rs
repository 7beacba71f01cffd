//! Persisted dark/light theme flag.
//!
//! The stored value always wins; only when nothing has ever been stored does
//! the terminal-background heuristic (the `COLORFGBG` convention) get
//! consulted, and failing that the theme defaults to dark. The file holds a
//! single word, so plain synchronous I/O is fine here.

use crate::error::BriefError;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The two presentation themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    fn parse(s: &str) -> Option<Theme> {
        match s.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File-backed store for the theme flag.
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Self {
        Self::new(
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("pdfbrief")
                .join("theme"),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored value first, then the terminal heuristic, then dark.
    pub fn load(&self) -> Theme {
        if let Ok(content) = std::fs::read_to_string(&self.path) {
            if let Some(theme) = Theme::parse(&content) {
                return theme;
            }
            debug!("Ignoring unrecognised stored theme {content:?}");
        }
        system_preference().unwrap_or_default()
    }

    /// Persist the given theme.
    pub fn save(&self, theme: Theme) -> Result<(), BriefError> {
        let io_err = |source| BriefError::StateWriteFailed {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, theme.as_str()).map_err(io_err)
    }

    /// Flip the current theme, persist, and return the new value.
    pub fn toggle(&self) -> Result<Theme, BriefError> {
        let next = self.load().toggled();
        self.save(next)?;
        Ok(next)
    }
}

/// Terminal background heuristic from the `COLORFGBG` convention
/// ("foreground;background", background 0-6 and 8 are dark colours).
fn system_preference() -> Option<Theme> {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(parse_colorfgbg)
}

fn parse_colorfgbg(value: &str) -> Option<Theme> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(if background <= 6 || background == 8 {
        Theme::Dark
    } else {
        Theme::Light
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorfgbg_parsing() {
        assert_eq!(parse_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(parse_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(parse_colorfgbg("12;8"), Some(Theme::Dark));
        assert_eq!(parse_colorfgbg("default;default"), None);
        assert_eq!(parse_colorfgbg(""), None);
    }

    #[test]
    fn stored_value_wins_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("theme"));

        store.save(Theme::Light).unwrap();
        assert_eq!(store.load(), Theme::Light);

        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load(), Theme::Dark);
    }

    #[test]
    fn toggle_persists_the_new_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("theme"));
        store.save(Theme::Dark).unwrap();

        assert_eq!(store.toggle().unwrap(), Theme::Light);
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn unrecognised_stored_value_falls_through() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(dir.path().join("theme"));
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(store.path(), "mauve").unwrap();

        // Falls back to heuristic/default rather than erroring.
        let theme = store.load();
        assert!(matches!(theme, Theme::Dark | Theme::Light));
    }
}
