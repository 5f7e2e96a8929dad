use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::load::DataFiles;

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "costar.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostarConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_actors")]
    pub actors: PathBuf,
    #[serde(default = "default_movies")]
    pub movies: PathBuf,
    #[serde(default = "default_movie_actors")]
    pub movie_actors: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            actors: default_actors(),
            movies: default_movies(),
            movie_actors: default_movie_actors(),
        }
    }
}

impl DataConfig {
    #[must_use]
    pub fn files(&self) -> DataFiles {
        DataFiles {
            actors: self.actors.clone(),
            movies: self.movies.clone(),
            movie_actors: self.movie_actors.clone(),
        }
    }

    /// Resolve relative data paths against `base`.
    fn rebase(&mut self, base: &Path) {
        for path in [&mut self.actors, &mut self.movies, &mut self.movie_actors] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_center")]
    pub center: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
        }
    }
}

/// Read and parse a configuration file. Relative data paths are resolved
/// against the file's directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`CostarConfig`].
pub fn load_config(path: &Path) -> Result<CostarConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut config = toml::from_str::<CostarConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if let Some(base) = path.parent() {
        config.data.rebase(base);
    }
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Locate and load the effective configuration.
///
/// Precedence:
/// 1. `explicit` path (must exist)
/// 2. `./costar.toml`
/// 3. `<user config dir>/costar/config.toml`
/// 4. Built-in defaults
///
/// # Errors
///
/// Returns an error if the chosen file cannot be read or parsed.
pub fn discover_config(explicit: Option<&Path>) -> Result<CostarConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return load_config(&local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join("costar/config.toml");
        if user.exists() {
            return load_config(&user);
        }
    }

    Ok(CostarConfig::default())
}

fn default_actors() -> PathBuf {
    PathBuf::from("actors.txt")
}

fn default_movies() -> PathBuf {
    PathBuf::from("movies.txt")
}

fn default_movie_actors() -> PathBuf {
    PathBuf::from("movie-actors.txt")
}

fn default_center() -> String {
    "Kevin Bacon".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: CostarConfig = toml::from_str("").unwrap();
        assert_eq!(config, CostarConfig::default());
        assert_eq!(config.session.center, "Kevin Bacon");
        assert_eq!(config.data.movie_actors, PathBuf::from("movie-actors.txt"));
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: CostarConfig = toml::from_str(
            r#"
            [data]
            actors = "cast/people.txt"

            [session]
            center = "Meg Ryan"
            "#,
        )
        .unwrap();
        assert_eq!(config.data.actors, PathBuf::from("cast/people.txt"));
        assert_eq!(config.data.movies, PathBuf::from("movies.txt"));
        assert_eq!(config.session.center, "Meg Ryan");
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[data]\nactors = \"a.txt\"\nmovies = \"/abs/m.txt\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.data.actors, dir.path().join("a.txt"));
        assert_eq!(config.data.movies, PathBuf::from("/abs/m.txt"));
        assert_eq!(config.data.movie_actors, dir.path().join("movie-actors.txt"));
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[data\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = discover_config(Some(Path::new("/nonexistent/costar.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
