use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LibrisConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("libris.toml")
}

/// The original catalog's filename, kept as the default
pub fn default_database_path() -> PathBuf {
    PathBuf::from("books.sqlite")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<LibrisConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: LibrisConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Resolution order: explicit flag, then libris.toml, then books.sqlite
pub fn resolve_database(flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }

    if let Some(config) = load_config(None)? {
        if let Some(database) = config.database {
            return Ok(PathBuf::from(database));
        }
    }

    Ok(default_database_path())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_default() {
        let resolved = resolve_database(Some(PathBuf::from("/tmp/other.sqlite"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/other.sqlite"));
    }

    #[test]
    fn test_ensure_db_dir_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("books.sqlite");

        ensure_db_dir(&db_path).unwrap();
        assert!(db_path.parent().unwrap().exists());
    }
}
