use std::{
    env,
    path::{Path, PathBuf},
};

const CONFIG_FILE: &str = ".hunkview.toml";

/// Load config file content from CWD first, then home, then config directory
///
/// Searches for:
/// 1. `.hunkview.toml` in the current working directory
/// 2. `~/.hunkview.toml`
/// 3. `<config dir>/hunkview/config.toml`
///
/// Returns the path and content of the first file found.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE)];
    candidates.extend(get_home_config_path());
    candidates.extend(crate::paths::config_file_path().ok());

    load_first(&candidates)
}

/// Read the first readable file of `candidates`
pub fn load_first(candidates: &[PathBuf]) -> Option<(PathBuf, String)> {
    candidates.iter().find_map(|path| read_config(path))
}

fn read_config(path: &Path) -> Option<(PathBuf, String)> {
    let content = std::fs::read_to_string(path).ok()?;
    log::debug!("Loaded config from {}", path.display());
    Some((path.to_path_buf(), content))
}

/// Get the path to the config file in the home directory
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_existing_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "expand_step = 5").unwrap();
        std::fs::write(&second, "expand_step = 9").unwrap();

        let (path, content) = load_first(&[missing, first.clone(), second]).unwrap();
        assert_eq!(path, first);
        assert_eq!(content, "expand_step = 5");
    }

    #[test]
    fn test_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_first(&[dir.path().join("nope.toml")]).is_none());
    }
}
