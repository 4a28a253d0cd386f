//! `.env` file utilities.
//!
//! The workspace `.env` stores server settings written by `setup` and read
//! back by `serve`.

use std::fs;
use std::path::Path;

use super::error::PathError;

fn env_error(path: &Path, e: &std::io::Error) -> PathError {
    PathError::EnvFileError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn read_lines(env_path: &Path) -> Result<Vec<String>, PathError> {
    if !env_path.exists() {
        return Ok(Vec::new());
    }
    Ok(fs::read_to_string(env_path)
        .map_err(|e| env_error(env_path, &e))?
        .lines()
        .map(str::to_string)
        .collect())
}

/// Read a single `KEY=value` entry from an env file.
pub fn read_env_value(env_path: &Path, key: &str) -> Result<Option<String>, PathError> {
    Ok(read_lines(env_path)?.into_iter().find_map(|line| {
        let (lhs, rhs) = line.split_once('=')?;
        (lhs.trim() == key).then(|| rhs.trim().to_string())
    }))
}

/// Persist a `KEY=value` pair into an env file.
///
/// An existing key is updated in place (duplicates are dropped); a new key
/// is appended. Comments and unrelated lines are preserved.
pub fn persist_env_value(env_path: &Path, key: &str, value: &str) -> Result<(), PathError> {
    let lines = read_lines(env_path)?;

    let mut updated = false;
    let mut output: Vec<String> = Vec::with_capacity(lines.len() + 1);

    for line in lines {
        match line.split_once('=') {
            Some((lhs, _)) if lhs.trim() == key => {
                if !updated {
                    output.push(format!("{key}={value}"));
                    updated = true;
                }
            }
            _ => output.push(line),
        }
    }

    if !updated {
        output.push(format!("{key}={value}"));
    }

    let mut content = output.join("\n");
    content.push('\n');
    fs::write(env_path, content).map_err(|e| env_error(env_path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn appends_new_keys_and_updates_existing() {
        let temp = tempdir().unwrap();
        let env_path = temp.path().join(".env");
        fs::write(&env_path, "# server\nSCRIPTSCAN_PORT=8000\n").unwrap();

        persist_env_value(&env_path, "SCRIPTSCAN_HOST", "0.0.0.0").unwrap();
        persist_env_value(&env_path, "SCRIPTSCAN_PORT", "9000").unwrap();

        let contents = fs::read_to_string(&env_path).unwrap();
        assert_eq!(
            contents,
            "# server\nSCRIPTSCAN_PORT=9000\nSCRIPTSCAN_HOST=0.0.0.0\n"
        );
    }

    #[test]
    fn creates_missing_file() {
        let temp = tempdir().unwrap();
        let env_path = temp.path().join(".env");

        persist_env_value(&env_path, "SCRIPTSCAN_PORT", "8000").unwrap();

        assert_eq!(
            read_env_value(&env_path, "SCRIPTSCAN_PORT").unwrap(),
            Some("8000".to_string())
        );
        assert_eq!(read_env_value(&env_path, "SCRIPTSCAN_HOST").unwrap(), None);
    }

    #[test]
    fn reading_a_missing_file_yields_nothing() {
        let temp = tempdir().unwrap();
        assert_eq!(
            read_env_value(&temp.path().join(".env"), "SCRIPTSCAN_PORT").unwrap(),
            None
        );
    }
}
