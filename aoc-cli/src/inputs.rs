//! Puzzle inputs read from local files

use crate::error::InputError;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a whole input file
pub fn read_input(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Directory of puzzle inputs laid out as `{base_dir}/{year}/day{day:02}.txt`
pub struct InputStore {
    base_dir: PathBuf,
}

impl InputStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the input path for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.base_dir
            .join(year.to_string())
            .join(format!("day{:02}.txt", day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Input contents, or `None` when the file does not exist
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, InputError> {
        let path = self.input_path(year, day);
        if path.is_file() {
            read_input(&path).map(Some)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"));
        assert_eq!(
            store.input_path(2020, 4),
            PathBuf::from("inputs").join("2020").join("day04.txt")
        );
        assert!(
            store
                .input_path(2020, 25)
                .to_string_lossy()
                .ends_with("day25.txt")
        );
    }

    #[test]
    fn test_get_existing_and_missing() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2020, 5));
        assert!(store.get(2020, 5).unwrap().is_none());

        let path = store.input_path(2020, 5);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "FBFBBFFRLR\n").unwrap();

        assert!(store.contains(2020, 5));
        assert_eq!(store.get(2020, 5).unwrap().as_deref(), Some("FBFBBFFRLR\n"));
    }

    #[test]
    fn test_read_input_reports_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.txt");
        let err = read_input(&missing).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }
}
