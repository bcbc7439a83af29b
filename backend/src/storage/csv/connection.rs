use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// CsvConnection manages the data directory holding the membership CSV files
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory.
    ///
    /// `MEMBERSHIP_DATA_DIR` overrides the location; otherwise the data
    /// lives under the user's Documents folder.
    pub fn new_default() -> Result<Self> {
        if let Ok(dir) = std::env::var("MEMBERSHIP_DATA_DIR") {
            info!("Using data directory from MEMBERSHIP_DATA_DIR: {}", dir);
            return Self::new(dir);
        }

        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Membership Tracker");
        info!("Using default data directory: {}", data_dir.display());

        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn members_file_path(&self) -> PathBuf {
        self.base_directory.join("members.csv")
    }

    pub fn spouses_file_path(&self) -> PathBuf {
        self.base_directory.join("spouses.csv")
    }

    pub fn children_file_path(&self) -> PathBuf {
        self.base_directory.join("children.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("data").join("membership");

        let connection = CsvConnection::new(&nested).unwrap();

        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
        assert_eq!(
            connection.members_file_path(),
            nested.join("members.csv")
        );
    }
}
