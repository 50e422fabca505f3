//! Default location of the persistence artifact.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{Result, RolodexError};

pub const BOOK_FILE: &str = "address_book.json";

/// The default artifact path: the platform data directory for the app
/// (e.g. `~/.local/share/rolodex/address_book.json` on Linux).
pub fn default_book_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "rolodex")
        .ok_or_else(|| RolodexError::Store("Could not determine a home directory".to_string()))?;
    Ok(dirs.data_dir().join(BOOK_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_ends_with_book_file() {
        let path = default_book_path().unwrap();
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some(BOOK_FILE)
        );
    }
}
