use crate::error::{ErrorMessage::UnexpectedError, InventoryError};
use std::{
    env,
    path::{Path, PathBuf},
};

pub const INVENTORY_FILE_NAME: &str = "inventory_data.xlsx";

/// Where the inventory spreadsheet lives. Built once in `main` and handed to
/// the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub inventory_path: PathBuf,
}

impl Config {
    pub fn new(inventory_path: impl Into<PathBuf>) -> Self {
        Config {
            inventory_path: inventory_path.into(),
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Config::new(dir.join(INVENTORY_FILE_NAME))
    }

    /// The spreadsheet sits next to the executable.
    pub fn from_program_location() -> Result<Self, InventoryError> {
        let exe = env::current_exe().map_err(|e| {
            InventoryError::new(
                UnexpectedError,
                format!("could not locate the program: {}", e),
            )
        })?;
        match exe.parent() {
            Some(dir) => Ok(Config::in_dir(dir)),
            None => Err(InventoryError::new(
                UnexpectedError,
                format!("program path '{}' has no parent directory", exe.display()),
            )),
        }
    }
}
