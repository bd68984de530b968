use crate::{
    error::{ErrorMessage::ValidationError, InventoryError},
    sheet::SheetRow,
};
use serde::Serialize;

pub const DEFAULT_DESCRIPTION: &str = "No description provided";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub row: usize,
    pub host: String,
    pub group: String,
    pub address: String,
    pub user: String,
    pub description: Option<String>,
    pub interpreter: Option<String>,
}

/// Variables the orchestration tool reads for a single host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostVars {
    pub ansible_host: String,
    pub ansible_user: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ansible_python_interpreter: Option<String>,
}

impl HostRecord {
    /// Columns are positional: host, group, address, user, description,
    /// interpreter.
    pub fn from_row(row: &SheetRow) -> Result<Self, InventoryError> {
        let required = |column: usize| -> Result<String, InventoryError> {
            match row.cell(column) {
                Some(value) => Ok(value.to_string()),
                None => Err(InventoryError::new(
                    ValidationError,
                    format!(
                        "row {} with values {} has missing data. Check the spreadsheet.",
                        row.number, row
                    ),
                )),
            }
        };

        Ok(HostRecord {
            row: row.number,
            host: required(0)?,
            group: required(1)?,
            address: required(2)?,
            user: required(3)?,
            description: row.cell(4).map(str::to_string),
            interpreter: row.cell(5).map(str::to_string),
        })
    }

    pub fn host_vars(&self) -> HostVars {
        HostVars {
            ansible_host: self.address.clone(),
            ansible_user: self.user.clone(),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            ansible_python_interpreter: self.interpreter.clone(),
        }
    }
}
