use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};
use ErrorMessage::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMessage {
    FileNotAccessible,
    ParseError,
    ValidationError,
    UnexpectedError,
}

impl ErrorMessage {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            FileNotAccessible => "Inventory file not accessible",
            ParseError => "Could not read the spreadsheet",
            ValidationError => "Invalid inventory row",
            UnexpectedError => "Could not process the spreadsheet",
        }
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
pub struct InventoryError {
    kind: ErrorMessage,
    message: String,
}

impl InventoryError {
    pub fn new(kind: ErrorMessage, message: impl Into<String>) -> Self {
        InventoryError {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorMessage {
        self.kind
    }
}

impl Display for InventoryError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Error: {}: {}", self.kind, self.message)
    }
}

impl Error for InventoryError {}
