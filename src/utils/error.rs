use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    XmlDecodeError(#[from] quick_xml::de::DeError),

    #[error("Terminal error: {0}")]
    TerminalError(std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Contact index {index} is out of range (collection has {len} contacts)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ContactError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ContactError::IoError(e) => format!("Could not access the contact file: {}", e),
            ContactError::XmlDecodeError(_) => "The contact file is not valid XML.".to_string(),
            ContactError::TerminalError(e) => format!("Could not run the terminal UI: {}", e),
            ContactError::TomlError(_) => "The settings file is not valid TOML.".to_string(),
            ContactError::ConfigError { message } => format!("Invalid configuration: {}", message),
            ContactError::InvalidValueError { field, reason, .. } => {
                format!("{}: {}", field, reason)
            }
            ContactError::IndexOutOfRange { index, len } => {
                if *len == 0 {
                    "There are no contacts.".to_string()
                } else {
                    format!("No contact number {}; choose between 1 and {}.", index + 1, len)
                }
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ContactError::IoError(_) => "Check that the path exists and is writable",
            ContactError::XmlDecodeError(_) => {
                "Fix or remove the contact file; a new one is written on the next change"
            }
            ContactError::TerminalError(_) => {
                "Run from an interactive terminal, or use --ui console"
            }
            ContactError::TomlError(_) | ContactError::ConfigError { .. } => {
                "Review the settings file and command line flags"
            }
            ContactError::InvalidValueError { .. } => "Fill in every field and try again",
            ContactError::IndexOutOfRange { .. } => "List the contacts and pick a number shown",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContactError>;
