use serde::Deserialize;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};

/// A single entry in the contact book. Identity is positional, so there is no id.
///
/// Element names match the `contact.xml` layout already in use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Contact {
    #[serde(rename = "Nom", default)]
    pub name: String,
    #[serde(rename = "Telephone", default)]
    pub phone: String,
    #[serde(rename = "Email", default)]
    pub email: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Case-insensitive substring match on the name.
    pub fn name_matches(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(&fragment.to_lowercase())
    }
}

/// Required-field check used by the form front end.
impl Validate for Contact {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("phone", &self.phone)?;
        validate_non_empty_string("email", &self.email)?;
        Ok(())
    }
}
