use crate::domain::model::Contact;
use crate::utils::error::Result;

/// Persisted storage for the whole contact collection.
///
/// Implementations read and write the full sequence at once; there is no
/// partial update.
pub trait ContactRepository {
    fn read(&self) -> Result<Vec<Contact>>;
    fn write(&self, contacts: &[Contact]) -> Result<()>;
}
