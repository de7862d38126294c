use std::io::ErrorKind;

use crate::domain::model::Contact;
use crate::domain::ports::ContactRepository;
use crate::utils::error::{ContactError, Result};

/// In-memory ordered contact collection, synchronised with a repository.
///
/// Mutations only touch memory; callers persist with [`ContactStore::save`]
/// after each one.
pub struct ContactStore<R: ContactRepository> {
    repository: R,
    contacts: Vec<Contact>,
}

impl<R: ContactRepository> ContactStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            contacts: Vec::new(),
        }
    }

    /// Replace the collection with the persisted one.
    ///
    /// Failures are logged and leave the current collection untouched.
    pub fn load(&mut self) {
        match self.try_load() {
            Ok(count) => tracing::info!("📇 Loaded {} contacts", count),
            Err(ContactError::IoError(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No contact file yet, starting with an empty list");
            }
            Err(e) => {
                tracing::warn!("⚠️ Could not load contacts: {}", e);
                tracing::warn!("💡 Suggestion: {}", e.recovery_suggestion());
            }
        }
    }

    pub fn try_load(&mut self) -> Result<usize> {
        let contacts = self.repository.read()?;
        self.contacts = contacts;
        Ok(self.contacts.len())
    }

    pub fn save(&self) -> Result<()> {
        self.repository.write(&self.contacts).map_err(|e| {
            tracing::error!("❌ Failed to save {} contacts: {}", self.contacts.len(), e);
            e
        })?;
        tracing::debug!("Saved {} contacts", self.contacts.len());
        Ok(())
    }

    pub fn add(&mut self, contact: Contact) {
        tracing::debug!("Adding contact '{}'", contact.name);
        self.contacts.push(contact);
    }

    /// All contacts in insertion order, or `None` when there are none.
    pub fn list(&self) -> Option<&[Contact]> {
        if self.contacts.is_empty() {
            None
        } else {
            Some(&self.contacts)
        }
    }

    /// Contacts whose name contains `fragment` (case-insensitive), paired
    /// with their 0-based position. `None` when nothing matches.
    pub fn search(&self, fragment: &str) -> Option<Vec<(usize, &Contact)>> {
        let hits: Vec<(usize, &Contact)> = self
            .contacts
            .iter()
            .enumerate()
            .filter(|(_, contact)| contact.name_matches(fragment))
            .collect();

        if hits.is_empty() {
            None
        } else {
            Some(hits)
        }
    }

    /// Remove the contact at 0-based `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<Contact> {
        if index >= self.contacts.len() {
            return Err(ContactError::IndexOutOfRange {
                index,
                len: self.contacts.len(),
            });
        }
        let removed = self.contacts.remove(index);
        tracing::debug!("Removed contact '{}' at {}", removed.name, index);
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
