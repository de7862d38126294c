use std::io::{BufRead, Write};

use crate::core::{Contact, ContactRepository, ContactStore};
use crate::ui::Frontend;
use crate::utils::error::Result;

const MENU: &str = "\nMenu:
1. Add a contact
2. List contacts
3. Search contacts
4. Delete a contact
5. Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    List,
    Search,
    Delete,
    Quit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u32>().ok()? {
            1 => Some(Self::Add),
            2 => Some(Self::List),
            3 => Some(Self::Search),
            4 => Some(Self::Delete),
            5 => Some(Self::Quit),
            _ => None,
        }
    }
}

fn format_contact(contact: &Contact) -> String {
    format!(
        "Name: {} | Phone: {} | Email: {}",
        contact.name, contact.phone, contact.email
    )
}

/// Sequential prompt front end over any line reader and writer.
pub struct ConsoleFrontend<In, Out> {
    input: In,
    output: Out,
}

impl<In: BufRead, Out: Write> ConsoleFrontend<In, Out> {
    pub fn new(input: In, output: Out) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> Out {
        self.output
    }

    /// Print `label`, read one line and trim it. `None` on end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn add_contact<R: ContactRepository>(&mut self, store: &mut ContactStore<R>) -> Result<()> {
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(());
        };
        let Some(phone) = self.prompt("Phone: ")? else {
            return Ok(());
        };
        let Some(email) = self.prompt("Email: ")? else {
            return Ok(());
        };

        store.add(Contact::new(name, phone, email));
        match store.save() {
            Ok(()) => writeln!(self.output, "Contact added and saved.")?,
            Err(e) => writeln!(self.output, "Error saving contact: {}", e)?,
        }
        Ok(())
    }

    fn list_contacts<R: ContactRepository>(&mut self, store: &ContactStore<R>) -> Result<()> {
        match store.list() {
            None => writeln!(self.output, "No contacts found.")?,
            Some(contacts) => {
                for (i, contact) in contacts.iter().enumerate() {
                    writeln!(self.output, "{}. {}", i + 1, format_contact(contact))?;
                }
            }
        }
        Ok(())
    }

    fn search_contacts<R: ContactRepository>(&mut self, store: &ContactStore<R>) -> Result<()> {
        let Some(fragment) = self.prompt("Name to search: ")? else {
            return Ok(());
        };

        match store.search(&fragment) {
            None => writeln!(self.output, "No contact found with that name.")?,
            Some(hits) => {
                for (_, contact) in hits {
                    writeln!(self.output, "Found: {}", format_contact(contact))?;
                }
            }
        }
        Ok(())
    }

    fn delete_contact<R: ContactRepository>(&mut self, store: &mut ContactStore<R>) -> Result<()> {
        if store.is_empty() {
            writeln!(self.output, "No contacts to delete.")?;
            return Ok(());
        }

        self.list_contacts(store)?;
        let Some(answer) = self.prompt("Number of the contact to delete: ")? else {
            return Ok(());
        };

        // Displayed numbers are 1-based.
        let index = match answer.parse::<usize>() {
            Ok(n) if n >= 1 => n - 1,
            _ => {
                writeln!(self.output, "Invalid contact number.")?;
                return Ok(());
            }
        };

        match store.remove_at(index) {
            Ok(removed) => {
                tracing::info!("Deleted contact '{}'", removed.name);
                match store.save() {
                    Ok(()) => writeln!(self.output, "Contact deleted.")?,
                    Err(e) => writeln!(self.output, "Error saving after delete: {}", e)?,
                }
            }
            Err(e) => writeln!(self.output, "{}", e.user_friendly_message())?,
        }
        Ok(())
    }
}

impl<In: BufRead, Out: Write> Frontend for ConsoleFrontend<In, Out> {
    fn run<R: ContactRepository>(&mut self, store: &mut ContactStore<R>) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                tracing::debug!("Input closed, leaving menu");
                writeln!(self.output)?;
                return Ok(());
            };

            match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add_contact(store)?,
                Some(MenuChoice::List) => self.list_contacts(store)?,
                Some(MenuChoice::Search) => self.search_contacts(store)?,
                Some(MenuChoice::Delete) => self.delete_contact(store)?,
                Some(MenuChoice::Quit) => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                None => writeln!(self.output, "Invalid option. Try again.")?,
            }
        }
    }
}
