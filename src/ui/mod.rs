// Presentation layer: front ends that drive a ContactStore.

pub mod console;
#[cfg(feature = "tui")]
pub mod tui;

use crate::core::{ContactRepository, ContactStore};
use crate::utils::error::Result;

pub use console::ConsoleFrontend;
#[cfg(feature = "tui")]
pub use tui::TuiFrontend;

/// A front end runs until the user quits, persisting after every mutation.
pub trait Frontend {
    fn run<R: ContactRepository>(&mut self, store: &mut ContactStore<R>) -> Result<()>;
}
