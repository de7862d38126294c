pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod ui;
pub mod utils;

pub use adapters::XmlFileRepository;
pub use config::{AppConfig, CliConfig, UiMode};
pub use crate::core::{store::ContactStore, Contact, ContactRepository};
pub use ui::{ConsoleFrontend, Frontend};
#[cfg(feature = "tui")]
pub use ui::TuiFrontend;
pub use utils::error::{ContactError, Result};
