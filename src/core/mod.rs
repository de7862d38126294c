pub mod store;

pub use crate::domain::model::Contact;
pub use crate::domain::ports::ContactRepository;
pub use crate::utils::error::Result;
pub use store::ContactStore;
