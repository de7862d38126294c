// Adapters layer: concrete implementations of the domain ports.

pub mod xml_file;

pub use xml_file::XmlFileRepository;
