use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Deserialize;

use crate::domain::model::Contact;
use crate::domain::ports::ContactRepository;
use crate::utils::error::Result;

pub const DEFAULT_DATA_FILE: &str = "contact.xml";

const ROOT_TAG: &str = "Contacts";
const CONTACT_TAG: &str = "Contact";
const FIELD_TAGS: [&str; 3] = ["Nom", "Telephone", "Email"];

/// Root wrapper: `<Contacts>` holding one `<Contact>` per entry.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "Contacts")]
struct ContactDocument {
    #[serde(rename = "Contact", default)]
    list: Vec<Contact>,
}

fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Characters XML 1.0 cannot carry, not even as references.
fn is_forbidden_in_xml(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

fn char_reference(c: char) -> String {
    format!("&#{};", c as u32)
}

/// Escape a field value so it reads back unchanged.
///
/// Readers trim whitespace at the edges of text and normalise `\r`, so those
/// are written as character references. Forbidden characters become U+FFFD.
fn encode_text(value: &str) -> String {
    let value: Cow<str> = if value.chars().any(is_forbidden_in_xml) {
        Cow::Owned(
            value
                .chars()
                .map(|c| if is_forbidden_in_xml(c) { '\u{FFFD}' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(value)
    };

    let core = value.trim_matches(is_xml_whitespace);
    let lead_len = value.len() - value.trim_start_matches(is_xml_whitespace).len();
    let lead = &value[..lead_len];
    let trail = &value[lead_len + core.len()..];

    let mut encoded = String::with_capacity(value.len());
    encoded.extend(lead.chars().map(char_reference));
    encoded.push_str(&escape(core).replace('\r', &char_reference('\r')));
    encoded.extend(trail.chars().map(char_reference));
    encoded
}

/// Stores the whole collection in a single XML file.
#[derive(Debug, Clone)]
pub struct XmlFileRepository {
    path: PathBuf,
}

impl XmlFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the document exactly as it is written to disk.
    pub fn to_xml(contacts: &[Contact]) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;
        for contact in contacts {
            writer.write_event(Event::Start(BytesStart::new(CONTACT_TAG)))?;
            let values = [&contact.name, &contact.phone, &contact.email];
            for (tag, value) in FIELD_TAGS.iter().zip(values) {
                writer.write_event(Event::Start(BytesStart::new(*tag)))?;
                writer.write_event(Event::Text(BytesText::from_escaped(encode_text(value))))?;
                writer.write_event(Event::End(BytesEnd::new(*tag)))?;
            }
            writer.write_event(Event::End(BytesEnd::new(CONTACT_TAG)))?;
        }
        writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;

        let mut xml = String::from_utf8_lossy(&writer.into_inner()).into_owned();
        xml.push('\n');
        Ok(xml)
    }

    pub fn from_xml(content: &str) -> Result<Vec<Contact>> {
        let document: ContactDocument = quick_xml::de::from_str(content)?;
        Ok(document.list)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ContactRepository for XmlFileRepository {
    fn read(&self) -> Result<Vec<Contact>> {
        let content = fs::read_to_string(&self.path)?;
        Self::from_xml(&content)
    }

    fn write(&self, contacts: &[Contact]) -> Result<()> {
        let xml = Self::to_xml(contacts)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write beside the target, then swap it in.
        let tmp_path = self.temp_path();
        fs::write(&tmp_path, xml)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ContactError;
    use tempfile::TempDir;

    const EXISTING_FILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Contacts>
  <Contact>
    <Nom>Alice</Nom>
    <Telephone>111</Telephone>
    <Email>a@x.com</Email>
  </Contact>
  <Contact>
    <Nom>Bob</Nom>
    <Telephone>222</Telephone>
    <Email>b@x.com</Email>
  </Contact>
</Contacts>
"#;

    #[test]
    fn test_reads_existing_layout() {
        let contacts = XmlFileRepository::from_xml(EXISTING_FILE).unwrap();
        assert_eq!(
            contacts,
            vec![
                Contact::new("Alice", "111", "a@x.com"),
                Contact::new("Bob", "222", "b@x.com"),
            ]
        );
    }

    #[test]
    fn test_writes_header_and_indented_elements() {
        let xml = XmlFileRepository::to_xml(&[Contact::new("Alice", "111", "a@x.com")]).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Contacts>"));
        assert!(xml.contains("\n  <Contact>\n    <Nom>Alice</Nom>\n"));
        assert!(xml.contains("    <Telephone>111</Telephone>\n    <Email>a@x.com</Email>\n"));
        assert!(xml.trim_end().ends_with("</Contacts>"));

        let name_at = xml.find("<Nom>").unwrap();
        let phone_at = xml.find("<Telephone>").unwrap();
        let email_at = xml.find("<Email>").unwrap();
        assert!(name_at < phone_at && phone_at < email_at);
    }

    #[test]
    fn test_special_characters_survive_round_trip() {
        let contacts = vec![Contact::new("Tom & Jerry", "<none>", "\"q\"@x.com")];
        let xml = XmlFileRepository::to_xml(&contacts).unwrap();
        assert!(xml.contains("Tom &amp; Jerry"));
        assert_eq!(XmlFileRepository::from_xml(&xml).unwrap(), contacts);
    }

    #[test]
    fn test_whitespace_padded_fields_round_trip() {
        let contacts = vec![
            Contact::new(" Bob ", "  ", "a\nb "),
            Contact::new("\tTabbed", "line\r\nbreak", "\n"),
            Contact::new("", "", ""),
        ];

        let xml = XmlFileRepository::to_xml(&contacts).unwrap();
        assert!(xml.contains("<Nom>&#32;Bob&#32;</Nom>"));
        assert!(xml.contains("<Telephone>&#32;&#32;</Telephone>"));
        assert!(xml.contains("<Nom></Nom>"));

        assert_eq!(XmlFileRepository::from_xml(&xml).unwrap(), contacts);
    }

    #[test]
    fn test_forbidden_control_characters_are_replaced() {
        let xml =
            XmlFileRepository::to_xml(&[Contact::new("A\u{1}B", "1\u{0}2", "ok@x.com")]).unwrap();
        assert!(!xml.contains('\u{1}'));
        assert!(!xml.contains('\u{0}'));

        let contacts = XmlFileRepository::from_xml(&xml).unwrap();
        assert_eq!(
            contacts,
            vec![Contact::new("A\u{FFFD}B", "1\u{FFFD}2", "ok@x.com")]
        );
    }

    #[test]
    fn test_empty_collection_round_trip() {
        let xml = XmlFileRepository::to_xml(&[]).unwrap();
        assert!(xml.contains("<Contacts>"));
        assert!(XmlFileRepository::from_xml(&xml).unwrap().is_empty());
    }

    #[test]
    fn test_empty_root_reads_as_empty_list() {
        let contacts =
            XmlFileRepository::from_xml("<?xml version=\"1.0\"?>\n<Contacts></Contacts>").unwrap();
        assert!(contacts.is_empty());
    }

    #[test]
    fn test_missing_field_reads_as_empty() {
        let xml = "<Contacts><Contact><Nom>Solo</Nom></Contact></Contacts>";
        let contacts = XmlFileRepository::from_xml(xml).unwrap();
        assert_eq!(contacts, vec![Contact::new("Solo", "", "")]);
    }

    #[test]
    fn test_malformed_content_is_decode_error() {
        let result = XmlFileRepository::from_xml("<Contacts><Contact><Nom>Alice</Contact>");
        assert!(matches!(result, Err(ContactError::XmlDecodeError(_))));
    }

    #[test]
    fn test_write_replaces_file_and_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("contact.xml");
        let repository = XmlFileRepository::new(&path);
        assert_eq!(repository.path(), path.as_path());

        repository
            .write(&[Contact::new("Alice", "111", "a@x.com")])
            .unwrap();
        repository
            .write(&[Contact::new("Bob", "222", "b@x.com")])
            .unwrap();

        assert_eq!(
            repository.read().unwrap(),
            vec![Contact::new("Bob", "222", "b@x.com")]
        );
        assert!(!path.with_file_name("contact.xml.tmp").exists());
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let repository = XmlFileRepository::new(temp_dir.path().join("absent.xml"));

        match repository.read() {
            Err(ContactError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
