use contact_book::{Contact, ContactError, ContactRepository, ContactStore, XmlFileRepository};
use std::fs;
use tempfile::TempDir;

fn alice() -> Contact {
    Contact::new("Alice", "111", "a@x.com")
}

fn bob() -> Contact {
    Contact::new("Bob", "222", "b@x.com")
}

#[test]
fn test_end_to_end_with_xml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contact.xml");

    let mut store = ContactStore::new(XmlFileRepository::new(&path));
    store.load();
    assert!(store.list().is_none());

    store.add(alice());
    store.add(bob());
    assert_eq!(store.list().unwrap(), &[alice(), bob()]);

    let hits = store.search("bo").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].1, &bob());

    store.remove_at(0).unwrap();
    assert_eq!(store.list().unwrap(), &[bob()]);
    store.save().unwrap();

    let mut fresh = ContactStore::new(XmlFileRepository::new(&path));
    fresh.load();
    assert_eq!(fresh.list().unwrap(), &[bob()]);

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("<Nom>Bob</Nom>"));
    assert!(!on_disk.contains("Alice"));
}

#[test]
fn test_round_trip_keeps_order_and_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contact.xml");
    let contacts = vec![
        bob(),
        alice(),
        bob(),
        Contact::new("Émilie", "+33 1 23 45 67 89", "emilie@example.fr"),
        Contact::new("", "", ""),
    ];

    let mut store = ContactStore::new(XmlFileRepository::new(&path));
    for contact in &contacts {
        store.add(contact.clone());
    }
    store.save().unwrap();

    let mut fresh = ContactStore::new(XmlFileRepository::new(&path));
    assert_eq!(fresh.try_load().unwrap(), contacts.len());
    assert_eq!(fresh.contacts(), contacts.as_slice());
}

#[test]
fn test_malformed_file_leaves_store_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contact.xml");
    fs::write(&path, "<Contacts><Contact><Nom>broken").unwrap();

    let mut store = ContactStore::new(XmlFileRepository::new(&path));
    store.add(alice());

    assert!(store.try_load().is_err());
    store.load();
    assert_eq!(store.contacts(), &[alice()]);
}

#[test]
fn test_save_failure_keeps_in_memory_state() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the file should be makes the final rename fail.
    let path = temp_dir.path().join("taken");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), "x").unwrap();

    let mut store = ContactStore::new(XmlFileRepository::new(&path));
    store.add(alice());

    assert!(matches!(store.save(), Err(ContactError::IoError(_))));
    assert_eq!(store.len(), 1);
    assert!(path.is_dir());
}

#[test]
fn test_reads_file_written_by_previous_versions() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("contact.xml");
    fs::write(
        &path,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Contacts>
  <Contact>
    <Nom>Alice</Nom>
    <Telephone>111</Telephone>
    <Email>a@x.com</Email>
  </Contact>
</Contacts>"#,
    )
    .unwrap();

    let repository = XmlFileRepository::new(&path);
    assert_eq!(repository.read().unwrap(), vec![alice()]);
}
