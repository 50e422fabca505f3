//! End-to-end persistence tests against a real filesystem.

use rolodexapp::api::RolodexApi;
use rolodexapp::model::{Address, Email, Note, Phone, Tag};
use rolodexapp::snapshot::Snapshot;
use rolodexapp::store::fs::FsBackend;
use rolodexapp::store::SnapshotBackend;
use rolodexapp::RolodexError;

fn backend_in(dir: &tempfile::TempDir) -> FsBackend {
    FsBackend::new(dir.path().join("address_book.json"))
}

#[test]
fn first_run_without_artifact_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let api = RolodexApi::open(backend_in(&dir)).unwrap();
    assert!(api.is_empty());
}

#[test]
fn save_and_reopen_reproduces_the_book() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut api = RolodexApi::open(backend_in(&dir)).unwrap();
        let mut anna = RolodexApi::<FsBackend>::create_record("Anna Kowalska", Some("1990-05-20"))
            .unwrap();
        anna.add_phone(Phone::new("123456789").unwrap());
        anna.add_email(Email::new("anna@example.com").unwrap());
        anna.add_tag(Tag::new("work"));
        anna.add_note(Note::new("met at the conference"));
        anna.set_address(Address {
            street: "Polna 1".into(),
            city: "Warszawa".into(),
            postal_code: "00-001".into(),
            country: "PL".into(),
        });
        api.add_record(anna);
        api.add_record(RolodexApi::<FsBackend>::create_record("Jan Nowak", None).unwrap());
        api.delete_by_id(2).unwrap();
        api.save().unwrap();
    }

    let api = RolodexApi::open(backend_in(&dir)).unwrap();
    assert_eq!(api.len(), 1);

    let anna = api.record(1).unwrap();
    assert_eq!(anna.name().as_str(), "Anna Kowalska");
    assert_eq!(anna.phones()[0].as_str(), "123456789");
    assert_eq!(anna.address().unwrap().city, "Warszawa");
    assert_eq!(anna.notes()[0].as_str(), "met at the conference");

    // Allocator state survived: id 2 is pooled, so the next insert reuses it.
    let mut api = api;
    let id = api.add_record(RolodexApi::<FsBackend>::create_record("Ola", None).unwrap());
    assert_eq!(id, 2);
}

#[test]
fn missing_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let backend = backend_in(&dir);
    assert!(backend.load().unwrap().is_none());
}

#[test]
fn corrupt_artifact_is_an_error_not_an_empty_book() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("address_book.json");
    std::fs::write(&path, "{ not json").unwrap();

    let backend = FsBackend::new(&path);
    match backend.load() {
        Err(RolodexError::Serialization(_)) => {}
        other => panic!("Expected serialization error, got {:?}", other),
    }
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("book.json");
    let backend = FsBackend::new(&path);

    let snapshot = Snapshot {
        version: rolodexapp::snapshot::SNAPSHOT_VERSION,
        records: Vec::new(),
        next_candidate: 1,
        free_ids: Default::default(),
    };
    backend.save(&snapshot).unwrap();
    assert!(path.exists());
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let backend = backend_in(&dir);

    let snapshot = Snapshot {
        version: rolodexapp::snapshot::SNAPSHOT_VERSION,
        records: Vec::new(),
        next_candidate: 1,
        free_ids: Default::default(),
    };
    backend.save(&snapshot).unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["address_book.json"]);
}
