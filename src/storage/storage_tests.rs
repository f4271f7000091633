use super::*;
use crate::records::{gen_id, now_ms, Project};

fn project(name: &str, creator: &str) -> Project {
    Project { id: gen_id(), name: name.into(), creator: creator.into(), created_at: now_ms() }
}

#[test]
fn insert_find_update_delete() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let store = SharedStore::new(tmp.path())?;

    let p = project("Work", "u-1");
    let id = p.id.clone();
    store.projects.insert(&id, p)?;
    assert_eq!(store.projects.len(), 1);

    let found = store.projects.find_by_id(&id).expect("present");
    assert_eq!(found.name, "Work");

    let mut renamed = found.clone();
    renamed.name = "Work2".into();
    store.projects.update_by_id(&id, renamed)?;
    assert_eq!(store.projects.find_by_id(&id).unwrap().name, "Work2");

    assert!(store.projects.delete_by_id(&id)?);
    assert!(!store.projects.delete_by_id(&id)?);
    assert!(store.projects.find_by_id(&id).is_none());
    Ok(())
}

#[test]
fn update_missing_id_fails() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let store = SharedStore::new(tmp.path())?;
    let p = project("Ghost", "u-1");
    assert!(store.projects.update_by_id("no-such-id", p).is_err());
    Ok(())
}

#[test]
fn find_where_filters() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let store = SharedStore::new(tmp.path())?;
    for (name, creator) in [("A", "u-1"), ("B", "u-1"), ("C", "u-2")] {
        let p = project(name, creator);
        store.projects.insert(&p.id.clone(), p)?;
    }
    let mine = store.projects.find_where(|p| p.creator == "u-1");
    assert_eq!(mine.len(), 2);
    Ok(())
}

#[test]
fn collections_survive_reopen() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let id;
    {
        let store = SharedStore::new(tmp.path())?;
        let p = project("Durable", "u-1");
        id = p.id.clone();
        store.projects.insert(&id, p)?;
    }
    let reopened = SharedStore::new(tmp.path())?;
    let found = reopened.projects.find_by_id(&id).expect("persisted across reopen");
    assert_eq!(found.name, "Durable");
    assert_eq!(found.creator, "u-1");
    Ok(())
}

#[test]
fn corrupt_collection_file_is_an_error() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    std::fs::write(tmp.path().join("users.json"), b"{ not json")?;
    assert!(SharedStore::new(tmp.path()).is_err());
    Ok(())
}
