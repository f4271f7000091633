//! The check-then-act gate in front of every record mutation.
//!
//! The ownership check is re-derived from the live record on each call, so a
//! caller cannot mutate a record it does not own by supplying an arbitrary
//! id. Existence and permission failures are distinct, and both precede any
//! write: a failed check leaves no partial state.

use crate::error::{AppError, AppResult};
use crate::identity::Principal;
use crate::ownership::OwnedRecord;
use crate::storage::SharedStore;

/// What the caller is about to do, for the permission-failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Edit,
    Delete,
}

impl MutationKind {
    fn verb(self) -> &'static str {
        match self {
            MutationKind::Edit => "editar",
            MutationKind::Delete => "eliminar",
        }
    }
}

/// Fetch the record, verify it exists, verify the caller owns it, then run
/// the action with the live record.
pub fn guarded_mutate<T, R, F>(
    store: &SharedStore,
    id: &str,
    caller: &Principal,
    kind: MutationKind,
    action: F,
) -> AppResult<R>
where
    T: OwnedRecord,
    F: FnOnce(T) -> AppResult<R>,
{
    let Some(record) = T::collection(store).find_by_id(id) else {
        return Err(AppError::not_found(T::NOT_FOUND_CODE, T::NOT_FOUND_MSG));
    };
    if record.creator() != caller.user_id {
        return Err(AppError::forbidden(
            "not_owner".to_string(),
            format!("No tienes las credenciales para {}", kind.verb()),
        ));
    }
    action(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Project, ProjectInput};

    fn principal(id: &str) -> Principal {
        Principal { user_id: id.into(), email: format!("{}@x.com", id) }
    }

    fn store_with_project(creator: &str) -> (SharedStore, String, tempfile::TempDir) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = SharedStore::new(tmp.path()).expect("store");
        let input = ProjectInput { name: "Work".into() };
        let p = crate::ownership::create_project(&store, &input, &principal(creator)).expect("create");
        (store, p.id, tmp)
    }

    #[test]
    fn missing_record_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SharedStore::new(tmp.path()).unwrap();
        let err = guarded_mutate::<Project, _, _>(&store, "nope", &principal("u-1"), MutationKind::Edit, |_| Ok(()))
            .unwrap_err();
        assert_eq!(err.http_status(), 404);
        assert_eq!(err.message(), "Proyecto no encontrado");
    }

    #[test]
    fn non_owner_is_forbidden_and_nothing_runs() {
        let (store, id, _tmp) = store_with_project("u-1");
        let mut ran = false;
        let err = guarded_mutate::<Project, _, _>(&store, &id, &principal("u-2"), MutationKind::Delete, |_| {
            ran = true;
            Ok(())
        })
        .unwrap_err();
        assert_eq!(err.http_status(), 403);
        assert_eq!(err.message(), "No tienes las credenciales para eliminar");
        assert!(!ran);
    }

    #[test]
    fn owner_reaches_the_action_with_the_live_record() {
        let (store, id, _tmp) = store_with_project("u-1");
        let name = guarded_mutate::<Project, _, _>(&store, &id, &principal("u-1"), MutationKind::Edit, |p| Ok(p.name))
            .expect("owner passes");
        assert_eq!(name, "Work");
    }
}
