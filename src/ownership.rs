//! Creator-stamped persistence for Project and Task records.
//!
//! The store itself enforces nothing beyond id identity; the creator is
//! stamped here at creation time and the guard re-checks it on every
//! mutation. Listing is always scoped by creator.

use crate::error::AppResult;
use crate::identity::Principal;
use crate::records::{gen_id, now_ms, Project, ProjectInput, Task, TaskInput};
use crate::storage::{Collection, SharedStore};

/// A record kind with a single owning creator, fixed at creation.
pub trait OwnedRecord: Clone + serde::Serialize + serde::de::DeserializeOwned {
    /// Message for the absent-record guard branch.
    const NOT_FOUND_MSG: &'static str;
    const NOT_FOUND_CODE: &'static str;

    fn id(&self) -> &str;
    fn creator(&self) -> &str;
    fn collection(store: &SharedStore) -> &Collection<Self>;
}

impl OwnedRecord for Project {
    const NOT_FOUND_MSG: &'static str = "Proyecto no encontrado";
    const NOT_FOUND_CODE: &'static str = "project_not_found";

    fn id(&self) -> &str { &self.id }
    fn creator(&self) -> &str { &self.creator }
    fn collection(store: &SharedStore) -> &Collection<Self> { &store.projects }
}

impl OwnedRecord for Task {
    const NOT_FOUND_MSG: &'static str = "Tarea no encontrada";
    const NOT_FOUND_CODE: &'static str = "task_not_found";

    fn id(&self) -> &str { &self.id }
    fn creator(&self) -> &str { &self.creator }
    fn collection(store: &SharedStore) -> &Collection<Self> { &store.tasks }
}

/// Create a project owned by the caller. Store failures propagate.
pub fn create_project(store: &SharedStore, input: &ProjectInput, caller: &Principal) -> AppResult<Project> {
    input.validate()?;
    let project = Project {
        id: gen_id(),
        name: input.name.clone(),
        creator: caller.user_id.clone(),
        created_at: now_ms(),
    };
    store.projects.insert(&project.id.clone(), project.clone())?;
    Ok(project)
}

/// Create a task owned by the caller. The referenced project id is recorded
/// as-is; its existence is not verified (see DESIGN.md).
pub fn create_task(store: &SharedStore, input: &TaskInput, caller: &Principal) -> AppResult<Task> {
    input.validate()?;
    let task = Task {
        id: gen_id(),
        name: input.name.clone(),
        project: input.project.clone(),
        state: false,
        creator: caller.user_id.clone(),
        created_at: now_ms(),
    };
    store.tasks.insert(&task.id.clone(), task.clone())?;
    Ok(task)
}

pub fn projects_by_creator(store: &SharedStore, creator_id: &str) -> Vec<Project> {
    store.projects.find_where(|p| p.creator == creator_id)
}

/// Tasks owned by the caller within one project; tasks by other creators or
/// in other projects never appear.
pub fn tasks_for_project(store: &SharedStore, creator_id: &str, project_id: &str) -> Vec<Task> {
    store
        .tasks
        .find_where(|t| t.creator == creator_id && t.project == project_id)
}
