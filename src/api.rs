//! The typed operation surface: two queries and eight mutations, dispatched
//! by the HTTP layer. Every identity-requiring operation resolves the caller
//! from the request context first and routes record mutations through the
//! guard.

use crate::config::Config;
use crate::error::AppResult;
use crate::guard::{guarded_mutate, MutationKind};
use crate::identity::{self, RequestContext, TokenResponse};
use crate::ownership;
use crate::records::{AuthInput, Project, ProjectInput, RegisterInput, Task, TaskInput, TaskUpdateInput};
use crate::storage::SharedStore;

/// Operation dispatcher bundling the store and configuration.
#[derive(Clone)]
pub struct Api {
    pub store: SharedStore,
    pub config: Config,
}

impl Api {
    pub fn new(store: SharedStore, config: Config) -> Self {
        Self { store, config }
    }

    // --- Identity ---

    pub fn register(&self, input: &RegisterInput) -> AppResult<String> {
        identity::register(&self.store, input)
    }

    pub fn authenticate(&self, input: &AuthInput) -> AppResult<TokenResponse> {
        identity::authenticate(&self.store, &self.config, input)
    }

    // --- Queries ---

    pub fn list_projects(&self, ctx: &RequestContext) -> AppResult<Vec<Project>> {
        let caller = ctx.require_principal()?;
        Ok(ownership::projects_by_creator(&self.store, &caller.user_id))
    }

    pub fn list_tasks(&self, ctx: &RequestContext, project_id: &str) -> AppResult<Vec<Task>> {
        let caller = ctx.require_principal()?;
        Ok(ownership::tasks_for_project(&self.store, &caller.user_id, project_id))
    }

    // --- Project mutations ---

    pub fn create_project(&self, ctx: &RequestContext, input: &ProjectInput) -> AppResult<Project> {
        let caller = ctx.require_principal()?;
        ownership::create_project(&self.store, input, caller)
    }

    pub fn update_project(&self, ctx: &RequestContext, id: &str, input: &ProjectInput) -> AppResult<Project> {
        let caller = ctx.require_principal()?;
        input.validate()?;
        guarded_mutate::<Project, _, _>(&self.store, id, caller, MutationKind::Edit, |mut project| {
            project.name = input.name.clone();
            self.store.projects.update_by_id(id, project.clone())?;
            Ok(project)
        })
    }

    pub fn delete_project(&self, ctx: &RequestContext, id: &str) -> AppResult<String> {
        let caller = ctx.require_principal()?;
        guarded_mutate::<Project, _, _>(&self.store, id, caller, MutationKind::Delete, |project| {
            // No cascade: the project's tasks stay (see DESIGN.md).
            self.store.projects.delete_by_id(&project.id)?;
            Ok("Proyecto eliminado".to_string())
        })
    }

    // --- Task mutations ---

    pub fn create_task(&self, ctx: &RequestContext, input: &TaskInput) -> AppResult<Task> {
        let caller = ctx.require_principal()?;
        ownership::create_task(&self.store, input, caller)
    }

    pub fn update_task(&self, ctx: &RequestContext, id: &str, input: &TaskUpdateInput) -> AppResult<Task> {
        let caller = ctx.require_principal()?;
        input.validate()?;
        guarded_mutate::<Task, _, _>(&self.store, id, caller, MutationKind::Edit, |mut task| {
            task.name = input.name.clone();
            task.project = input.project.clone();
            task.state = input.state;
            self.store.tasks.update_by_id(id, task.clone())?;
            Ok(task)
        })
    }

    pub fn delete_task(&self, ctx: &RequestContext, id: &str) -> AppResult<String> {
        let caller = ctx.require_principal()?;
        guarded_mutate::<Task, _, _>(&self.store, id, caller, MutationKind::Delete, |task| {
            self.store.tasks.delete_by_id(&task.id)?;
            Ok("Tarea Eliminada".to_string())
        })
    }
}
