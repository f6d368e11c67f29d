use std::collections::HashMap;

use crate::api::ApiError;
use crate::core::form::FormError;
use crate::core::membership::Membership;
use crate::core::project::Project;
use crate::core::task::{NewTask, Task, TaskBoard, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Checking,
    Granted,
    Denied,
}

/// Creator of the project or an active member of it.
pub fn has_access(project: &Project, members: &[Membership], user_id: i64) -> bool {
    project.created_by == user_id
        || members
            .iter()
            .any(|m| m.user_id == user_id && m.is_active())
}

/// A task move waiting on `PATCH tasks/:id`.
#[derive(Debug, Clone)]
pub struct TaskMove {
    pub project_id: i64,
    pub task_id: i64,
    pub status: TaskStatus,
    snapshot: Vec<Task>,
    generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub assignee: Option<i64>,
}

#[derive(Debug)]
pub struct WorkspaceStore {
    pub project_id: i64,
    pub project: Option<Project>,
    pub access: Access,
    pub tasks: Vec<Task>,
    pub members: Vec<Membership>,
    names: HashMap<i64, String>,
    pub draft: TaskDraft,
    generation: u64,
}

impl WorkspaceStore {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            project: None,
            access: Access::Checking,
            tasks: Vec::new(),
            members: Vec::new(),
            names: HashMap::new(),
            draft: TaskDraft::default(),
            generation: super::next_generation(),
        }
    }

    /// Record the project and its roster, and decide whether `user_id` may enter.
    pub fn resolve(&mut self, project: Project, members: Vec<Membership>, user_id: i64) -> Access {
        self.access = if has_access(&project, &members, user_id) {
            Access::Granted
        } else {
            log::info!("user {} has no access to workspace {}", user_id, project.id);
            Access::Denied
        };
        self.project = Some(project);
        self.members = members;
        self.access
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn board(&self) -> TaskBoard<'_> {
        TaskBoard::partition(&self.tasks)
    }

    pub fn active_members(&self) -> Vec<&Membership> {
        self.members.iter().filter(|m| m.is_active()).collect()
    }

    /// Everyone whose name the page shows: creator, active members, assignees.
    pub fn people(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.project.iter().map(|p| p.created_by).collect();
        ids.extend(self.active_members().iter().map(|m| m.user_id));
        ids.extend(self.tasks.iter().filter_map(|t| t.assignee_id));
        ids.sort_unstable();
        ids.dedup();
        ids.retain(|id| !self.names.contains_key(id));
        ids
    }

    pub fn set_names(&mut self, names: Vec<(i64, String)>) {
        self.names.extend(names);
    }

    pub fn name_of(&self, user_id: i64) -> String {
        self.names
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| format!("User #{}", user_id))
    }

    pub fn new_task(&self) -> Result<NewTask, FormError> {
        NewTask::new(
            self.project_id,
            &self.draft.title,
            &self.draft.description,
            self.draft.assignee,
        )
    }

    pub fn task_created(&mut self, result: Result<Task, ApiError>) -> Option<String> {
        match result {
            Ok(task) if task.project_id != self.project_id => {
                log::debug!("dropping task {} created for project {}", task.id, task.project_id);
                None
            }
            Ok(task) => {
                self.tasks.push(task);
                self.draft = TaskDraft::default();
                None
            }
            Err(e) => {
                log::warn!("create task in project {} failed: {}", self.project_id, e);
                Some(format!("Could not create the task. {}", e))
            }
        }
    }

    /// Move a task locally and hand back the request to send.
    /// `None` when the task is unknown or already in that column.
    pub fn begin_move(&mut self, task_id: i64, status: TaskStatus) -> Option<TaskMove> {
        let snapshot = self.tasks.clone();
        let task = self.tasks.iter_mut().find(|t| t.id == task_id)?;
        if task.status == status {
            return None;
        }
        task.status = status;
        Some(TaskMove {
            project_id: self.project_id,
            task_id,
            status,
            snapshot,
            generation: self.generation,
        })
    }

    /// Settle a move. A move begun on a workspace that has since been
    /// replaced only reports its failure; the board here is left alone.
    pub fn finish_move(&mut self, mv: TaskMove, result: Result<Task, ApiError>) -> Option<String> {
        if mv.generation != self.generation {
            log::debug!(
                "move of task {} in project {} finished after the workspace changed",
                mv.task_id,
                mv.project_id
            );
            return result.err().map(|e| format!("Could not move the task. {}", e));
        }
        match result {
            Ok(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == mv.task_id) {
                    *slot = task;
                }
                None
            }
            Err(e) => {
                log::warn!("move of task {} to {} failed: {}", mv.task_id, mv.status.as_str(), e);
                self.tasks = mv.snapshot;
                Some(format!("Could not move the task. {}", e))
            }
        }
    }

    /// Deletion waits for the server before the card disappears.
    pub fn task_deleted(&mut self, task_id: i64, result: Result<(), ApiError>) -> Option<String> {
        match result {
            Ok(()) => {
                self.tasks.retain(|t| t.id != task_id);
                None
            }
            Err(e) => {
                log::warn!("delete of task {} failed: {}", task_id, e);
                Some(format!("Could not delete the task. {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::membership::MembershipStatus;

    fn project(owner: i64) -> Project {
        serde_json::from_value(serde_json::json!({
            "id": 4, "title": "Campus Map", "created_by": owner
        }))
        .unwrap()
    }

    fn member(user_id: i64, status: MembershipStatus) -> Membership {
        Membership {
            id: user_id * 10,
            project_id: 4,
            user_id,
            role_in_team: "dev".into(),
            status,
            created_at: None,
            invited_by: None,
        }
    }

    fn task(id: i64, status: TaskStatus, assignee: Option<i64>) -> Task {
        Task {
            id,
            project_id: 4,
            title: format!("t{}", id),
            description: None,
            status,
            assignee_id: assignee,
            due_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn granted() -> WorkspaceStore {
        let mut ws = WorkspaceStore::new(4);
        ws.resolve(project(1), vec![member(2, MembershipStatus::Active)], 2);
        ws.set_tasks(vec![
            task(1, TaskStatus::Todo, None),
            task(2, TaskStatus::InProgress, Some(3)),
        ]);
        ws
    }

    #[test]
    fn access_rules() {
        let members = vec![
            member(2, MembershipStatus::Active),
            member(3, MembershipStatus::Invited),
        ];
        assert!(has_access(&project(1), &members, 1));
        assert!(has_access(&project(1), &members, 2));
        assert!(!has_access(&project(1), &members, 3));
        assert!(!has_access(&project(1), &members, 9));

        let mut ws = WorkspaceStore::new(4);
        assert_eq!(ws.resolve(project(1), members, 3), Access::Denied);
    }

    #[test]
    fn failed_move_rolls_back() {
        let mut ws = granted();
        let mv = ws.begin_move(1, TaskStatus::Done).unwrap();
        assert_eq!(ws.board().done.len(), 1);

        let alert = ws.finish_move(mv, Err(ApiError::Transport("offline".into())));
        assert!(alert.is_some());
        assert_eq!(ws.tasks[0].status, TaskStatus::Todo);
        assert!(ws.board().done.is_empty());
    }

    #[test]
    fn successful_move_takes_server_copy() {
        let mut ws = granted();
        let mv = ws.begin_move(2, TaskStatus::Done).unwrap();
        let mut server = task(2, TaskStatus::Done, Some(3));
        server.title = "renamed elsewhere".into();
        assert_eq!(ws.finish_move(mv, Ok(server)), None);
        assert_eq!(ws.tasks[1].title, "renamed elsewhere");
    }

    #[test]
    fn same_column_is_a_no_op() {
        let mut ws = granted();
        assert!(ws.begin_move(1, TaskStatus::Todo).is_none());
        assert!(ws.begin_move(99, TaskStatus::Done).is_none());
    }

    #[test]
    fn create_and_delete() {
        let mut ws = granted();
        ws.draft.title = "  ".into();
        assert!(ws.new_task().is_err());
        ws.draft.title = "Design schema".into();
        let req = ws.new_task().unwrap();
        assert_eq!(req.project_id, 4);

        assert_eq!(ws.task_created(Ok(task(3, TaskStatus::Todo, None))), None);
        assert!(ws.draft.title.is_empty());
        assert_eq!(ws.board().todo.len(), 2);

        assert!(ws.task_deleted(3, Err(ApiError::Forbidden("no".into()))).is_some());
        assert_eq!(ws.tasks.len(), 3);
        assert_eq!(ws.task_deleted(3, Ok(())), None);
        assert_eq!(ws.tasks.len(), 2);
    }

    #[test]
    fn names_fall_back_to_ids() {
        let mut ws = granted();
        assert_eq!(ws.people(), vec![1, 2, 3]);
        ws.set_names(vec![(1, "Owner".into()), (2, "Member".into())]);
        assert_eq!(ws.people(), vec![3]);
        assert_eq!(ws.name_of(1), "Owner");
        assert_eq!(ws.name_of(3), "User #3");
    }

    #[test]
    fn move_from_a_closed_workspace_leaves_board_alone() {
        let mut old = granted();
        let mv = old.begin_move(1, TaskStatus::Done).unwrap();
        assert_eq!(mv.project_id, 4);

        let mut ws = granted();
        ws.begin_move(2, TaskStatus::Todo).unwrap();
        let alert = ws.finish_move(mv.clone(), Err(ApiError::Transport("offline".into())));
        assert!(alert.is_some());
        assert_eq!(ws.tasks[0].status, TaskStatus::Todo);
        assert_eq!(ws.tasks[1].status, TaskStatus::Todo);

        assert_eq!(ws.finish_move(mv, Ok(task(1, TaskStatus::Done, None))), None);
        assert_eq!(ws.tasks[0].status, TaskStatus::Todo);
    }

    #[test]
    fn task_for_another_project_is_dropped() {
        let mut ws = granted();
        let mut other = task(7, TaskStatus::Todo, None);
        other.project_id = 9;
        assert_eq!(ws.task_created(Ok(other)), None);
        assert_eq!(ws.tasks.len(), 2);
    }

    #[test]
    fn unresolved_names_are_asked_again() {
        let mut ws = granted();
        ws.set_names(vec![(1, "Owner".into())]);
        assert_eq!(ws.people(), vec![2, 3]);
        ws.set_names(vec![(2, "Member".into())]);
        assert_eq!(ws.people(), vec![3]);
        assert_eq!(ws.name_of(2), "Member");
    }
}
