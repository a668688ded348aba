//! Which projects and tasks a user may list, view and edit.
//!
//! Staff see every record. Everyone else sees the projects they created and
//! the tasks assigned to them. Records outside a scope are reported as not
//! found by the callers, so their existence is never revealed.

use crate::auth::CurrentUser;
use crate::models::project::Project;
use crate::models::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    /// Records owned by (projects) or assigned to (tasks) this user id.
    Owner(i32),
}

impl Scope {
    pub fn for_user(user: &CurrentUser) -> Self {
        if user.is_staff {
            Scope::All
        } else {
            Scope::Owner(user.id)
        }
    }

    /// The user's own records, regardless of staff status.
    pub fn own(user: &CurrentUser) -> Self {
        Scope::Owner(user.id)
    }

    /// Owner id to bind into `(? IS NULL OR column = ?)` filters.
    pub fn owner_id(&self) -> Option<i32> {
        match self {
            Scope::All => None,
            Scope::Owner(id) => Some(*id),
        }
    }

    pub fn admits_project(&self, project: &Project) -> bool {
        match self {
            Scope::All => true,
            Scope::Owner(id) => project.created_by == *id,
        }
    }

    pub fn admits_task(&self, task: &Task) -> bool {
        match self {
            Scope::All => true,
            Scope::Owner(id) => task.assigned_to == *id,
        }
    }

    /// Drops every project outside the scope, keeping the order.
    pub fn visible_projects(&self, projects: Vec<Project>) -> Vec<Project> {
        projects
            .into_iter()
            .filter(|project| self.admits_project(project))
            .collect()
    }

    /// Drops every task outside the scope, keeping the order.
    pub fn visible_tasks(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|task| self.admits_task(task)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::{TaskPriority, TaskStatus};
    use chrono::{NaiveDate, Utc};

    const ALICE: CurrentUser = CurrentUser { id: 1, is_staff: false };
    const BOB: CurrentUser = CurrentUser { id: 2, is_staff: false };
    const STAFF: CurrentUser = CurrentUser { id: 3, is_staff: true };

    fn project(project_id: i32, created_by: i32) -> Project {
        Project {
            project_id,
            name: format!("Project {}", project_id),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            created_by,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn task(task_id: i32, assigned_to: i32) -> Task {
        Task {
            task_id,
            title: format!("Task {}", task_id),
            description: String::new(),
            assigned_to,
            status: TaskStatus::Pending,
            priority: TaskPriority::Low,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            project_id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_scope_for_user() {
        assert_eq!(Scope::for_user(&ALICE), Scope::Owner(1));
        assert_eq!(Scope::for_user(&STAFF), Scope::All);
        assert_eq!(Scope::own(&STAFF), Scope::Owner(3));
        assert_eq!(Scope::All.owner_id(), None);
        assert_eq!(Scope::Owner(2).owner_id(), Some(2));
    }

    fn ids(tasks: &[Task]) -> Vec<i32> {
        tasks.iter().map(|t| t.task_id).collect()
    }

    #[test]
    fn test_ordinary_user_task_list_holds_only_assigned_tasks() {
        let tasks = vec![task(1, 1), task(2, 2), task(3, 1), task(4, 3)];
        let visible = Scope::for_user(&ALICE).visible_tasks(tasks);
        assert_eq!(ids(&visible), vec![1, 3]);
        assert!(visible.iter().all(|t| t.assigned_to == ALICE.id));

        let none_for_bob = Scope::for_user(&BOB).visible_tasks(vec![task(1, 1), task(3, 1)]);
        assert!(none_for_bob.is_empty());
    }

    #[test]
    fn test_staff_task_list_holds_every_task() {
        let tasks = vec![task(1, 1), task(2, 2), task(3, 1), task(4, 3)];
        let visible = Scope::for_user(&STAFF).visible_tasks(tasks.clone());
        assert_eq!(ids(&visible), ids(&tasks));
    }

    #[test]
    fn test_project_list_by_creator() {
        let projects = vec![project(1, ALICE.id), project(2, BOB.id), project(3, ALICE.id)];

        let mine = Scope::for_user(&ALICE).visible_projects(projects.clone());
        let mine: Vec<i32> = mine.iter().map(|p| p.project_id).collect();
        assert_eq!(mine, vec![1, 3]);

        assert_eq!(Scope::for_user(&STAFF).visible_projects(projects.clone()), projects);
    }

    #[test]
    fn test_project_visibility_by_creator() {
        let mine = project(1, ALICE.id);
        let theirs = project(2, BOB.id);
        let scope = Scope::for_user(&ALICE);
        assert!(scope.admits_project(&mine));
        assert!(!scope.admits_project(&theirs));
        assert!(Scope::for_user(&STAFF).admits_project(&theirs));

        let scope = Scope::for_user(&BOB);
        assert!(!scope.admits_project(&mine));
        assert!(scope.admits_project(&theirs));
    }
}
