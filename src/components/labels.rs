//! Translated display names for domain enums.

use crate::core::application::ApplicationStatus;
use crate::core::filter::{DateWindow, SortOrder};
use crate::core::hackathon::Phase;
use crate::core::task::TaskStatus;
use crate::core::user::Role;
use crate::fl;
use crate::store::listings::JoinState;

pub fn application_status(status: ApplicationStatus) -> String {
    match status {
        ApplicationStatus::Pending => fl!("status-pending"),
        ApplicationStatus::Approved => fl!("status-approved"),
        ApplicationStatus::Rejected => fl!("status-rejected"),
        ApplicationStatus::Hold => fl!("status-hold"),
        ApplicationStatus::Withdrawn => fl!("status-withdrawn"),
    }
}

pub fn task_status(status: TaskStatus) -> String {
    match status {
        TaskStatus::Todo => fl!("task-todo"),
        TaskStatus::InProgress => fl!("task-in-progress"),
        TaskStatus::Done => fl!("task-done"),
    }
}

pub fn sort_order(order: SortOrder) -> String {
    match order {
        SortOrder::Newest => fl!("sort-newest"),
        SortOrder::Oldest => fl!("sort-oldest"),
    }
}

pub fn date_window(window: DateWindow) -> String {
    match window {
        DateWindow::All => fl!("window-any"),
        DateWindow::Days(n) => fl!("window-days", days = n.to_string()),
    }
}

pub fn phase(phase: Phase) -> String {
    match phase {
        Phase::Upcoming => fl!("phase-upcoming"),
        Phase::Ongoing => fl!("phase-ongoing"),
        Phase::Past => fl!("phase-past"),
    }
}

pub fn role(role: Role) -> String {
    match role {
        Role::Student => fl!("role-student"),
        Role::Mentor => fl!("role-mentor"),
        Role::Client => fl!("role-client"),
        Role::Admin => fl!("role-admin"),
    }
}

pub fn join_state(state: JoinState) -> String {
    match state {
        JoinState::Join => fl!("join"),
        JoinState::Applied => fl!("join-applied"),
        JoinState::Joined => fl!("join-joined"),
        JoinState::Hidden => String::new(),
    }
}
