use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::api::ApiError;
use crate::core::application::{Application, ApplicationStatus};
use crate::core::filter::{self, LISTINGS_PER_PAGE, ListingFilter, Pager};
use crate::core::listing::Listing;
use crate::session::Session;

/// What the join button on a card says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinState {
    Join,
    Applied,
    Joined,
    /// Owners, mentors and admins get no join button.
    Hidden,
}

impl JoinState {
    pub fn enabled(&self) -> bool {
        *self == Self::Join
    }
}

/// Browse state shared by the projects and hackathons pages.
#[derive(Debug)]
pub struct ListingStore<L: Listing> {
    pub items: Vec<L>,
    pub pager: Pager<ListingFilter>,
    pub loading: bool,
    /// Status of the user's own application per target id.
    applied: HashMap<i64, ApplicationStatus>,
    /// Targets the user is already part of.
    joined: HashSet<i64>,
}

impl<L: Listing> Default for ListingStore<L> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pager: Pager::new(ListingFilter::default(), LISTINGS_PER_PAGE),
            loading: true,
            applied: HashMap::new(),
            joined: HashSet::new(),
        }
    }
}

impl<L: Listing> ListingStore<L> {
    pub fn loaded(&mut self, items: Vec<L>) {
        self.items = items;
        self.loading = false;
        self.settle();
    }

    pub fn get(&self, id: i64) -> Option<&L> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Remember the user's applications of this listing's kind. Approved ones count as joined.
    pub fn set_applications(&mut self, apps: &[Application]) {
        self.applied.clear();
        for app in apps.iter().filter(|a| a.kind == L::KIND) {
            if app.status == ApplicationStatus::Approved {
                self.joined.insert(app.target_id);
            }
            self.applied.insert(app.target_id, app.status);
        }
    }

    pub fn set_joined(&mut self, ids: impl IntoIterator<Item = i64>) {
        self.joined.extend(ids);
    }

    pub fn join_state(&self, item: &L, session: &Session) -> JoinState {
        if !session.can_apply() || session.is_owner(item.owner_id()) {
            return JoinState::Hidden;
        }
        if self.joined.contains(&item.id()) {
            return JoinState::Joined;
        }
        match self.applied.get(&item.id()) {
            Some(ApplicationStatus::Withdrawn) | None => JoinState::Join,
            Some(_) => JoinState::Applied,
        }
    }

    /// Outcome of `POST applications` for a join click.
    pub fn join_finished(&mut self, target_id: i64, result: Result<Application, ApiError>) -> Option<String> {
        match result {
            Ok(app) => {
                self.applied.insert(target_id, app.status);
                None
            }
            Err(ApiError::Validation(detail)) if detail.contains("Already applied") => {
                self.applied.insert(target_id, ApplicationStatus::Pending);
                Some("You have already applied.".to_string())
            }
            Err(e) => {
                log::warn!("join {} {} failed: {}", L::KIND.as_str(), target_id, e);
                Some(format!("Could not submit the application. {}", e))
            }
        }
    }

    pub fn created(&mut self, item: L) {
        self.items.insert(0, item);
    }

    pub fn deleted(&mut self, id: i64, result: Result<(), ApiError>) -> Option<String> {
        match result {
            Ok(()) => {
                self.items.retain(|i| i.id() != id);
                self.settle();
                None
            }
            Err(e) => {
                log::warn!("delete {} {} failed: {}", L::KIND.as_str(), id, e);
                Some(format!("Could not delete. {}", e))
            }
        }
    }

    pub fn update_filter(&mut self, f: impl FnOnce(&mut ListingFilter)) {
        self.pager.update_filter(f);
    }

    pub fn clear_filter(&mut self) {
        self.pager.set_filter(ListingFilter::default());
    }

    pub fn themes(&self) -> Vec<String> {
        filter::all_tags(&self.items)
    }

    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&L> {
        self.pager.filter.apply(&self.items, now)
    }

    pub fn page(&self, now: DateTime<Utc>) -> Vec<&L> {
        self.pager.slice(&self.visible(now)).to_vec()
    }

    pub fn current_page(&self, now: DateTime<Utc>) -> usize {
        self.pager.current(self.visible(now).len())
    }

    pub fn page_count(&self, now: DateTime<Utc>) -> usize {
        self.pager.pages(self.visible(now).len())
    }

    pub fn go_to_page(&mut self, page: usize, now: DateTime<Utc>) {
        let len = self.visible(now).len();
        self.pager.go_to(page, len);
    }

    fn settle(&mut self) {
        let len = self.visible(Utc::now()).len();
        self.pager.settle(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth::TokenPair;
    use crate::core::application::ApplicationKind;
    use crate::core::hackathon::Hackathon;
    use crate::core::project::Project;
    use crate::core::user::{Role, User};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap()
    }

    fn project(id: i64, owner: i64) -> Project {
        serde_json::from_value(serde_json::json!({
            "id": id, "title": format!("Project {}", id), "created_by": owner
        }))
        .unwrap()
    }

    fn session(id: i64, role: Role) -> Session {
        Session::new(
            TokenPair {
                access_token: "t".into(),
                refresh_token: None,
                token_type: None,
            },
            User {
                id,
                name: "U".into(),
                email: "u@uni.edu".into(),
                role,
                skills: Vec::new(),
                bio: None,
                avatar_url: None,
                created_at: None,
            },
        )
    }

    fn application(kind: ApplicationKind, target_id: i64, status: ApplicationStatus) -> Application {
        serde_json::from_value(serde_json::json!({
            "id": target_id * 100, "type": kind.as_str(), "target_id": target_id, "status": status.as_str()
        }))
        .unwrap()
    }

    #[test]
    fn join_button_states() {
        let mut store = ListingStore::<Project>::default();
        store.loaded(vec![project(1, 9), project(2, 9), project(3, 9), project(4, 5)]);
        store.set_applications(&[
            application(ApplicationKind::Project, 1, ApplicationStatus::Pending),
            application(ApplicationKind::Project, 2, ApplicationStatus::Approved),
            application(ApplicationKind::Hackathon, 3, ApplicationStatus::Pending),
        ]);

        let student = session(5, Role::Student);
        let state = |id| store.join_state(store.get(id).unwrap(), &student);
        assert_eq!(state(1), JoinState::Applied);
        assert_eq!(state(2), JoinState::Joined);
        assert_eq!(state(3), JoinState::Join);
        assert_eq!(state(4), JoinState::Hidden);

        let mentor = session(6, Role::Mentor);
        assert_eq!(store.join_state(store.get(3).unwrap(), &mentor), JoinState::Hidden);
    }

    #[test]
    fn duplicate_application_marks_applied() {
        let mut store = ListingStore::<Project>::default();
        store.loaded(vec![project(1, 9)]);
        let alert = store.join_finished(
            1,
            Err(ApiError::Validation("Already applied to this target".into())),
        );
        assert!(alert.is_some());
        assert_eq!(
            store.join_state(store.get(1).unwrap(), &session(5, Role::Client)),
            JoinState::Applied
        );
    }

    #[test]
    fn delete_waits_for_server_and_clamps_page() {
        let mut store = ListingStore::<Project>::default();
        store.loaded((1..=7).map(|i| project(i, 1)).collect());
        store.go_to_page(2, now());
        assert_eq!(store.page(now()).len(), 1);

        assert!(store.deleted(7, Err(ApiError::Forbidden("no".into()))).is_some());
        assert_eq!(store.items.len(), 7);

        assert_eq!(store.deleted(7, Ok(())), None);
        assert_eq!(store.pager.page, 1);
        assert_eq!(store.page_count(now()), 1);
    }

    #[test]
    fn reload_under_search_clamps_to_matching_pages() {
        let titled = |id: i64, title: &str| -> Project {
            serde_json::from_value(serde_json::json!({
                "id": id, "title": title, "created_by": 1
            }))
            .unwrap()
        };
        let mut store = ListingStore::<Project>::default();
        store.update_filter(|f| f.search = "map".into());
        store.loaded((1..=7).map(|i| titled(i, "Campus Map")).collect());
        store.go_to_page(2, now());
        assert_eq!(store.current_page(now()), 2);

        let mut items: Vec<Project> = (1..=3).map(|i| titled(i, "Campus Map")).collect();
        items.extend((4..=9).map(|i| titled(i, "Study Group")));
        store.loaded(items);
        assert_eq!(store.pager.page, 1);
        assert_eq!(store.page(now()).len(), 3);
    }

    #[test]
    fn hackathon_status_filter_uses_phase() {
        let mut store = ListingStore::<Hackathon>::default();
        let h = |id: i64, start: &str, end: &str| -> Hackathon {
            serde_json::from_value(serde_json::json!({
                "id": id, "title": "H", "start_at": start, "end_at": end, "created_by": 1
            }))
            .unwrap()
        };
        store.loaded(vec![
            h(1, "2026-04-01T00:00:00Z", "2026-04-02T00:00:00Z"),
            h(2, "2026-04-30T00:00:00Z", "2026-05-02T00:00:00Z"),
            h(3, "2026-06-01T00:00:00Z", "2026-06-02T00:00:00Z"),
        ]);
        store.update_filter(|f| f.status = Some("ongoing".into()));
        let ids: Vec<i64> = store.visible(now()).iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(store.themes(), vec!["General".to_string()]);
    }
}
