use chrono::{DateTime, Utc};

use crate::api::ApiError;
use crate::core::application::{Application, ApplicationKind, ApplicationStatus, ReviewAction, TransitionError};
use crate::core::filter::{self, APPLICANTS_PER_PAGE, ApplicantFilter, Pager, SortOrder};

/// Which applications the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicantScope {
    /// Everything the signed-in user submitted.
    #[default]
    Mine,
    /// Applications to one project or hackathon the user owns.
    Target(ApplicationKind, i64),
}

/// A status change in flight: the request to send and the list to restore if it fails.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub id: i64,
    pub action: ReviewAction,
    /// The list the snapshot was taken from.
    pub scope: ApplicantScope,
    generation: u64,
    snapshot: Vec<Application>,
}

#[derive(Debug, Default)]
pub struct ApplicantsStore {
    pub scope: ApplicantScope,
    pub items: Vec<Application>,
    pub pager: Pager<ApplicantFilter>,
    pub sort: SortOrder,
    pub loading: bool,
    generation: u64,
}

impl Default for Pager<ApplicantFilter> {
    fn default() -> Self {
        Pager::new(ApplicantFilter::default(), APPLICANTS_PER_PAGE)
    }
}

impl ApplicantsStore {
    pub fn new(scope: ApplicantScope) -> Self {
        Self {
            scope,
            loading: true,
            generation: super::next_generation(),
            ..Default::default()
        }
    }

    pub fn loaded(&mut self, items: Vec<Application>) {
        self.items = items;
        self.loading = false;
        self.settle();
    }

    pub fn get(&self, id: i64) -> Option<&Application> {
        self.items.iter().find(|a| a.id == id)
    }

    /// Check the move, snapshot the list and apply the new status locally.
    /// Refused moves leave the list untouched and send nothing.
    pub fn begin_status_change(
        &mut self,
        id: i64,
        next: ApplicationStatus,
    ) -> Result<StatusChange, TransitionError> {
        let current = self.get(id).ok_or(TransitionError::Unknown(id))?.status;
        let action = current.review_action(next)?;

        let snapshot = self.items.clone();
        if let Some(app) = self.items.iter_mut().find(|a| a.id == id) {
            app.status = action.target_status();
        }
        log::debug!("application {}: {} -> {}", id, current.as_str(), next.as_str());
        self.settle();
        Ok(StatusChange {
            id,
            action,
            scope: self.scope,
            generation: self.generation,
            snapshot,
        })
    }

    /// Apply the server's answer. On failure the whole list goes back to the
    /// snapshot and the alert text is returned. A change begun on another list
    /// only reports its failure.
    pub fn finish_status_change(
        &mut self,
        change: StatusChange,
        result: Result<Application, ApiError>,
    ) -> Option<String> {
        if change.generation != self.generation {
            log::debug!("application {} settled after leaving {:?}", change.id, change.scope);
            return result
                .err()
                .map(|e| format!("Could not update the application. {}", e));
        }
        let alert = match result {
            Ok(mut updated) => {
                if let Some(slot) = self.items.iter_mut().find(|a| a.id == change.id) {
                    if updated.applicant.is_none() {
                        updated.applicant = slot.applicant.take();
                    }
                    if updated.project.is_none() {
                        updated.project = slot.project.take();
                    }
                    if updated.hackathon.is_none() {
                        updated.hackathon = slot.hackathon.take();
                    }
                    *slot = updated;
                }
                None
            }
            Err(e) => {
                log::warn!(
                    "{} of application {} failed: {}",
                    change.action.path_segment(),
                    change.id,
                    e
                );
                self.items = change.snapshot;
                Some(format!("Could not update the application. {}", e))
            }
        };
        self.settle();
        alert
    }

    /// Pull the page back inside the filtered list after it shrank.
    fn settle(&mut self) {
        let len = self.visible(Utc::now()).len();
        self.pager.settle(len);
    }

    /// A freshly submitted application goes to the top of the list.
    pub fn insert_created(&mut self, app: Application) {
        self.items.retain(|a| a.id != app.id);
        self.items.insert(0, app);
    }

    pub fn update_filter(&mut self, f: impl FnOnce(&mut ApplicantFilter)) {
        self.pager.update_filter(f);
    }

    pub fn clear_filter(&mut self) {
        self.pager.set_filter(ApplicantFilter::default());
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Filtered and sorted, before paging.
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&Application> {
        let mut rows = self.pager.filter.apply(&self.items, now);
        filter::sort_by_date(&mut rows, self.sort);
        rows
    }

    pub fn page(&self, now: DateTime<Utc>) -> Vec<&Application> {
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

    pub fn count_by_status(&self, status: ApplicationStatus) -> usize {
        self.items.iter().filter(|a| a.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap()
    }

    fn app(id: i64, status: ApplicationStatus) -> Application {
        Application {
            id,
            kind: ApplicationKind::Project,
            target_id: 3,
            applicant_id: Some(100 + id),
            status,
            message: None,
            created_at: Some(now() - Duration::hours(id)),
            updated_at: None,
            applicant: None,
            project: None,
            hackathon: None,
        }
    }

    fn store(items: Vec<Application>) -> ApplicantsStore {
        let mut store = ApplicantsStore::new(ApplicantScope::Target(ApplicationKind::Project, 3));
        store.loaded(items);
        store
    }

    #[test]
    fn failed_reject_restores_pending_and_alerts() {
        let mut store = store(vec![app(1, ApplicationStatus::Pending)]);

        let change = store
            .begin_status_change(1, ApplicationStatus::Rejected)
            .unwrap();
        assert_eq!(change.action, ReviewAction::Reject);
        assert_eq!(store.get(1).unwrap().status, ApplicationStatus::Rejected);

        let alert = store.finish_status_change(change, Err(ApiError::Server {
            status: 500,
            message: "boom".into(),
        }));
        assert!(alert.is_some());
        assert_eq!(store.get(1).unwrap().status, ApplicationStatus::Pending);
    }

    #[test]
    fn successful_approve_takes_server_copy() {
        let mut store = store(vec![app(1, ApplicationStatus::Pending), app(2, ApplicationStatus::Pending)]);
        let change = store
            .begin_status_change(2, ApplicationStatus::Approved)
            .unwrap();

        let mut server = app(2, ApplicationStatus::Approved);
        server.updated_at = Some(now());
        assert_eq!(store.finish_status_change(change, Ok(server)), None);

        let updated = store.get(2).unwrap();
        assert_eq!(updated.status, ApplicationStatus::Approved);
        assert_eq!(updated.updated_at, Some(now()));
        assert_eq!(store.get(1).unwrap().status, ApplicationStatus::Pending);
    }

    #[test]
    fn rollback_restores_whole_list() {
        let mut store = store(vec![app(1, ApplicationStatus::Pending), app(2, ApplicationStatus::Pending)]);
        let change = store
            .begin_status_change(1, ApplicationStatus::Approved)
            .unwrap();
        // A created application lands while the request is pending.
        store.insert_created(app(9, ApplicationStatus::Pending));
        store.finish_status_change(change, Err(ApiError::Transport("offline".into())));
        let ids: Vec<i64> = store.items.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn illegal_moves_are_refused_without_side_effects() {
        let mut store = store(vec![app(1, ApplicationStatus::Approved), app(2, ApplicationStatus::Pending)]);
        let before = store.items.clone();

        assert_eq!(
            store.begin_status_change(1, ApplicationStatus::Rejected).unwrap_err(),
            TransitionError::NotPending(ApplicationStatus::Approved)
        );
        assert_eq!(
            store.begin_status_change(2, ApplicationStatus::Withdrawn).unwrap_err(),
            TransitionError::Unsupported(ApplicationStatus::Withdrawn)
        );
        assert_eq!(
            store.begin_status_change(2, ApplicationStatus::Hold).unwrap_err(),
            TransitionError::Unsupported(ApplicationStatus::Hold)
        );
        assert_eq!(
            store.begin_status_change(7, ApplicationStatus::Approved).unwrap_err(),
            TransitionError::Unknown(7)
        );
        assert_eq!(store.items, before);
    }

    #[test]
    fn pages_of_eight_newest_first() {
        let items: Vec<Application> = (1..=19).map(|i| app(i, ApplicationStatus::Pending)).collect();
        let mut store = store(items);
        assert_eq!(store.page_count(now()), 3);
        assert_eq!(store.page(now())[0].id, 1);

        store.go_to_page(3, now());
        assert_eq!(store.page(now()).len(), 3);

        store.set_sort(SortOrder::Oldest);
        store.go_to_page(1, now());
        assert_eq!(store.page(now())[0].id, 19);

        store.go_to_page(2, now());
        store.update_filter(|f| f.status = Some(ApplicationStatus::Pending));
        assert_eq!(store.pager.page, 1);
    }

    #[test]
    fn approving_last_row_of_filtered_page_steps_back() {
        let items: Vec<Application> = (1..=9).map(|i| app(i, ApplicationStatus::Pending)).collect();
        let mut store = store(items);
        store.update_filter(|f| f.status = Some(ApplicationStatus::Pending));
        store.go_to_page(2, now());
        assert_eq!(store.page(now())[0].id, 9);

        let change = store
            .begin_status_change(9, ApplicationStatus::Approved)
            .unwrap();
        assert_eq!(store.pager.page, 1);
        assert_eq!(store.page_count(now()), 1);
        assert_eq!(store.page(now()).len(), 8);

        assert_eq!(store.finish_status_change(change, Ok(app(9, ApplicationStatus::Approved))), None);
        assert_eq!(store.pager.page, 1);
        assert_eq!(store.current_page(now()), 1);
    }

    #[test]
    fn reload_under_filter_clamps_to_filtered_pages() {
        let items: Vec<Application> = (1..=9).map(|i| app(i, ApplicationStatus::Pending)).collect();
        let mut store = store(items);
        store.update_filter(|f| f.status = Some(ApplicationStatus::Pending));
        store.go_to_page(2, now());
        assert_eq!(store.pager.page, 2);

        let mut items: Vec<Application> = (1..=3).map(|i| app(i, ApplicationStatus::Pending)).collect();
        items.extend((4..=12).map(|i| app(i, ApplicationStatus::Rejected)));
        store.loaded(items);
        assert_eq!(store.pager.page, 1);
        assert_eq!(store.page(now()).len(), 3);
    }

    #[test]
    fn change_from_a_closed_list_leaves_new_list_alone() {
        let mut reviews = store(vec![app(1, ApplicationStatus::Pending)]);
        let change = reviews
            .begin_status_change(1, ApplicationStatus::Rejected)
            .unwrap();

        let mut mine = ApplicantsStore::new(ApplicantScope::Mine);
        mine.loaded(vec![app(50, ApplicationStatus::Pending), app(51, ApplicationStatus::Approved)]);

        let alert = mine.finish_status_change(change, Err(ApiError::Transport("offline".into())));
        assert!(alert.is_some());
        let ids: Vec<i64> = mine.items.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![50, 51]);
        assert_eq!(mine.get(50).unwrap().status, ApplicationStatus::Pending);
    }

    #[test]
    fn reopened_list_ignores_older_change() {
        let scope = ApplicantScope::Target(ApplicationKind::Project, 3);
        let mut first = store(vec![app(1, ApplicationStatus::Pending)]);
        let change = first
            .begin_status_change(1, ApplicationStatus::Approved)
            .unwrap();
        assert_eq!(change.scope, scope);

        let mut again = store(vec![app(1, ApplicationStatus::Pending), app(2, ApplicationStatus::Pending)]);
        let alert = again.finish_status_change(change, Err(ApiError::Transport("offline".into())));
        assert!(alert.is_some());
        let ids: Vec<i64> = again.items.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
