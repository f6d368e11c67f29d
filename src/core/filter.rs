use chrono::{DateTime, Duration, Utc};

use super::application::{Application, ApplicationStatus};
use super::listing::Listing;

pub const APPLICANTS_PER_PAGE: usize = 8;
pub const LISTINGS_PER_PAGE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

/// Submitted-within cutoff for the applicants list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    #[default]
    All,
    Days(u32),
}

impl DateWindow {
    pub const ALL: &'static [DateWindow] = &[
        DateWindow::All,
        DateWindow::Days(7),
        DateWindow::Days(14),
        DateWindow::Days(30),
    ];

    /// Records without a date are never cut off.
    pub fn contains(&self, at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match (self, at) {
            (Self::All, _) | (_, None) => true,
            (Self::Days(n), Some(at)) => now - at <= Duration::days(i64::from(*n)),
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicantFilter {
    pub search: String,
    pub role: String,
    pub skill: String,
    pub status: Option<ApplicationStatus>,
    pub window: DateWindow,
}

impl ApplicantFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Role and skill checks are skipped for applicants the server sent
    /// without that information.
    pub fn matches(&self, app: &Application, now: DateTime<Utc>) -> bool {
        if let Some(status) = self.status {
            if app.status != status {
                return false;
            }
        }

        let role = self.role.trim().to_lowercase();
        if !role.is_empty() {
            if let Some(r) = app.applicant_role() {
                if !contains_ci(r, &role) {
                    return false;
                }
            }
        }

        let skill = self.skill.trim().to_lowercase();
        if !skill.is_empty() && app.applicant.is_some() {
            if !app.applicant_skills().iter().any(|s| contains_ci(s, &skill)) {
                return false;
            }
        }

        if !self.window.contains(app.applied_at(), now) {
            return false;
        }

        let q = self.search.trim().to_lowercase();
        if !q.is_empty() {
            let hit = app.applicant_name().is_some_and(|s| contains_ci(s, &q))
                || app.applicant_email().is_some_and(|s| contains_ci(s, &q))
                || app.target_title().is_some_and(|s| contains_ci(s, &q))
                || app.applicant_skills().iter().any(|s| contains_ci(s, &q));
            if !hit {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, apps: &'a [Application], now: DateTime<Utc>) -> Vec<&'a Application> {
        apps.iter().filter(|a| self.matches(a, now)).collect()
    }
}

/// Stable sort on the submission date; undated records count as oldest.
pub fn sort_by_date(apps: &mut [&Application], order: SortOrder) {
    match order {
        SortOrder::Newest => apps.sort_by(|a, b| b.applied_at().cmp(&a.applied_at())),
        SortOrder::Oldest => apps.sort_by(|a, b| a.applied_at().cmp(&b.applied_at())),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    pub search: String,
    /// `None` shows every status.
    pub status: Option<String>,
    /// Any-of match against the listing's tags.
    pub themes: Vec<String>,
    pub format: Option<String>,
    pub location: String,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn toggle_theme(&mut self, theme: &str) {
        if let Some(idx) = self.themes.iter().position(|t| t == theme) {
            self.themes.remove(idx);
        } else {
            self.themes.push(theme.to_string());
        }
    }

    pub fn matches<L: Listing>(&self, item: &L, now: DateTime<Utc>) -> bool {
        let q = self.search.trim().to_lowercase();
        if !q.is_empty() && !contains_ci(item.title(), &q) && !contains_ci(item.description(), &q) {
            return false;
        }
        if let Some(ref status) = self.status {
            if item.status_label(now) != *status {
                return false;
            }
        }
        if !self.themes.is_empty() && !self.themes.iter().any(|t| item.tags().contains(t)) {
            return false;
        }
        if let Some(ref format) = self.format {
            if item.format() != format {
                return false;
            }
        }
        let loc = self.location.trim().to_lowercase();
        if !loc.is_empty() && !contains_ci(item.location(), &loc) {
            return false;
        }
        true
    }

    pub fn apply<'a, L: Listing>(&self, items: &'a [L], now: DateTime<Utc>) -> Vec<&'a L> {
        items.iter().filter(|i| self.matches(*i, now)).collect()
    }
}

/// Every tag across the listings, first-seen order, no duplicates.
pub fn all_tags<L: Listing>(items: &[L]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for item in items {
        for tag in item.tags() {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}

pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Keep a 1-based page inside `1..=page_count`, or 1 when the list is empty.
pub fn clamp_page(page: usize, len: usize, per_page: usize) -> usize {
    page.clamp(1, page_count(len, per_page).max(1))
}

/// Slice out 1-based page `page`. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

/// Current page plus the filter that produced it. Changing the filter goes back to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Pager<F> {
    pub filter: F,
    pub page: usize,
    pub per_page: usize,
}

impl<F: PartialEq> Pager<F> {
    pub fn new(filter: F, per_page: usize) -> Self {
        Self {
            filter,
            page: 1,
            per_page,
        }
    }

    pub fn set_filter(&mut self, filter: F) {
        if self.filter != filter {
            self.filter = filter;
            self.page = 1;
        }
    }

    pub fn update_filter(&mut self, f: impl FnOnce(&mut F))
    where
        F: Clone,
    {
        let mut next = self.filter.clone();
        f(&mut next);
        self.set_filter(next);
    }

    pub fn go_to(&mut self, page: usize, len: usize) {
        self.page = clamp_page(page, len, self.per_page);
    }

    /// Pull the page back inside range after the list shrank.
    pub fn settle(&mut self, len: usize) {
        self.page = clamp_page(self.page, len, self.per_page);
    }

    /// The stored page, clamped to the list actually shown.
    pub fn current(&self, len: usize) -> usize {
        clamp_page(self.page, len, self.per_page)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.current(items.len()), self.per_page)
    }

    pub fn pages(&self, len: usize) -> usize {
        page_count(len, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::application::{ApplicantSummary, ApplicationKind, TargetSummary};
    use crate::core::project::Project;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap()
    }

    fn app(id: i64, status: ApplicationStatus, name: &str, days_ago: Option<i64>) -> Application {
        Application {
            id,
            kind: ApplicationKind::Project,
            target_id: 1,
            applicant_id: Some(id * 10),
            status,
            message: None,
            created_at: days_ago.map(|d| now() - Duration::days(d)),
            updated_at: None,
            applicant: Some(ApplicantSummary {
                id: id * 10,
                name: name.to_string(),
                email: Some(format!("{}@uni.edu", name.to_lowercase())),
                role: Some("student".to_string()),
                skills: vec!["Rust".to_string(), "SQL".to_string()],
                avatar_url: None,
            }),
            project: Some(TargetSummary {
                id: 1,
                title: "Campus Map".to_string(),
                created_by: Some(3),
            }),
            hackathon: None,
        }
    }

    fn project(id: i64, title: &str, tags: &[&str], format: &str, location: &str) -> Project {
        Project {
            id,
            title: title.to_string(),
            description: String::new(),
            created_by: 1,
            status: "recruiting".to_string(),
            tech_stack: Vec::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            progress_percent: 0.0,
            prize: None,
            deadline: None,
            max_participants: None,
            format: format.to_string(),
            location: location.to_string(),
            applicants: 0,
            created_at: None,
        }
    }

    #[test]
    fn search_covers_name_email_title_and_skills() {
        let apps = vec![app(1, ApplicationStatus::Pending, "Ada", Some(1))];
        for q in ["ada", "UNI.EDU", "campus", "sql"] {
            let f = ApplicantFilter {
                search: q.to_string(),
                ..Default::default()
            };
            assert_eq!(f.apply(&apps, now()).len(), 1, "query {}", q);
        }
        let f = ApplicantFilter {
            search: "haskell".into(),
            ..Default::default()
        };
        assert!(f.apply(&apps, now()).is_empty());
    }

    #[test]
    fn date_window_cuts_off_old_and_keeps_undated() {
        let apps = vec![
            app(1, ApplicationStatus::Pending, "A", Some(3)),
            app(2, ApplicationStatus::Pending, "B", Some(10)),
            app(3, ApplicationStatus::Pending, "C", None),
        ];
        let f = ApplicantFilter {
            window: DateWindow::Days(7),
            ..Default::default()
        };
        let ids: Vec<i64> = f.apply(&apps, now()).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn status_and_role_filters() {
        let mut mentor = app(2, ApplicationStatus::Approved, "B", Some(1));
        if let Some(ref mut a) = mentor.applicant {
            a.role = Some("mentor".into());
        }
        let apps = vec![app(1, ApplicationStatus::Pending, "A", Some(1)), mentor];
        let f = ApplicantFilter {
            status: Some(ApplicationStatus::Approved),
            ..Default::default()
        };
        assert_eq!(f.apply(&apps, now())[0].id, 2);
        let f = ApplicantFilter {
            role: "ment".into(),
            ..Default::default()
        };
        assert_eq!(f.apply(&apps, now()).len(), 1);
    }

    #[test]
    fn sort_newest_and_oldest() {
        let apps = vec![
            app(1, ApplicationStatus::Pending, "A", Some(5)),
            app(2, ApplicationStatus::Pending, "B", Some(1)),
            app(3, ApplicationStatus::Pending, "C", None),
        ];
        let mut v: Vec<&Application> = apps.iter().collect();
        sort_by_date(&mut v, SortOrder::Newest);
        assert_eq!(v.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2, 1, 3]);
        sort_by_date(&mut v, SortOrder::Oldest);
        assert_eq!(v.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn listing_filters() {
        let items = vec![
            project(1, "Campus Map", &["AI", "Mobile"], "online", "TBA"),
            project(2, "Health Tracker", &["Health"], "offline", "San Francisco, CA"),
        ];
        let mut f = ListingFilter::default();
        f.toggle_theme("Health");
        f.toggle_theme("Mobile");
        assert_eq!(f.apply(&items, now()).len(), 2);
        f.toggle_theme("Mobile");
        assert_eq!(f.apply(&items, now())[0].id, 2);

        let f = ListingFilter {
            format: Some("online".into()),
            ..Default::default()
        };
        assert_eq!(f.apply(&items, now())[0].id, 1);

        let f = ListingFilter {
            location: "francisco".into(),
            ..Default::default()
        };
        assert_eq!(f.apply(&items, now())[0].id, 2);

        assert_eq!(all_tags(&items), vec!["AI", "Mobile", "Health"]);
    }

    #[test]
    fn pagination_edges() {
        let items: Vec<u32> = (0..17).collect();
        assert_eq!(page_count(17, 8), 3);
        assert_eq!(page_count(0, 8), 0);
        assert_eq!(paginate(&items, 3, 8), &[16]);
        assert!(paginate(&items, 4, 8).is_empty());
        assert!(paginate(&items, 0, 8).is_empty());
        assert_eq!(clamp_page(9, 17, 8), 3);
        assert_eq!(clamp_page(5, 0, 8), 1);
    }

    #[test]
    fn pager_resets_on_filter_change() {
        let mut pager = Pager::new(ApplicantFilter::default(), APPLICANTS_PER_PAGE);
        pager.go_to(3, 40);
        assert_eq!(pager.page, 3);
        pager.update_filter(|f| f.search = "x".into());
        assert_eq!(pager.page, 1);
        pager.go_to(2, 40);
        pager.update_filter(|f| f.search = "x".into());
        assert_eq!(pager.page, 2);
        pager.settle(5);
        assert_eq!(pager.page, 1);
    }

    #[test]
    fn stale_page_reads_as_last_page() {
        let mut pager = Pager::new(ApplicantFilter::default(), APPLICANTS_PER_PAGE);
        pager.go_to(2, 9);
        let shown: Vec<u32> = (0..8).collect();
        assert_eq!(pager.current(shown.len()), 1);
        assert_eq!(pager.slice(&shown).len(), 8);
    }

    fn arb_status() -> impl Strategy<Value = ApplicationStatus> {
        prop::sample::select(ApplicationStatus::ALL.to_vec())
    }

    prop_compose! {
        fn arb_app()(
            id in 0i64..1000,
            status in arb_status(),
            name in "[A-Za-z]{1,8}",
            days in prop::option::of(0i64..60),
        ) -> Application {
            app(id, status, &name, days)
        }
    }

    prop_compose! {
        fn arb_filter()(
            search in "[a-z]{0,2}",
            status in prop::option::of(arb_status()),
            window in prop::sample::select(DateWindow::ALL.to_vec()),
        ) -> ApplicantFilter {
            ApplicantFilter { search, status, window, ..Default::default() }
        }
    }

    proptest! {
        #[test]
        fn pages_concatenate_to_whole_list(len in 0usize..100, per_page in 1usize..20) {
            let items: Vec<usize> = (0..len).collect();
            let pages = page_count(len, per_page);
            let joined: Vec<usize> = (1..=pages)
                .flat_map(|p| paginate(&items, p, per_page).to_vec())
                .collect();
            prop_assert_eq!(&joined, &items);
            prop_assert!(paginate(&items, pages + 1, per_page).is_empty());
        }

        #[test]
        fn filtering_is_idempotent(
            apps in prop::collection::vec(arb_app(), 0..30),
            filter in arb_filter(),
        ) {
            let once: Vec<Application> = filter.apply(&apps, now()).into_iter().cloned().collect();
            let twice: Vec<Application> = filter.apply(&once, now()).into_iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }
    }
}
