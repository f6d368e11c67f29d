use chrono::{DateTime, Utc};

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, dropdown, flex_row, row, scrollable, text, text_input};
use cosmic::{Element, theme};

use crate::components::pagination::pagination;
use crate::components::{labels, status_badge};
use crate::components::tag_chip::tag_chip;
use crate::core::application::{Application, ApplicationKind, ApplicationStatus, DEFAULT_APPLICATION_MESSAGE};
use crate::core::filter::{DateWindow, SortOrder};
use crate::fl;
use crate::message::{ApplicantFilterChange, Message};
use crate::session::Session;
use crate::store::applicants::{ApplicantScope, ApplicantsStore};

/// Draft of a new application.
#[derive(Debug, Clone)]
pub struct ApplyForm {
    pub kind: ApplicationKind,
    pub target: Option<i64>,
    pub message: String,
}

impl Default for ApplyForm {
    fn default() -> Self {
        Self {
            kind: ApplicationKind::Project,
            target: None,
            message: String::new(),
        }
    }
}

fn filters<'a>(store: &'a ApplicantsStore) -> Element<'a, Message> {
    let f = &store.pager.filter;
    let change = |c: ApplicantFilterChange| Message::ApplicantFilter(c);

    let status_labels: Vec<String> = std::iter::once(fl!("filter-any-status"))
        .chain(ApplicationStatus::ALL.iter().map(|s| labels::application_status(*s)))
        .collect();
    let status_selected = match f.status {
        None => Some(0),
        Some(s) => ApplicationStatus::ALL.iter().position(|x| *x == s).map(|i| i + 1),
    };

    let window_labels: Vec<String> = DateWindow::ALL.iter().map(|w| labels::date_window(*w)).collect();
    let window_selected = DateWindow::ALL.iter().position(|w| *w == f.window);

    let sorts = [SortOrder::Newest, SortOrder::Oldest];
    let sort_labels: Vec<String> = sorts.iter().map(|s| labels::sort_order(*s)).collect();
    let sort_selected = sorts.iter().position(|s| *s == store.sort);

    let mut top = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(
            text_input::search_input(fl!("applicants-search"), f.search.as_str())
                .on_input(move |v| change(ApplicantFilterChange::Search(v)))
                .width(Length::Fill),
        )
        .push(
            text_input::text_input(fl!("applicants-role"), f.role.as_str())
                .on_input(move |v| change(ApplicantFilterChange::Role(v)))
                .width(Length::Fixed(120.0)),
        )
        .push(
            text_input::text_input(fl!("applicants-skill"), f.skill.as_str())
                .on_input(move |v| change(ApplicantFilterChange::Skill(v)))
                .width(Length::Fixed(120.0)),
        );
    if !f.is_empty() {
        top = top.push(button::text(fl!("filter-clear")).on_press(change(ApplicantFilterChange::Clear)));
    }

    let bottom = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(
            dropdown(status_labels, status_selected, move |idx| {
                let status = idx.checked_sub(1).and_then(|i| ApplicationStatus::ALL.get(i).copied());
                Message::ApplicantFilter(ApplicantFilterChange::Status(status))
            })
            .width(Length::Shrink),
        )
        .push(
            dropdown(window_labels, window_selected, |idx| {
                let window = DateWindow::ALL.get(idx).copied().unwrap_or_default();
                Message::ApplicantFilter(ApplicantFilterChange::Window(window))
            })
            .width(Length::Shrink),
        )
        .push(
            dropdown(sort_labels, sort_selected, move |idx| {
                Message::ApplicantSort(sorts.get(idx).copied().unwrap_or_default())
            })
            .width(Length::Shrink),
        );

    column().spacing(8).push(top).push(bottom).into()
}

fn application_row<'a>(app: &'a Application, can_review: bool) -> Element<'a, Message> {
    let mut info = column().spacing(2).width(Length::Fill);

    let who = match (app.applicant_name(), app.applicant_id) {
        (Some(name), _) => name.to_string(),
        (None, Some(id)) => format!("User #{}", id),
        (None, None) => fl!("applicants-unknown"),
    };
    let mut title = who;
    if let Some(email) = app.applicant_email() {
        title = format!("{} <{}>", title, email);
    }
    info = info.push(text::body(title));

    let target = app
        .target_title()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} #{}", app.kind.as_str(), app.target_id));
    let when = app
        .applied_at()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    info = info.push(text::caption(format!("{} · {} {}", target, app.kind.as_str(), when)));

    if let Some(ref msg) = app.message {
        info = info.push(text::caption(msg.clone()));
    }
    if !app.applicant_skills().is_empty() {
        let chips: Vec<Element<'static, Message>> = app.applicant_skills().iter().map(|s| tag_chip(s)).collect();
        info = info.push(flex_row(chips).row_spacing(4).column_spacing(4));
    }

    let mut line = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(info)
        .push(status_badge::application_status(app.status));

    if can_review && app.status == ApplicationStatus::Pending {
        line = line
            .push(
                button::suggested(fl!("applicants-approve"))
                    .on_press(Message::SetApplicationStatus(app.id, ApplicationStatus::Approved)),
            )
            .push(
                button::destructive(fl!("applicants-reject"))
                    .on_press(Message::SetApplicationStatus(app.id, ApplicationStatus::Rejected)),
            );
    }

    container(line)
        .padding(8)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}

/// `target_owner` is the owner of the listing under review, when known.
pub fn applicants_view<'a>(
    store: &'a ApplicantsStore,
    session: &'a Session,
    target_owner: Option<i64>,
    heading: String,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let mut content = column().spacing(16);

    let mut header = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(text::title3(heading).width(Length::Fill));
    if store.scope == ApplicantScope::Mine && session.can_apply() {
        header = header.push(button::suggested(fl!("applicants-new")).on_press(Message::OpenApplyForm));
    }
    if matches!(store.scope, ApplicantScope::Target(..)) {
        header = header.push(button::text(fl!("back")).on_press(Message::Back));
    }
    content = content.push(header);

    content = content.push(text::caption(fl!(
        "applicants-counts",
        pending = store.count_by_status(ApplicationStatus::Pending).to_string(),
        approved = store.count_by_status(ApplicationStatus::Approved).to_string(),
        rejected = store.count_by_status(ApplicationStatus::Rejected).to_string()
    )));
    content = content.push(filters(store));

    if store.loading {
        content = content.push(text::body(fl!("loading")));
    } else {
        let page = store.page(now);
        if page.is_empty() {
            content = content.push(
                container(text::body(fl!("applicants-empty")))
                    .padding(32)
                    .center_x(Length::Fill)
                    .width(Length::Fill),
            );
        }
        for app in page {
            let own = app.applicant_id.is_some() && app.applicant_id == session.user_id();
            let owner = app.target_owner().or(target_owner);
            content = content.push(application_row(app, !own && session.can_review(owner)));
        }
        content = content.push(pagination(store.current_page(now), store.page_count(now), Message::ApplicantPage));
    }

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// `targets` are (id, title) pairs of the chosen kind.
pub fn apply_form_view<'a>(
    form: &'a ApplyForm,
    targets: Vec<(i64, String)>,
    error: Option<&'a str>,
) -> Element<'a, Message> {
    let mut content = column().spacing(12);

    let kind_button = |kind: ApplicationKind, label: String| {
        if form.kind == kind {
            button::suggested(label).on_press(Message::ApplyKind(kind))
        } else {
            button::standard(label).on_press(Message::ApplyKind(kind))
        }
    };
    content = content.push(text::title4(fl!("apply-kind")));
    content = content.push(
        row()
            .spacing(4)
            .push(kind_button(ApplicationKind::Project, fl!("page-projects")))
            .push(kind_button(ApplicationKind::Hackathon, fl!("page-hackathons"))),
    );

    content = content.push(text::title4(fl!("apply-target")));
    if targets.is_empty() {
        content = content.push(text::caption(fl!("apply-no-targets")));
    } else {
        let selected = form.target.and_then(|t| targets.iter().position(|(id, _)| *id == t));
        let ids: Vec<i64> = targets.iter().map(|(id, _)| *id).collect();
        let labels: Vec<String> = targets.into_iter().map(|(_, title)| title).collect();
        content = content.push(
            dropdown(labels, selected, move |idx| Message::ApplyTarget(ids.get(idx).copied().unwrap_or_default()))
                .width(Length::Fill),
        );
    }

    content = content.push(text::title4(fl!("apply-message")));
    content = content.push(
        text_input::text_input(DEFAULT_APPLICATION_MESSAGE, form.message.as_str())
            .on_input(Message::ApplyMessage)
            .on_submit(|_| Message::SubmitApplication)
            .width(Length::Fill),
    );

    if let Some(err) = error {
        content = content.push(text::caption(err));
    }

    content = content.push(
        button::suggested(fl!("apply-submit"))
            .on_press_maybe(form.target.map(|_| Message::SubmitApplication))
            .width(Length::Fill),
    );

    content.into()
}
