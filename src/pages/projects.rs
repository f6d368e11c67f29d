use chrono::{DateTime, Utc};

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, flex_row, icon, row, scrollable, text, text_input};
use cosmic::Element;

use crate::components::listing_card::listing_card;
use crate::components::listing_filters::listing_filters;
use crate::components::pagination::pagination;
use crate::components::tag_chip::removable_chip;
use crate::core::application::ApplicationKind;
use crate::core::listing::Listing;
use crate::core::project::{Project, ProjectForm};
use crate::fl;
use crate::message::{Message, ProjectField};
use crate::session::Session;
use crate::store::listings::ListingStore;

/// Distinct values in first-seen order.
pub(crate) fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for v in values {
        if !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}

pub fn projects_view<'a>(
    store: &'a ListingStore<Project>,
    session: &'a Session,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let mut content = column().spacing(16);

    let mut header = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(text::title3(fl!("page-projects")).width(Length::Fill));
    if session.can_create_listings() {
        header = header.push(
            button::suggested(fl!("projects-new"))
                .on_press(Message::OpenCreate(ApplicationKind::Project)),
        );
    }
    content = content.push(header);

    let statuses = distinct(store.items.iter().map(|p| p.status.as_str()));
    let formats = distinct(store.items.iter().map(|p| p.format()));
    content = content.push(listing_filters(
        ApplicationKind::Project,
        &store.pager.filter,
        statuses,
        formats,
        store.themes(),
    ));

    if store.loading {
        content = content.push(text::body(fl!("loading")));
    } else {
        let page = store.page(now);
        if page.is_empty() {
            content = content.push(
                container(text::body(fl!("projects-empty")))
                    .padding(32)
                    .center_x(Length::Fill)
                    .width(Length::Fill),
            );
        } else {
            let cards: Vec<Element<'static, Message>> = page
                .into_iter()
                .map(|p| {
                    listing_card(
                        p,
                        store.join_state(p, session),
                        session.can_delete_listing(p.created_by),
                        now,
                    )
                })
                .collect();
            content = content.push(flex_row(cards).row_spacing(12).column_spacing(12));
        }
        content = content.push(pagination(store.current_page(now), store.page_count(now), |p| {
            Message::ListingPage(ApplicationKind::Project, p)
        }));
    }

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Create-project form shown in the context drawer.
pub fn project_form_view<'a>(form: &'a ProjectForm, error: Option<&'a str>) -> Element<'a, Message> {
    let input = |placeholder: String, value: &'a str, field: ProjectField| {
        text_input::text_input(placeholder, value)
            .on_input(move |v| Message::ProjectInput(field, v))
            .width(Length::Fill)
    };

    let mut content = column().spacing(12);

    content = content.push(text::title4(fl!("form-title")));
    content = content.push(input(fl!("projects-title-placeholder"), &form.title, ProjectField::Title));

    content = content.push(text::title4(fl!("form-description")));
    content = content.push(input(fl!("form-description"), &form.description, ProjectField::Description));

    content = content.push(text::title4(fl!("projects-roles")));
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                input(fl!("projects-role-placeholder"), &form.role_input, ProjectField::Role)
                    .on_submit(|_| Message::AddProjectRole),
            )
            .push(button::icon(icon::from_name("list-add-symbolic")).on_press(Message::AddProjectRole)),
    );
    if !form.roles.is_empty() {
        let chips: Vec<Element<'static, Message>> = form
            .roles
            .iter()
            .enumerate()
            .map(|(idx, r)| removable_chip(r, Message::RemoveProjectRole(idx)))
            .collect();
        content = content.push(flex_row(chips).row_spacing(4).column_spacing(4));
    }

    content = content.push(text::title4(fl!("form-prize")));
    content = content.push(input(fl!("form-optional"), &form.prize, ProjectField::Prize));
    content = content.push(text::title4(fl!("projects-deadline")));
    content = content.push(input("YYYY-MM-DD".to_string(), &form.deadline, ProjectField::Deadline));
    content = content.push(text::title4(fl!("form-max-participants")));
    content = content.push(input(fl!("form-optional"), &form.max_participants, ProjectField::MaxParticipants));

    if let Some(err) = error {
        content = content.push(text::caption(err));
    }

    content = content.push(
        button::suggested(fl!("projects-create"))
            .on_press(Message::SubmitProject)
            .width(Length::Fill),
    );

    content.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_keeps_first_seen_order() {
        let v = ["online", "offline", "online", "hybrid"];
        assert_eq!(distinct(v.into_iter()), vec!["online", "offline", "hybrid"]);
    }
}
