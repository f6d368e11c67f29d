use chrono::{DateTime, Utc};

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, flex_row, row, scrollable, text, text_input};
use cosmic::Element;

use super::projects::distinct;
use crate::components::listing_card::listing_card;
use crate::components::listing_filters::listing_filters;
use crate::components::pagination::pagination;
use crate::core::application::ApplicationKind;
use crate::core::hackathon::{Hackathon, HackathonForm, Phase};
use crate::core::listing::Listing;
use crate::fl;
use crate::message::{HackathonField, Message};
use crate::session::Session;
use crate::store::listings::ListingStore;

pub fn hackathons_view<'a>(
    store: &'a ListingStore<Hackathon>,
    session: &'a Session,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let mut content = column().spacing(16);

    let mut header = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(text::title3(fl!("page-hackathons")).width(Length::Fill));
    if session.can_create_listings() {
        header = header.push(
            button::suggested(fl!("hackathons-new"))
                .on_press(Message::OpenCreate(ApplicationKind::Hackathon)),
        );
    }
    content = content.push(header);

    let phases = Phase::ALL.iter().map(|p| p.as_str().to_string()).collect();
    let formats = distinct(store.items.iter().map(|h| h.format()));
    content = content.push(listing_filters(
        ApplicationKind::Hackathon,
        &store.pager.filter,
        phases,
        formats,
        store.themes(),
    ));

    if store.loading {
        content = content.push(text::body(fl!("loading")));
    } else {
        let page = store.page(now);
        if page.is_empty() {
            content = content.push(
                container(text::body(fl!("hackathons-empty")))
                    .padding(32)
                    .center_x(Length::Fill)
                    .width(Length::Fill),
            );
        } else {
            let cards: Vec<Element<'static, Message>> = page
                .into_iter()
                .map(|h| {
                    listing_card(
                        h,
                        store.join_state(h, session),
                        session.can_delete_listing(h.created_by),
                        now,
                    )
                })
                .collect();
            content = content.push(flex_row(cards).row_spacing(12).column_spacing(12));
        }
        content = content.push(pagination(store.current_page(now), store.page_count(now), |p| {
            Message::ListingPage(ApplicationKind::Hackathon, p)
        }));
    }

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

pub fn hackathon_form_view<'a>(form: &'a HackathonForm, error: Option<&'a str>) -> Element<'a, Message> {
    let input = |placeholder: String, value: &'a str, field: HackathonField| {
        text_input::text_input(placeholder, value)
            .on_input(move |v| Message::HackathonInput(field, v))
            .width(Length::Fill)
    };

    let mut content = column().spacing(12);

    content = content.push(text::title4(fl!("form-title")));
    content = content.push(input(fl!("hackathons-title-placeholder"), &form.title, HackathonField::Title));
    content = content.push(text::title4(fl!("form-description")));
    content = content.push(input(fl!("form-description"), &form.description, HackathonField::Description));

    content = content.push(text::title4(fl!("hackathons-dates")));
    content = content.push(
        row()
            .spacing(8)
            .push(input(fl!("hackathons-start"), &form.start_date, HackathonField::StartDate))
            .push(input(fl!("hackathons-end"), &form.end_date, HackathonField::EndDate)),
    );

    content = content.push(text::title4(fl!("form-prize")));
    content = content.push(input(fl!("form-optional"), &form.prize, HackathonField::Prize));
    content = content.push(text::title4(fl!("form-max-participants")));
    content = content.push(input(fl!("form-optional"), &form.max_participants, HackathonField::MaxParticipants));
    content = content.push(text::title4(fl!("hackathons-format-location")));
    content = content.push(
        row()
            .spacing(8)
            .push(input("Online".to_string(), &form.format, HackathonField::Format))
            .push(input("TBA".to_string(), &form.location, HackathonField::Location)),
    );
    content = content.push(text::title4(fl!("hackathons-tags")));
    content = content.push(input(fl!("hackathons-tags-placeholder"), &form.tags, HackathonField::Tags));

    if let Some(err) = error {
        content = content.push(text::caption(err));
    }

    content = content.push(
        button::suggested(fl!("hackathons-create"))
            .on_press(Message::SubmitHackathon)
            .width(Length::Fill),
    );

    content.into()
}
