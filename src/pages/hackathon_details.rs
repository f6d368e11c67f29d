use chrono::{DateTime, Utc};

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, flex_row, icon, row, scrollable, text};
use cosmic::Element;

use crate::components::listing_card::join_button;
use crate::components::{labels, status_badge};
use crate::components::tag_chip::tag_chip;
use crate::core::application::ApplicationKind;
use crate::core::hackathon::Hackathon;
use crate::fl;
use crate::message::{Message, View};
use crate::session::Session;
use crate::store::listings::JoinState;

pub fn hackathon_details_view<'a>(
    hackathon: Option<&'a Hackathon>,
    join: JoinState,
    session: &'a Session,
    now: DateTime<Utc>,
) -> Element<'a, Message> {
    let mut content = column().spacing(12);
    content = content.push(button::text(fl!("back-to-hackathons")).on_press(Message::Back));

    let Some(h) = hackathon else {
        content = content.push(text::body(fl!("loading")));
        return container(content.padding(16)).width(Length::Fill).into();
    };

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::title3(h.title.clone()).width(Length::Fill))
            .push(status_badge::listing_status(labels::phase(h.phase(now)))),
    );
    content = content.push(text::caption(format!(
        "{} – {}",
        h.start_at.format("%Y-%m-%d"),
        h.end_at.format("%Y-%m-%d")
    )));
    content = content.push(text::body(h.description.clone()));

    let chips: Vec<Element<'static, Message>> = h.tags.iter().map(|t| tag_chip(t)).collect();
    content = content.push(flex_row(chips).row_spacing(4).column_spacing(4));

    let mut facts = column().spacing(4);
    facts = facts.push(text::body(format!("{}: {} · {}", fl!("details-format"), h.format, h.location)));
    if let Some(ref prize) = h.prize {
        facts = facts.push(text::body(format!("{}: {}", fl!("form-prize"), prize)));
    }
    if let Some(max) = h.max_participants {
        facts = facts.push(text::body(format!("{}: {}", fl!("form-max-participants"), max)));
    }
    content = content.push(facts);

    let mut actions = row().spacing(8).align_y(Alignment::Center);
    if let Some(btn) = join_button(ApplicationKind::Hackathon, h.id, join) {
        actions = actions.push(btn);
    }
    if session.can_review(Some(h.created_by)) {
        actions = actions.push(
            button::standard(fl!("details-review-applications"))
                .on_press(Message::Open(View::Reviews(ApplicationKind::Hackathon, h.id))),
        );
    }
    if session.can_delete_listing(h.created_by) {
        actions = actions.push(cosmic::widget::horizontal_space());
        actions = actions.push(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::DeleteListing(ApplicationKind::Hackathon, h.id)),
        );
    }
    content = content.push(actions);

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
