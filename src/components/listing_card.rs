use chrono::{DateTime, Utc};

use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, flex_row, icon, row, text};
use cosmic::{Element, theme};

use super::{labels, status_badge};
use super::tag_chip::tag_chip;
use crate::core::application::ApplicationKind;
use crate::core::listing::Listing;
use crate::message::{Message, View};
use crate::store::listings::JoinState;

const CARD_WIDTH: f32 = 320.0;
const SUMMARY_CHARS: usize = 140;

pub fn details_view(kind: ApplicationKind, id: i64) -> View {
    match kind {
        ApplicationKind::Project => View::ProjectDetails(id),
        ApplicationKind::Hackathon => View::HackathonDetails(id),
    }
}

fn summary(description: &str) -> String {
    if description.chars().count() <= SUMMARY_CHARS {
        description.to_string()
    } else {
        let cut: String = description.chars().take(SUMMARY_CHARS).collect();
        format!("{}…", cut.trim_end())
    }
}

pub fn join_button(kind: ApplicationKind, id: i64, state: JoinState) -> Option<Element<'static, Message>> {
    match state {
        JoinState::Hidden => None,
        JoinState::Join => Some(
            button::suggested(labels::join_state(state))
                .on_press(Message::Join(kind, id))
                .into(),
        ),
        JoinState::Applied | JoinState::Joined => Some(button::standard(labels::join_state(state)).into()),
    }
}

/// One project or hackathon in a listing grid.
pub fn listing_card<L: Listing>(
    item: &L,
    join: JoinState,
    can_delete: bool,
    now: DateTime<Utc>,
) -> Element<'static, Message> {
    let kind = L::KIND;
    let mut col = column().spacing(6);

    col = col.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                button::text(item.title().to_string())
                    .on_press(Message::Open(details_view(kind, item.id())))
                    .width(Length::Fill),
            )
            .push(status_badge::listing_status(item.status_label(now))),
    );

    if !item.description().is_empty() {
        col = col.push(text::body(summary(item.description())));
    }

    let tags: Vec<Element<'static, Message>> = item.tags().iter().map(|t| tag_chip(t)).collect();
    if !tags.is_empty() {
        col = col.push(flex_row(tags).row_spacing(4).column_spacing(4));
    }

    col = col.push(text::caption(format!("{} · {}", item.format(), item.location())));

    let mut actions = row().spacing(8).align_y(Alignment::Center);
    if let Some(btn) = join_button(kind, item.id(), join) {
        actions = actions.push(btn);
    }
    actions = actions.push(cosmic::widget::horizontal_space());
    if can_delete {
        actions = actions.push(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::DeleteListing(kind, item.id())),
        );
    }
    col = col.push(actions);

    container(col)
        .padding(12)
        .width(Length::Fixed(CARD_WIDTH))
        .class(theme::Container::Card)
        .into()
}
