use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, scrollable, text};
use cosmic::{Element, theme};

use crate::core::notification::Notification;
use crate::fl;
use crate::message::Message;

pub fn notifications_view<'a>(items: &'a [Notification], loading: bool) -> Element<'a, Message> {
    let mut content = column().spacing(8);

    let unread = items.iter().filter(|n| !n.is_read).count();
    content = content.push(text::title4(fl!("notifications-unread", count = unread.to_string())));

    if loading {
        content = content.push(text::body(fl!("loading")));
    } else if items.is_empty() {
        content = content.push(
            container(text::body(fl!("notifications-empty")))
                .padding(32)
                .center_x(Length::Fill)
                .width(Length::Fill),
        );
    }

    for n in items {
        let icon_name = if n.is_read {
            "mail-read-symbolic"
        } else {
            "mail-unread-symbolic"
        };
        let mut line = row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(icon::from_name(icon_name).size(16).icon())
            .push(
                column()
                    .spacing(2)
                    .push(text::body(n.summary()))
                    .push(text::caption(n.created_at.format("%Y-%m-%d %H:%M").to_string()))
                    .width(Length::Fill),
            );
        if !n.is_read {
            line = line.push(button::standard(fl!("notifications-mark-read")).on_press(Message::MarkRead(n.id)));
        }
        content = content.push(
            container(line)
                .padding(8)
                .width(Length::Fill)
                .class(theme::Container::Card),
        );
    }

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
