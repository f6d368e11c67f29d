use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, text};
use cosmic::{Element, theme};

use crate::core::task::Task;
use crate::message::Message;

/// A card on the task board: title, details, and arrows to move between columns.
pub fn task_card(task: &Task, assignee: Option<String>) -> Element<'static, Message> {
    let mut col = column().spacing(4);
    col = col.push(text::body(task.title.clone()));

    if let Some(ref desc) = task.description {
        if !desc.is_empty() {
            col = col.push(text::caption(desc.clone()));
        }
    }
    if let Some(name) = assignee {
        col = col.push(
            row()
                .spacing(4)
                .align_y(Alignment::Center)
                .push(icon::from_name("avatar-default-symbolic").size(12).icon())
                .push(text::caption(name).size(11.0)),
        );
    }
    if let Some(due) = task.due_date {
        col = col.push(text::caption(format!("Due {}", due.format("%Y-%m-%d"))).size(11.0));
    }

    let prev = button::icon(icon::from_name("go-previous-symbolic"))
        .on_press_maybe(task.status.prev().map(|s| Message::MoveTask(task.id, s)));
    let next = button::icon(icon::from_name("go-next-symbolic"))
        .on_press_maybe(task.status.next().map(|s| Message::MoveTask(task.id, s)));

    col = col.push(
        row()
            .spacing(4)
            .align_y(Alignment::Center)
            .push(prev)
            .push(next)
            .push(cosmic::widget::horizontal_space())
            .push(
                button::icon(icon::from_name("edit-delete-symbolic"))
                    .on_press(Message::DeleteTask(task.id)),
            ),
    );

    container(col)
        .padding(8)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}
