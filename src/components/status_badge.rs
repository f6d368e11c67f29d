use cosmic::iced::Alignment;
use cosmic::widget::{container, icon, row, text};
use cosmic::{Element, theme};

use crate::components::labels;
use crate::core::application::ApplicationStatus;
use crate::core::task::TaskStatus;
use crate::message::Message;

fn application_icon(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "content-loading-symbolic",
        ApplicationStatus::Approved => "emblem-ok-symbolic",
        ApplicationStatus::Rejected => "window-close-symbolic",
        ApplicationStatus::Hold => "media-playback-pause-symbolic",
        ApplicationStatus::Withdrawn => "edit-undo-symbolic",
    }
}

pub fn badge(icon_name: &'static str, label: String) -> Element<'static, Message> {
    container(
        row()
            .spacing(4)
            .align_y(Alignment::Center)
            .push(icon::from_name(icon_name).size(12).icon())
            .push(text::caption(label).size(11.0)),
    )
    .padding([2, 8])
    .class(theme::Container::Card)
    .into()
}

pub fn application_status(status: ApplicationStatus) -> Element<'static, Message> {
    badge(application_icon(status), labels::application_status(status))
}

pub fn task_status(status: TaskStatus) -> Element<'static, Message> {
    let icon_name = match status {
        TaskStatus::Todo => "object-select-symbolic",
        TaskStatus::InProgress => "media-playback-start-symbolic",
        TaskStatus::Done => "emblem-ok-symbolic",
    };
    badge(icon_name, labels::task_status(status))
}

/// Free-form status such as a project's `recruiting` or a hackathon phase.
pub fn listing_status(label: String) -> Element<'static, Message> {
    badge("dialog-information-symbolic", label)
}
