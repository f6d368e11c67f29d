use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text, text_input};
use cosmic::Element;

use crate::config::TeamUpConfig;
use crate::message::Message;

pub fn settings_view<'a>(config: &'a TeamUpConfig, api_url_input: &'a str) -> Element<'a, Message> {
    let mut content = column().spacing(12);

    // --- Server ---
    content = content.push(text::title4(crate::fl!("settings-server")));
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                text_input::text_input(crate::api::DEFAULT_BASE_URL, api_url_input)
                    .on_input(Message::ApiUrlInput)
                    .on_submit(|_| Message::ApplyApiUrl)
                    .width(Length::Fill),
            )
            .push(button::standard(crate::fl!("settings-apply")).on_press(Message::ApplyApiUrl)),
    );
    content = content.push(text::caption(crate::fl!(
        "settings-current-server",
        url = config.base_url()
    )));
    content = content.push(text::caption(crate::fl!("settings-server-hint")));

    // --- Debug logging ---
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(crate::fl!("settings-debug-logging")).width(Length::Fill))
            .push(
                cosmic::widget::toggler(config.debug_logging)
                    .on_toggle(|_| Message::ToggleDebugLogging),
            ),
    );
    content = content.push(text::caption("journalctl --user -t teamup -f"));

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
