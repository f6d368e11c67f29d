use cosmic::widget::{button, container, text};
use cosmic::{Element, theme};

use crate::message::Message;

/// Render a read-only tag chip (themes, tech stack, skills).
pub fn tag_chip(tag: &str) -> Element<'static, Message> {
    container(text::caption(tag.to_string()).size(11.0))
        .padding([2, 8])
        .class(theme::Container::Card)
        .into()
}

/// A chip that toggles a filter value.
pub fn toggle_chip(tag: &str, active: bool, on_press: Message) -> Element<'static, Message> {
    let class = if active {
        theme::Button::Suggested
    } else {
        theme::Button::Text
    };
    button::custom(text::caption(tag.to_string()).size(11.0))
        .padding([2, 8])
        .class(class)
        .on_press(on_press)
        .into()
}

/// A chip with a remove button, used while editing skill and role lists.
pub fn removable_chip(tag: &str, on_remove: Message) -> Element<'static, Message> {
    button::custom(text::caption(format!("{}  ×", tag)).size(11.0))
        .padding([2, 8])
        .class(theme::Button::Standard)
        .on_press(on_remove)
        .into()
}
