use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, container, icon, row, text};
use cosmic::Element;

use crate::fl;
use crate::message::Message;

/// Previous / "Page x of y" / next. Nothing is drawn for a single page.
pub fn pagination(
    page: usize,
    pages: usize,
    on_page: impl Fn(usize) -> Message,
) -> Element<'static, Message> {
    if pages <= 1 {
        return row().into();
    }

    let prev = button::icon(icon::from_name("go-previous-symbolic"))
        .on_press_maybe((page > 1).then(|| on_page(page - 1)));
    let next = button::icon(icon::from_name("go-next-symbolic"))
        .on_press_maybe((page < pages).then(|| on_page(page + 1)));

    container(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(prev)
            .push(text::body(fl!("page-of", page = page.to_string(), pages = pages.to_string())))
            .push(next),
    )
    .center_x(Length::Fill)
    .width(Length::Fill)
    .into()
}
