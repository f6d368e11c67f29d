use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, text, text_input};
use cosmic::Element;

use crate::fl;
use crate::message::{Message, Page, View};
use crate::session::forms::LoginForm;

pub fn login_view<'a>(form: &'a LoginForm, error: Option<&'a str>, busy: bool) -> Element<'a, Message> {
    let mut content = column().spacing(12).width(Length::Fixed(360.0));

    content = content.push(text::title3(fl!("login-title")));
    content = content.push(
        text_input::text_input(fl!("field-email"), form.email.as_str())
            .on_input(Message::LoginEmail)
            .on_submit(|_| Message::LoginSubmit)
            .width(Length::Fill),
    );
    content = content.push(
        text_input::secure_input(fl!("field-password"), form.password.as_str(), None::<Message>, true)
            .on_input(Message::LoginPassword)
            .on_submit(|_| Message::LoginSubmit)
            .width(Length::Fill),
    );

    if let Some(err) = error {
        content = content.push(text::caption(err));
    }

    content = content.push(
        button::suggested(fl!("login-submit"))
            .on_press_maybe((!busy).then_some(Message::LoginSubmit))
            .width(Length::Fill),
    );
    content = content.push(
        button::text(fl!("login-to-register")).on_press(Message::Open(View::Register)),
    );
    content = content.push(
        button::text(fl!("login-server-settings"))
            .on_press(Message::Open(View::Page(Page::Settings))),
    );

    container(content.align_x(Alignment::Center))
        .center(Length::Fill)
        .into()
}
