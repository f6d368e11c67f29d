use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, dropdown, row, scrollable, text, text_input};
use cosmic::Element;

use crate::components::labels;
use crate::core::user::Role;
use crate::fl;
use crate::message::{Message, RegisterField, View};
use crate::session::forms::RegisterForm;

pub fn register_view<'a>(form: &'a RegisterForm, error: Option<&'a str>, busy: bool) -> Element<'a, Message> {
    let mut content = column().spacing(12).width(Length::Fixed(420.0));

    content = content.push(text::title3(fl!("register-title")));

    let field = |placeholder: String, value: &'a str, which: RegisterField| {
        text_input::text_input(placeholder, value)
            .on_input(move |v| Message::RegisterInput(which, v))
            .width(Length::Fill)
    };

    content = content.push(field(fl!("field-name"), &form.name, RegisterField::Name));
    content = content.push(field(fl!("field-email"), &form.email, RegisterField::Email));
    content = content.push(
        text_input::secure_input(fl!("field-password"), form.password.as_str(), None::<Message>, true)
            .on_input(|v| Message::RegisterInput(RegisterField::Password, v))
            .width(Length::Fill),
    );

    let role_labels: Vec<String> = Role::SELF_ASSIGNABLE.iter().map(|r| labels::role(*r)).collect();
    let selected = Role::SELF_ASSIGNABLE.iter().position(|r| *r == form.role);
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body(fl!("field-role")).width(Length::Fill))
            .push(
                dropdown(role_labels, selected, |idx| {
                    Message::RegisterRole(Role::SELF_ASSIGNABLE.get(idx).copied().unwrap_or(Role::Student))
                })
                .width(Length::Shrink),
            ),
    );

    content = content.push(field(fl!("field-skills"), &form.skills, RegisterField::Skills));
    content = content.push(text::caption(fl!("field-skills-hint")));
    content = content.push(field(fl!("field-bio"), &form.bio, RegisterField::Bio));

    if let Some(err) = error {
        content = content.push(text::caption(err));
    }

    content = content.push(
        button::suggested(fl!("register-submit"))
            .on_press_maybe((!busy).then_some(Message::RegisterSubmit))
            .width(Length::Fill),
    );
    content = content.push(button::text(fl!("register-to-login")).on_press(Message::Open(View::Login)));

    container(scrollable(container(content).center_x(Length::Fill).padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
