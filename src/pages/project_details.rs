use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, flex_row, icon, row, scrollable, text};
use cosmic::Element;

use crate::components::listing_card::join_button;
use crate::components::status_badge;
use crate::components::tag_chip::tag_chip;
use crate::core::application::ApplicationKind;
use crate::core::project::Project;
use crate::fl;
use crate::message::{Message, View};
use crate::session::Session;
use crate::store::listings::JoinState;

fn fact<'a>(label: String, value: String) -> Element<'a, Message> {
    row()
        .spacing(8)
        .push(text::body(label).width(Length::Fixed(160.0)))
        .push(text::body(value))
        .into()
}

pub fn project_details_view<'a>(
    project: Option<&'a Project>,
    join: JoinState,
    session: &'a Session,
) -> Element<'a, Message> {
    let mut content = column().spacing(12);

    content = content.push(
        button::text(fl!("back-to-projects"))
            .on_press(Message::Back),
    );

    let Some(project) = project else {
        content = content.push(text::body(fl!("loading")));
        return container(content.padding(16)).width(Length::Fill).into();
    };

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::title3(project.title.clone()).width(Length::Fill))
            .push(status_badge::listing_status(project.status.clone())),
    );
    content = content.push(text::body(project.description.clone()));

    if !project.tech_stack.is_empty() {
        content = content.push(text::title4(fl!("projects-roles")));
        let chips: Vec<Element<'static, Message>> = project.tech_stack.iter().map(|t| tag_chip(t)).collect();
        content = content.push(flex_row(chips).row_spacing(4).column_spacing(4));
    }

    content = content.push(fact(fl!("details-format"), format!("{} · {}", project.format, project.location)));
    if let Some(ref prize) = project.prize {
        content = content.push(fact(fl!("form-prize"), prize.clone()));
    }
    if let Some(deadline) = project.deadline {
        content = content.push(fact(fl!("projects-deadline"), deadline.format("%Y-%m-%d").to_string()));
    }
    if let Some(max) = project.max_participants {
        content = content.push(fact(fl!("form-max-participants"), max.to_string()));
    }
    content = content.push(fact(fl!("details-applicants"), project.applicants.to_string()));
    content = content.push(fact(fl!("details-progress"), format!("{:.0}%", project.progress_percent)));

    let mut actions = row().spacing(8).align_y(Alignment::Center);
    if let Some(btn) = join_button(ApplicationKind::Project, project.id, join) {
        actions = actions.push(btn);
    }
    if session.is_owner(project.created_by) || join == JoinState::Joined {
        actions = actions.push(
            button::standard(fl!("details-open-workspace"))
                .on_press(Message::Open(View::Workspace(project.id))),
        );
    }
    if session.can_review(Some(project.created_by)) {
        actions = actions.push(
            button::standard(fl!("details-review-applications"))
                .on_press(Message::Open(View::Reviews(ApplicationKind::Project, project.id))),
        );
    }
    if session.can_delete_listing(project.created_by) {
        actions = actions.push(cosmic::widget::horizontal_space());
        actions = actions.push(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::DeleteListing(ApplicationKind::Project, project.id)),
        );
    }
    content = content.push(actions);

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
