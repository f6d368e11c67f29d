use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, flex_row, icon, row, scrollable, text, text_input};
use cosmic::{Element, theme};

use crate::components::{labels, status_badge};
use crate::components::tag_chip::{removable_chip, tag_chip};
use crate::core::project::Project;
use crate::fl;
use crate::message::{Message, View};
use crate::store::profile::ProfileStore;

fn user_card<'a>(store: &'a ProfileStore) -> Element<'a, Message> {
    let Some(ref user) = store.user else {
        return text::body(fl!("loading")).into();
    };

    let mut col = column().spacing(8);
    col = col.push(
        row()
            .spacing(12)
            .align_y(Alignment::Center)
            .push(
                container(text::title3(user.initials()))
                    .padding(12)
                    .class(theme::Container::Card),
            )
            .push(
                column()
                    .spacing(2)
                    .push(text::title4(user.name.clone()))
                    .push(text::caption(format!("{} · {}", user.email, labels::role(user.role)))),
            ),
    );

    // Bio
    col = col.push(text::title4(fl!("profile-bio")));
    if store.editing_bio {
        col = col.push(
            text_input::text_input(fl!("profile-bio-placeholder"), store.bio_draft.as_str())
                .on_input(Message::BioInput)
                .on_submit(|_| Message::SaveBio)
                .width(Length::Fill),
        );
        col = col.push(
            row()
                .spacing(8)
                .push(button::suggested(fl!("save")).on_press(Message::SaveBio))
                .push(button::standard(fl!("cancel")).on_press(Message::CancelProfileEdit)),
        );
    } else {
        let bio = user.bio.clone().filter(|b| !b.is_empty()).unwrap_or_else(|| fl!("profile-no-bio"));
        col = col.push(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(text::body(bio).width(Length::Fill))
                .push(button::icon(icon::from_name("document-edit-symbolic")).on_press(Message::EditBio)),
        );
    }

    // Skills
    col = col.push(text::title4(fl!("profile-skills")));
    if store.editing_skills {
        let chips: Vec<Element<'static, Message>> = store
            .skills_draft
            .iter()
            .map(|s| removable_chip(s, Message::RemoveSkill(s.clone())))
            .collect();
        col = col.push(flex_row(chips).row_spacing(4).column_spacing(4));
        col = col.push(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(
                    text_input::text_input(fl!("profile-skill-placeholder"), store.skill_input.as_str())
                        .on_input(Message::SkillInput)
                        .on_submit(|_| Message::AddSkill)
                        .width(Length::Fill),
                )
                .push(button::icon(icon::from_name("list-add-symbolic")).on_press(Message::AddSkill)),
        );
        if let Some(ref err) = store.skill_error {
            col = col.push(text::caption(err.clone()));
        }
        col = col.push(
            row()
                .spacing(8)
                .push(button::suggested(fl!("save")).on_press(Message::SaveSkills))
                .push(button::standard(fl!("cancel")).on_press(Message::CancelProfileEdit)),
        );
    } else {
        let chips: Vec<Element<'static, Message>> = user.skills.iter().map(|s| tag_chip(s)).collect();
        col = col.push(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(container(flex_row(chips).row_spacing(4).column_spacing(4)).width(Length::Fill))
                .push(button::icon(icon::from_name("document-edit-symbolic")).on_press(Message::EditSkills)),
        );
    }

    container(col)
        .padding(16)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}

fn project_line<'a>(p: &'a Project, deletable: bool, confirming: bool) -> Element<'a, Message> {
    let mut line = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(
            button::text(p.title.clone())
                .on_press(Message::Open(View::ProjectDetails(p.id)))
                .width(Length::Fill),
        )
        .push(status_badge::listing_status(p.status.clone()))
        .push(button::standard(fl!("workspace-open")).on_press(Message::Open(View::Workspace(p.id))));

    if deletable {
        if confirming {
            line = line
                .push(button::destructive(fl!("delete")).on_press(Message::DeleteCreatedProject(p.id)))
                .push(button::standard(fl!("cancel")).on_press(Message::CancelDeleteProject));
        } else {
            line = line.push(
                button::icon(icon::from_name("edit-delete-symbolic"))
                    .on_press(Message::ConfirmDeleteProject(p.id)),
            );
        }
    }
    line.into()
}

pub fn profile_view<'a>(store: &'a ProfileStore) -> Element<'a, Message> {
    let mut content = column().spacing(16);
    content = content.push(user_card(store));

    if !store.invitations.is_empty() {
        content = content.push(text::title4(fl!("profile-invitations")));
        for inv in &store.invitations {
            content = content.push(
                row()
                    .spacing(8)
                    .align_y(Alignment::Center)
                    .push(
                        text::body(fl!(
                            "profile-invitation",
                            project = inv.project_id.to_string(),
                            role = inv.role_in_team.clone()
                        ))
                        .width(Length::Fill),
                    )
                    .push(button::suggested(fl!("profile-accept")).on_press(Message::AcceptInvitation(inv.id))),
            );
        }
    }

    content = content.push(text::title4(fl!("profile-created")));
    if store.created.is_empty() {
        content = content.push(text::caption(fl!("profile-none")));
    }
    for p in &store.created {
        content = content.push(project_line(p, true, store.pending_delete == Some(p.id)));
    }

    content = content.push(text::title4(fl!("profile-joined")));
    if store.joined.is_empty() {
        content = content.push(text::caption(fl!("profile-none")));
    }
    for p in &store.joined {
        content = content.push(project_line(p, false, false));
    }

    content = content.push(text::title4(fl!("profile-applications")));
    if store.applications.is_empty() {
        content = content.push(text::caption(fl!("profile-none")));
    }
    for app in &store.applications {
        let target = app
            .target_title()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} #{}", app.kind.as_str(), app.target_id));
        content = content.push(
            row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(text::body(target).width(Length::Fill))
                .push(status_badge::application_status(app.status)),
        );
    }

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
