use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text};
use cosmic::{Element, theme};

use crate::fl;
use crate::message::{Message, Page, View};
use crate::store::workspace_select::WorkspaceChoices;

fn entry<'a>(title: String, caption: String, open: View) -> Element<'a, Message> {
    container(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                column()
                    .spacing(2)
                    .push(text::body(title))
                    .push(text::caption(caption))
                    .width(Length::Fill),
            )
            .push(button::standard(fl!("workspace-open")).on_press(Message::Open(open))),
    )
    .padding(8)
    .width(Length::Fill)
    .class(theme::Container::Card)
    .into()
}

pub fn workspace_select_view<'a>(choices: &'a WorkspaceChoices, user_id: Option<i64>) -> Element<'a, Message> {
    let mut content = column().spacing(12);
    content = content.push(text::title3(fl!("page-workspaces")));

    if choices.loading {
        content = content.push(text::body(fl!("loading")));
    } else if choices.is_empty() {
        content = content.push(
            column()
                .spacing(8)
                .align_x(Alignment::Center)
                .push(text::body(fl!("workspace-none")))
                .push(
                    button::suggested(fl!("workspace-browse"))
                        .on_press(Message::Open(View::Page(Page::Projects))),
                )
                .width(Length::Fill),
        );
    } else {
        if !choices.projects.is_empty() {
            content = content.push(text::title4(fl!("page-projects")));
            for p in &choices.projects {
                let caption = if Some(p.created_by) == user_id {
                    fl!("workspace-created")
                } else {
                    fl!("workspace-member")
                };
                content = content.push(entry(p.title.clone(), caption, View::Workspace(p.id)));
            }
        }
        if !choices.hackathons.is_empty() {
            content = content.push(text::title4(fl!("page-hackathons")));
            for h in &choices.hackathons {
                content = content.push(entry(
                    h.title.clone(),
                    fl!("workspace-organizer"),
                    View::HackathonDetails(h.id),
                ));
            }
        }
    }

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
