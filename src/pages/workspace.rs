use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, dropdown, row, scrollable, text, text_input};
use cosmic::{Element, theme};

use crate::components::status_badge;
use crate::components::task_card::task_card;
use crate::core::task::TaskStatus;
use crate::fl;
use crate::message::Message;
use crate::store::workspace::{Access, WorkspaceStore};

fn board<'a>(ws: &'a WorkspaceStore) -> Element<'a, Message> {
    let lanes = ws.board();
    let mut columns = row().spacing(12);
    for status in TaskStatus::ALL {
        let tasks = lanes.column(*status);
        let mut col = column()
            .spacing(8)
            .push(
                row()
                    .spacing(8)
                    .align_y(Alignment::Center)
                    .push(status_badge::task_status(*status))
                    .push(text::caption(tasks.len().to_string())),
            );
        for task in tasks {
            col = col.push(task_card(task, task.assignee_id.map(|id| ws.name_of(id))));
        }
        columns = columns.push(col.width(Length::FillPortion(1)));
    }
    columns.into()
}

fn new_task_row<'a>(ws: &'a WorkspaceStore, error: Option<&'a str>) -> Element<'a, Message> {
    let members = ws.active_members();
    let mut ids: Vec<i64> = ws.project.iter().map(|p| p.created_by).collect();
    for m in members {
        if !ids.contains(&m.user_id) {
            ids.push(m.user_id);
        }
    }
    let mut labels = vec![fl!("workspace-unassigned")];
    labels.extend(ids.iter().map(|id| ws.name_of(*id)));
    let selected = match ws.draft.assignee {
        None => Some(0),
        Some(a) => ids.iter().position(|id| *id == a).map(|i| i + 1),
    };

    let mut col = column().spacing(8).push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                text_input::text_input(fl!("workspace-task-title"), ws.draft.title.as_str())
                    .on_input(Message::TaskDraftTitle)
                    .on_submit(|_| Message::SubmitTask)
                    .width(Length::FillPortion(2)),
            )
            .push(
                text_input::text_input(fl!("form-description"), ws.draft.description.as_str())
                    .on_input(Message::TaskDraftDescription)
                    .width(Length::FillPortion(2)),
            )
            .push(
                dropdown(labels, selected, move |idx| {
                    Message::TaskDraftAssignee(idx.checked_sub(1).and_then(|i| ids.get(i).copied()))
                })
                .width(Length::Shrink),
            )
            .push(button::suggested(fl!("workspace-add-task")).on_press(Message::SubmitTask)),
    );
    if let Some(err) = error {
        col = col.push(text::caption(err));
    }
    col.into()
}

fn roster<'a>(ws: &'a WorkspaceStore) -> Element<'a, Message> {
    let mut col = column().spacing(4).push(text::title4(fl!("workspace-team")));
    if let Some(ref p) = ws.project {
        col = col.push(text::body(format!("{} · {}", ws.name_of(p.created_by), fl!("workspace-owner"))));
    }
    for m in ws.active_members() {
        col = col.push(text::body(format!("{} · {}", ws.name_of(m.user_id), m.role_in_team)));
    }
    container(col)
        .padding(8)
        .width(Length::Fixed(220.0))
        .class(theme::Container::Card)
        .into()
}

pub fn workspace_view<'a>(ws: &'a WorkspaceStore, error: Option<&'a str>) -> Element<'a, Message> {
    let mut content = column().spacing(16);

    let title = ws
        .project
        .as_ref()
        .map(|p| p.title.clone())
        .unwrap_or_else(|| format!("Project #{}", ws.project_id));
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::title3(title).width(Length::Fill))
            .push(button::text(fl!("back")).on_press(Message::Back)),
    );

    match ws.access {
        Access::Checking => {
            content = content.push(text::body(fl!("workspace-checking")));
        }
        Access::Denied => {
            content = content.push(text::body(fl!("workspace-denied")));
        }
        Access::Granted => {
            content = content.push(new_task_row(ws, error));
            content = content.push(
                row()
                    .spacing(16)
                    .push(container(board(ws)).width(Length::Fill))
                    .push(roster(ws)),
            );
        }
    }

    container(scrollable(content.padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
