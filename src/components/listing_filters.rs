use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, dropdown, flex_row, row, text, text_input};
use cosmic::Element;

use super::tag_chip::toggle_chip;
use crate::core::application::ApplicationKind;
use crate::core::filter::ListingFilter;
use crate::fl;
use crate::message::{ListingFilterChange, Message};

/// Dropdown over `options` with a leading "any" entry mapping to `None`.
fn optional_dropdown(
    any_label: String,
    options: Vec<String>,
    current: Option<&str>,
    on_select: impl Fn(Option<String>) -> Message + Send + Sync + 'static,
) -> Element<'static, Message> {
    let selected = match current {
        None => Some(0),
        Some(c) => options.iter().position(|o| o == c).map(|i| i + 1),
    };
    let mut labels = vec![any_label];
    labels.extend(options.iter().cloned());
    dropdown(labels, selected, move |idx| {
        on_select(idx.checked_sub(1).and_then(|i| options.get(i).cloned()))
    })
    .width(Length::Shrink)
    .into()
}

/// Search, status, format, location and theme filters for a listing page.
pub fn listing_filters<'a>(
    kind: ApplicationKind,
    filter: &'a ListingFilter,
    statuses: Vec<String>,
    formats: Vec<String>,
    themes: Vec<String>,
) -> Element<'a, Message> {
    let msg = move |change: ListingFilterChange| Message::ListingFilter(kind, change);

    let search = text_input::search_input(fl!("filter-search"), filter.search.as_str())
        .on_input(move |v| msg(ListingFilterChange::Search(v)))
        .width(Length::Fill);

    let location = text_input::text_input(fl!("filter-location"), filter.location.as_str())
        .on_input(move |v| msg(ListingFilterChange::Location(v)))
        .width(Length::Fixed(160.0));

    let mut top = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(search)
        .push(optional_dropdown(
            fl!("filter-any-status"),
            statuses,
            filter.status.as_deref(),
            move |s| msg(ListingFilterChange::Status(s)),
        ))
        .push(optional_dropdown(
            fl!("filter-any-format"),
            formats,
            filter.format.as_deref(),
            move |f| msg(ListingFilterChange::Format(f)),
        ))
        .push(location);

    if !filter.is_empty() {
        top = top.push(button::text(fl!("filter-clear")).on_press(msg(ListingFilterChange::Clear)));
    }

    let mut col = column().spacing(8).push(top);
    if !themes.is_empty() {
        let chips: Vec<Element<'static, Message>> = themes
            .iter()
            .map(|t| {
                toggle_chip(
                    t,
                    filter.themes.contains(t),
                    msg(ListingFilterChange::ToggleTheme(t.clone())),
                )
            })
            .collect();
        col = col
            .push(text::caption(fl!("filter-themes")))
            .push(flex_row(chips).row_spacing(4).column_spacing(4));
    }
    col.into()
}
