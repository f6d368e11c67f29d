pub mod labels;
pub mod listing_card;
pub mod listing_filters;
pub mod pagination;
pub mod status_badge;
pub mod tag_chip;
pub mod task_card;
