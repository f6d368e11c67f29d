use chrono::{DateTime, Utc};

use super::application::ApplicationKind;

/// Common view of projects and hackathons for the browse pages.
pub trait Listing: Clone {
    /// Application type used to join this kind of listing.
    const KIND: ApplicationKind;

    fn id(&self) -> i64;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn owner_id(&self) -> i64;
    /// Status shown on the card. Hackathons derive it from their dates.
    fn status_label(&self, now: DateTime<Utc>) -> String;
    fn tags(&self) -> &[String];
    fn format(&self) -> &str;
    fn location(&self) -> &str;
}
