use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::application::ApplicationKind;
use super::form::{self, FormError};
use super::listing::Listing;

fn default_format() -> String {
    "Online".to_string()
}

fn default_location() -> String {
    "TBA".to_string()
}

fn default_tags() -> Vec<String> {
    vec!["General".to_string()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Upcoming,
    Ongoing,
    Past,
}

impl Phase {
    pub const ALL: &'static [Phase] = &[Phase::Upcoming, Phase::Ongoing, Phase::Past];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Past => "past",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hackathon {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub prize: Option<String>,
    #[serde(default)]
    pub max_participants: Option<u32>,
    pub created_by: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_location")]
    pub location: String,
}

impl Hackathon {
    /// Both bounds are inclusive in the ongoing window.
    pub fn phase(&self, now: DateTime<Utc>) -> Phase {
        if now < self.start_at {
            Phase::Upcoming
        } else if now <= self.end_at {
            Phase::Ongoing
        } else {
            Phase::Past
        }
    }
}

impl Listing for Hackathon {
    const KIND: ApplicationKind = ApplicationKind::Hackathon;

    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn owner_id(&self) -> i64 {
        self.created_by
    }

    fn status_label(&self, now: DateTime<Utc>) -> String {
        self.phase(now).as_str().to_string()
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn format(&self) -> &str {
        &self.format
    }

    fn location(&self) -> &str {
        &self.location
    }
}

/// Body of `POST hackathons`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewHackathon {
    pub title: String,
    pub description: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HackathonForm {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub prize: String,
    pub max_participants: String,
    pub format: String,
    pub location: String,
    /// Comma separated.
    pub tags: String,
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl HackathonForm {
    pub fn to_request(&self) -> Result<NewHackathon, FormError> {
        let title = form::require(&self.title, "title")?;
        let description = form::require(&self.description, "description")?;
        let start = form::parse_date(&self.start_date)?
            .and_then(form::start_of_day)
            .ok_or(FormError::Required { field: "start date" })?;
        let end = form::parse_date(&self.end_date)?
            .and_then(form::end_of_day)
            .ok_or(FormError::Required { field: "end date" })?;
        if start >= end {
            return Err(FormError::StartAfterEnd);
        }

        Ok(NewHackathon {
            title: title.to_string(),
            description: description.to_string(),
            start_at: start,
            end_at: end,
            prize: non_empty(&self.prize),
            max_participants: form::parse_count(&self.max_participants)?,
            format: non_empty(&self.format),
            location: non_empty(&self.location),
            tags: form::split_skills(&self.tags),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hackathon(start: (u32, u32), end: (u32, u32)) -> Hackathon {
        Hackathon {
            id: 1,
            title: "HackUni".into(),
            description: String::new(),
            start_at: Utc.with_ymd_and_hms(2026, start.0, start.1, 9, 0, 0).unwrap(),
            end_at: Utc.with_ymd_and_hms(2026, end.0, end.1, 18, 0, 0).unwrap(),
            prize: None,
            max_participants: None,
            created_by: 2,
            created_at: None,
            tags: default_tags(),
            format: default_format(),
            location: default_location(),
        }
    }

    #[test]
    fn phase_follows_dates() {
        let h = hackathon((3, 10), (3, 12));
        let before = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let during = Utc.with_ymd_and_hms(2026, 3, 11, 12, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 3, 13, 0, 0, 0).unwrap();
        assert_eq!(h.phase(before), Phase::Upcoming);
        assert_eq!(h.phase(during), Phase::Ongoing);
        assert_eq!(h.phase(h.end_at), Phase::Ongoing);
        assert_eq!(h.phase(after), Phase::Past);
        assert_eq!(h.status_label(after), "past");
    }

    #[test]
    fn server_record_without_display_fields() {
        let json = r#"{"id":3,"title":"Green Hack","description":"Climate","start_at":"2026-04-01T09:00:00Z","end_at":"2026-04-02T18:00:00Z","prize":null,"max_participants":40,"created_by":8,"created_at":"2026-01-01T00:00:00Z"}"#;
        let h: Hackathon = serde_json::from_str(json).unwrap();
        assert_eq!(h.format, "Online");
        assert_eq!(h.location, "TBA");
        assert_eq!(h.tags, vec!["General".to_string()]);
        assert_eq!(h.max_participants, Some(40));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let form = HackathonForm {
            title: "Green Hack".into(),
            description: "Climate".into(),
            start_date: "2026-04-02".into(),
            end_date: "2026-04-01".into(),
            ..Default::default()
        };
        assert_eq!(form.to_request(), Err(FormError::StartAfterEnd));
    }

    #[test]
    fn single_day_event_is_allowed() {
        let form = HackathonForm {
            title: "Green Hack".into(),
            description: "Climate".into(),
            start_date: "2026-04-01".into(),
            end_date: "2026-04-01".into(),
            tags: "AI, climate".into(),
            ..Default::default()
        };
        let req = form.to_request().unwrap();
        assert!(req.start_at < req.end_at);
        assert_eq!(req.tags, vec!["AI".to_string(), "climate".to_string()]);
        assert_eq!(req.format, None);
    }

    #[test]
    fn missing_dates() {
        let form = HackathonForm {
            title: "Green Hack".into(),
            description: "Climate".into(),
            ..Default::default()
        };
        assert_eq!(
            form.to_request(),
            Err(FormError::Required { field: "start date" })
        );
    }
}
