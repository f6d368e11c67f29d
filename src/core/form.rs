use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub const PASSWORD_MIN: usize = 8;
pub const MAX_SKILLS: usize = 20;
pub const SKILL_MAX_CHARS: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("title must be {min}-{max} characters")]
    TitleLength { min: usize, max: usize },
    #[error("enter a valid email address")]
    InvalidEmail,
    #[error("password must be at least {PASSWORD_MIN} characters")]
    PasswordTooShort,
    #[error("at most {MAX_SKILLS} skills")]
    TooManySkills,
    #[error("skill \"{0}\" must be 1-{SKILL_MAX_CHARS} characters")]
    SkillLength(String),
    #[error("{0} is not a valid date (YYYY-MM-DD)")]
    BadDate(String),
    #[error("{0} is not a valid number")]
    BadNumber(String),
    #[error("start date must be before end date")]
    StartAfterEnd,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

pub fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Required { field })
    } else {
        Ok(value)
    }
}

pub fn check_title(title: &str, min: usize, max: usize) -> Result<&str, FormError> {
    let title = title.trim();
    let len = title.chars().count();
    if (min..=max).contains(&len) {
        Ok(title)
    } else {
        Err(FormError::TitleLength { min, max })
    }
}

/// Parse `YYYY-MM-DD`. Empty input is `None`.
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>, FormError> {
    match input.trim() {
        "" => Ok(None),
        s => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FormError::BadDate(s.to_string())),
    }
}

pub fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

pub fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59).map(|dt| dt.and_utc())
}

pub fn parse_count(input: &str) -> Result<Option<u32>, FormError> {
    match input.trim() {
        "" => Ok(None),
        s => s
            .parse::<u32>()
            .map(Some)
            .map_err(|_| FormError::BadNumber(s.to_string())),
    }
}

/// Split a comma-separated skill list, trimming and dropping duplicates
/// (case-insensitive, first spelling wins).
pub fn split_skills(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let skill = raw.trim();
        if skill.is_empty() {
            continue;
        }
        if !out.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            out.push(skill.to_string());
        }
    }
    out
}

pub fn check_skills(skills: &[String]) -> Result<(), FormError> {
    if skills.len() > MAX_SKILLS {
        return Err(FormError::TooManySkills);
    }
    for skill in skills {
        let len = skill.trim().chars().count();
        if len == 0 || len > SKILL_MAX_CHARS {
            return Err(FormError::SkillLength(skill.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_check() {
        assert!(is_valid_email("ada@uni.edu"));
        assert!(is_valid_email("  ada@uni.edu "));
        assert!(!is_valid_email("ada@uni"));
        assert!(!is_valid_email("ada uni@edu.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn title_counts_chars_not_bytes() {
        assert_eq!(check_title("Çafé", 4, 80), Ok("Çafé"));
        assert!(check_title("abc", 4, 80).is_err());
    }

    #[test]
    fn skills_are_split_and_deduplicated() {
        assert_eq!(
            split_skills("Rust, rust ,, Figma,SQL "),
            vec!["Rust".to_string(), "Figma".to_string(), "SQL".to_string()]
        );
    }

    #[test]
    fn skill_limits() {
        let many: Vec<String> = (0..21).map(|i| format!("s{}", i)).collect();
        assert_eq!(check_skills(&many), Err(FormError::TooManySkills));
        let long = vec!["x".repeat(25)];
        assert_eq!(check_skills(&long), Err(FormError::SkillLength("x".repeat(25))));
        assert_eq!(check_skills(&["Go".to_string()]), Ok(()));
    }

    #[test]
    fn optional_fields() {
        assert_eq!(parse_date(" "), Ok(None));
        assert!(parse_date("2026-02-30").is_err());
        assert_eq!(parse_count("12"), Ok(Some(12)));
        assert_eq!(parse_count("-1"), Err(FormError::BadNumber("-1".into())));
    }
}
