use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use std::str::FromStr;

use crate::constants::*;
use crate::error::{MeetError, MeetResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNot,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNot => "prefer_not",
        }
    }
}

impl FromStr for Gender {
    type Err = MeetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "prefer_not" => Ok(Gender::PreferNot),
            _ => Err(MeetError::validation("Invalid gender.")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum LookingFor {
    Male,
    Female,
    Any,
}

impl LookingFor {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookingFor::Male => "male",
            LookingFor::Female => "female",
            LookingFor::Any => "any",
        }
    }
}

impl FromStr for LookingFor {
    type Err = MeetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(LookingFor::Male),
            "female" => Ok(LookingFor::Female),
            "any" => Ok(LookingFor::Any),
            _ => Err(MeetError::validation("Invalid lookingFor value.")),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub user_id: String,
    pub display_name: String,
    pub age: i64,
    pub city: String,
    pub gender: Gender,
    pub looking_for: LookingFor,
    pub intent_tags: Json<Vec<String>>,
    pub bio: Option<String>,
    pub image_url: String,
    pub is_adult_confirmed: bool,
    pub adult_confirmed_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// Whether this card may browse and be browsed.
    pub fn is_eligible(&self) -> bool {
        self.is_active && self.is_adult_confirmed && self.age >= MIN_MEET_AGE
    }
}

/// The slice of a card shown next to requests and matches in the inbox.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub user_id: String,
    pub display_name: String,
    pub age: i64,
    pub city: String,
    pub image_url: String,
}

/// Raw card body as sent by the client, for both create and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPayload {
    pub display_name: Option<String>,
    pub age: Option<f64>,
    pub city: Option<String>,
    pub gender: Option<String>,
    pub looking_for: Option<String>,
    pub intent_tags: Option<Vec<String>>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub is_adult_confirmed: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub display_name: String,
    pub age: i64,
    pub city: String,
    pub gender: Gender,
    pub looking_for: LookingFor,
    pub intent_tags: Vec<String>,
    pub bio: Option<String>,
    pub image_url: String,
}

/// Owner edits; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub display_name: Option<String>,
    pub age: Option<i64>,
    pub city: Option<String>,
    pub gender: Option<Gender>,
    pub looking_for: Option<LookingFor>,
    pub intent_tags: Option<Vec<String>>,
    /// `Some(None)` clears the bio.
    pub bio: Option<Option<String>>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|v| v.trim().to_string())
}

fn required_text(value: &Option<String>, message: &str) -> MeetResult<String> {
    match trimmed(value) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(MeetError::validation(message)),
    }
}

fn clean_intent_tags(tags: &[String]) -> MeetResult<Vec<String>> {
    let tags: Vec<String> = tags
        .iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    if tags.len() < MIN_INTENT_TAGS || tags.len() > MAX_INTENT_TAGS {
        return Err(MeetError::validation(format!(
            "Select between {} and {} intent tags.",
            MIN_INTENT_TAGS, MAX_INTENT_TAGS
        )));
    }

    Ok(tags)
}

fn clean_bio(bio: &Option<String>) -> MeetResult<Option<String>> {
    let bio = trimmed(bio).unwrap_or_default();
    if bio.chars().count() > BIO_CHAR_LIMIT {
        return Err(MeetError::validation(format!(
            "Bio must be {} characters or less.",
            BIO_CHAR_LIMIT
        )));
    }
    Ok(if bio.is_empty() { None } else { Some(bio) })
}

fn whole_age(age: f64) -> Option<i64> {
    if age.is_finite() && age.fract() == 0.0 {
        Some(age as i64)
    } else {
        None
    }
}

impl CardPayload {
    /// Validates a full card for creation (or replacement via upsert).
    pub fn validate_new(&self) -> MeetResult<NewCard> {
        let display_name = required_text(&self.display_name, "Display name is required.")?;
        let city = required_text(&self.city, "City is required.")?;
        let gender: Gender = self.gender.as_deref().unwrap_or_default().parse()?;
        let looking_for: LookingFor = self.looking_for.as_deref().unwrap_or_default().parse()?;
        let intent_tags = clean_intent_tags(self.intent_tags.as_deref().unwrap_or_default())?;
        let bio = clean_bio(&self.bio)?;
        let image_url = required_text(&self.image_url, "Image is required.")?;

        let age = self
            .age
            .and_then(whole_age)
            .ok_or_else(|| MeetError::validation("Age is required."))?;
        if age < MIN_MEET_AGE {
            return Err(MeetError::validation("Must be 18+."));
        }

        if self.is_adult_confirmed != Some(true) {
            return Err(MeetError::validation("Adult confirmation is required."));
        }

        Ok(NewCard {
            display_name,
            age,
            city,
            gender,
            looking_for,
            intent_tags,
            bio,
            image_url,
        })
    }

    /// Validates only the fields the owner supplied.
    pub fn validate_patch(&self) -> MeetResult<CardPatch> {
        let display_name = match &self.display_name {
            Some(_) => Some(required_text(&self.display_name, "Display name is required.")?),
            None => None,
        };
        let city = match &self.city {
            Some(_) => Some(required_text(&self.city, "City is required.")?),
            None => None,
        };
        let gender = self.gender.as_deref().map(str::parse::<Gender>).transpose()?;
        let looking_for = self
            .looking_for
            .as_deref()
            .map(str::parse::<LookingFor>)
            .transpose()?;
        let intent_tags = self
            .intent_tags
            .as_deref()
            .map(clean_intent_tags)
            .transpose()?;
        let bio = match &self.bio {
            Some(_) => Some(clean_bio(&self.bio)?),
            None => None,
        };
        let image_url = match &self.image_url {
            Some(_) => Some(required_text(&self.image_url, "Image is required.")?),
            None => None,
        };

        let age = match self.age {
            Some(raw) => match whole_age(raw) {
                Some(age) if age >= MIN_MEET_AGE => Some(age),
                _ => {
                    return Err(MeetError::validation(
                        "Age must be an integer and at least 18.",
                    ));
                }
            },
            None => None,
        };

        Ok(CardPatch {
            display_name,
            age,
            city,
            gender,
            looking_for,
            intent_tags,
            bio,
            image_url,
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> CardPayload {
        CardPayload {
            display_name: Some("  Ana ".to_string()),
            age: Some(24.0),
            city: Some("Lisbon".to_string()),
            gender: Some("female".to_string()),
            looking_for: Some("any".to_string()),
            intent_tags: Some(vec!["coffee".to_string(), "  ".to_string(), " hiking ".to_string()]),
            bio: Some("".to_string()),
            image_url: Some("https://cdn.example/ana.jpg".to_string()),
            is_adult_confirmed: Some(true),
            is_active: None,
        }
    }

    #[test]
    fn test_validate_new_trims_and_cleans() {
        let card = full_payload().validate_new().unwrap();
        assert_eq!(card.display_name, "Ana");
        assert_eq!(card.intent_tags, vec!["coffee", "hiking"]);
        assert_eq!(card.bio, None);
        assert_eq!(card.gender, Gender::Female);
        assert_eq!(card.looking_for, LookingFor::Any);
    }

    #[test]
    fn test_validate_new_rejects_underage() {
        let mut payload = full_payload();
        payload.age = Some(17.0);
        let err = payload.validate_new().unwrap_err();
        assert_eq!(err.to_string(), "Must be 18+.");
    }

    #[test]
    fn test_validate_new_rejects_fractional_age() {
        let mut payload = full_payload();
        payload.age = Some(18.5);
        assert_eq!(payload.validate_new().unwrap_err().to_string(), "Age is required.");
    }

    #[test]
    fn test_validate_new_requires_adult_confirmation() {
        let mut payload = full_payload();
        payload.is_adult_confirmed = None;
        assert_eq!(
            payload.validate_new().unwrap_err().to_string(),
            "Adult confirmation is required."
        );
    }

    #[test]
    fn test_validate_new_intent_tag_bounds() {
        let mut payload = full_payload();
        payload.intent_tags = Some(vec![" ".to_string()]);
        assert!(matches!(payload.validate_new(), Err(MeetError::Validation(_))));

        payload.intent_tags = Some((0..6).map(|i| format!("tag{i}")).collect());
        assert!(matches!(payload.validate_new(), Err(MeetError::Validation(_))));
    }

    #[test]
    fn test_validate_new_rejects_unknown_enums() {
        let mut payload = full_payload();
        payload.gender = Some("robot".to_string());
        assert_eq!(payload.validate_new().unwrap_err().to_string(), "Invalid gender.");

        let mut payload = full_payload();
        payload.looking_for = Some("other".to_string());
        assert_eq!(
            payload.validate_new().unwrap_err().to_string(),
            "Invalid lookingFor value."
        );
    }

    #[test]
    fn test_validate_new_bio_limit_counts_chars() {
        let mut payload = full_payload();
        payload.bio = Some("é".repeat(BIO_CHAR_LIMIT));
        assert!(payload.validate_new().is_ok());

        payload.bio = Some("é".repeat(BIO_CHAR_LIMIT + 1));
        assert!(payload.validate_new().is_err());
    }

    #[test]
    fn test_validate_patch_only_checks_supplied_fields() {
        let payload = CardPayload {
            is_active: Some(false),
            ..Default::default()
        };
        let patch = payload.validate_patch().unwrap();
        assert_eq!(
            patch,
            CardPatch {
                is_active: Some(false),
                ..Default::default()
            }
        );

        let payload = CardPayload {
            city: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(payload.validate_patch().unwrap_err().to_string(), "City is required.");

        let payload = CardPayload {
            age: Some(16.0),
            ..Default::default()
        };
        assert!(payload.validate_patch().is_err());
    }

    #[test]
    fn test_validate_patch_clears_blank_bio() {
        let payload = CardPayload {
            bio: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(payload.validate_patch().unwrap().bio, Some(None));
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&Gender::PreferNot).unwrap(), "\"prefer_not\"");
        assert_eq!("prefer_not".parse::<Gender>().unwrap(), Gender::PreferNot);
        assert_eq!(LookingFor::Any.as_str(), "any");
    }
}
