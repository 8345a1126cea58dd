//! Request bodies for create/update and the checks applied to them.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

use super::error::PlayerError;
use super::types::{Player, PlayerId, Profession, Race};

pub const NAME_MAX_LENGTH: usize = 12;
pub const TITLE_MAX_LENGTH: usize = 30;
pub const EXP_MIN_VALUE: i64 = 0;
pub const EXP_MAX_VALUE: i64 = 10_000_000;
/// 2000-01-01T00:00:00Z
pub const MIN_BIRTHDAY_MS: i64 = 946_684_800_000;
/// 3000-01-01T00:00:00Z
pub const MAX_BIRTHDAY_MS: i64 = 32_503_680_000_000;

/// Whether the fields describe a new player or a patch to an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// Raw field map posted to the create and update endpoints.
///
/// Values are kept in their textual form; numbers and booleans sent as JSON
/// literals are accepted as if they had been quoted. A JSON `null` counts as
/// a present, empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFields {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<String>,
    pub profession: Option<String>,
    pub experience: Option<String>,
    pub birthday: Option<String>,
    pub banned: Option<String>,
}

/// Fields that passed validation, converted to their typed form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedFields {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<Race>,
    pub profession: Option<Profession>,
    pub experience: Option<i32>,
    pub birthday: Option<DateTime<Utc>>,
    pub banned: Option<bool>,
}

impl PlayerFields {
    pub fn is_empty(&self) -> bool {
        *self == PlayerFields::default()
    }

    /// Check every present field, and in create mode that all required
    /// fields are there. Nothing is applied until the whole set passes.
    pub fn validate(&self, mode: Mode) -> Result<ValidatedFields, PlayerError> {
        if mode == Mode::Create {
            let required = [
                ("name", &self.name),
                ("title", &self.title),
                ("race", &self.race),
                ("profession", &self.profession),
                ("experience", &self.experience),
                ("birthday", &self.birthday),
            ];
            if let Some((field, _)) = required.iter().find(|(_, v)| v.is_none()) {
                return Err(PlayerError::invalid(*field));
            }
        }

        Ok(ValidatedFields {
            name: self
                .name
                .as_deref()
                .map(|v| bounded_text("name", v, NAME_MAX_LENGTH))
                .transpose()?,
            title: self
                .title
                .as_deref()
                .map(|v| bounded_text("title", v, TITLE_MAX_LENGTH))
                .transpose()?,
            race: self
                .race
                .as_deref()
                .map(|v| v.parse().map_err(|_| PlayerError::invalid("race")))
                .transpose()?,
            profession: self
                .profession
                .as_deref()
                .map(|v| v.parse().map_err(|_| PlayerError::invalid("profession")))
                .transpose()?,
            experience: self.experience.as_deref().map(parse_experience).transpose()?,
            birthday: self.birthday.as_deref().map(parse_birthday).transpose()?,
            banned: self.banned.as_deref().map(parse_flag),
        })
    }
}

impl ValidatedFields {
    /// Build a new, unsaved player. Expects fields validated in create mode.
    pub fn into_new_player(self) -> Result<Player, PlayerError> {
        let mut player = Player {
            id: None,
            name: self.name.ok_or(PlayerError::invalid("name"))?,
            title: self.title.ok_or(PlayerError::invalid("title"))?,
            race: self.race.ok_or(PlayerError::invalid("race"))?,
            profession: self.profession.ok_or(PlayerError::invalid("profession"))?,
            experience: 0,
            level: 0,
            until_next_level: 0,
            birthday: self.birthday.ok_or(PlayerError::invalid("birthday"))?,
            // FIXME: an absent flag bans the new player; kept for wire compatibility
            banned: self.banned.unwrap_or(true),
        };
        player.set_experience(self.experience.ok_or(PlayerError::invalid("experience"))?);
        Ok(player)
    }

    /// Overwrite only the fields that were supplied
    pub fn apply_to(self, player: &mut Player) {
        if let Some(name) = self.name {
            player.name = name;
        }
        if let Some(title) = self.title {
            player.title = title;
        }
        if let Some(race) = self.race {
            player.race = race;
        }
        if let Some(profession) = self.profession {
            player.profession = profession;
        }
        if let Some(birthday) = self.birthday {
            player.birthday = birthday;
        }
        if let Some(banned) = self.banned {
            player.banned = banned;
        }
        if let Some(experience) = self.experience {
            player.set_experience(experience);
        }
    }
}

/// Only the literal `"true"` sets a flag
pub fn parse_flag(value: &str) -> bool {
    value == "true"
}

/// Parse epoch milliseconds into a timestamp
pub fn parse_millis(field: &'static str, value: &str) -> Result<DateTime<Utc>, PlayerError> {
    value
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or(PlayerError::invalid(field))
}

fn bounded_text(field: &'static str, value: &str, max: usize) -> Result<String, PlayerError> {
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(PlayerError::invalid(field));
    }
    Ok(value.to_string())
}

fn parse_experience(value: &str) -> Result<i32, PlayerError> {
    let exp: i64 = value.parse().map_err(|_| PlayerError::invalid("experience"))?;
    if !(EXP_MIN_VALUE..=EXP_MAX_VALUE).contains(&exp) {
        return Err(PlayerError::invalid("experience"));
    }
    i32::try_from(exp).map_err(|_| PlayerError::invalid("experience"))
}

fn parse_birthday(value: &str) -> Result<DateTime<Utc>, PlayerError> {
    let millis: i64 = value.parse().map_err(|_| PlayerError::invalid("birthday"))?;
    if !(MIN_BIRTHDAY_MS..=MAX_BIRTHDAY_MS).contains(&millis) {
        return Err(PlayerError::invalid("birthday"));
    }
    parse_millis("birthday", value)
}

/// Check a fully-formed record, e.g. one loaded from a seed file, against
/// the same limits applied to request fields
pub fn check_record(player: &Player) -> Result<(), PlayerError> {
    bounded_text("name", &player.name, NAME_MAX_LENGTH)?;
    bounded_text("title", &player.title, TITLE_MAX_LENGTH)?;
    if !(EXP_MIN_VALUE..=EXP_MAX_VALUE).contains(&i64::from(player.experience)) {
        return Err(PlayerError::invalid("experience"));
    }
    if !(MIN_BIRTHDAY_MS..=MAX_BIRTHDAY_MS).contains(&player.birthday.timestamp_millis()) {
        return Err(PlayerError::invalid("birthday"));
    }
    // the store hands out id + 1 next, so the largest id is unusable
    if let Some(id) = player.id {
        if id < 1 || id == PlayerId::MAX {
            return Err(PlayerError::invalid("id"));
        }
    }
    Ok(())
}

impl<'de> Deserialize<'de> for PlayerFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FieldsVisitor)
    }
}

/// Accepts only a JSON object; positional (array) bodies are rejected
struct FieldsVisitor;

impl<'de> de::Visitor<'de> for FieldsVisitor {
    type Value = PlayerFields;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of player fields")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        let mut fields = PlayerFields::default();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            let slot = match key.as_str() {
                "name" => &mut fields.name,
                "title" => &mut fields.title,
                "race" => &mut fields.race,
                "profession" => &mut fields.profession,
                "experience" => &mut fields.experience,
                "birthday" => &mut fields.birthday,
                "banned" => &mut fields.banned,
                _ => continue,
            };
            *slot = Some(textual(value)?);
        }
        Ok(fields)
    }
}

/// Text form of a scalar value. Floats keep their fraction, so `1000.0`
/// stays `"1000.0"` and fails integer parsing later.
fn textual<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) => Err(E::invalid_type(
            de::Unexpected::Seq,
            &"a string, number, boolean or null",
        )),
        Value::Object(_) => Err(E::invalid_type(
            de::Unexpected::Map,
            &"a string, number, boolean or null",
        )),
    }
}
