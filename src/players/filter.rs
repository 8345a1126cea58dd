//! Query-string filters for the list and count endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::PlayerError;
use super::types::{Player, Profession, Race};
use super::validation::{parse_flag, parse_millis};

/// Query parameters accepted by list and count. Unrecognized keys are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerQuery {
    pub name: Option<String>,
    pub title: Option<String>,
    pub race: Option<String>,
    pub profession: Option<String>,
    pub min_experience: Option<String>,
    pub max_experience: Option<String>,
    pub min_level: Option<String>,
    pub max_level: Option<String>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub banned: Option<String>,
    pub page_number: Option<String>,
    pub page_size: Option<String>,
    pub order: Option<String>,
}

/// A single predicate over player fields
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    NameContains(String),
    TitleContains(String),
    RaceIs(Race),
    ProfessionIs(Profession),
    MinExperience(i32),
    MaxExperience(i32),
    MinLevel(i32),
    MaxLevel(i32),
    After(DateTime<Utc>),
    Before(DateTime<Utc>),
    Banned(bool),
}

impl Condition {
    pub fn matches(&self, player: &Player) -> bool {
        match self {
            Condition::NameContains(s) => player.name.contains(s.as_str()),
            Condition::TitleContains(s) => player.title.contains(s.as_str()),
            Condition::RaceIs(race) => player.race == *race,
            Condition::ProfessionIs(profession) => player.profession == *profession,
            Condition::MinExperience(v) => player.experience >= *v,
            Condition::MaxExperience(v) => player.experience <= *v,
            Condition::MinLevel(v) => player.level >= *v,
            Condition::MaxLevel(v) => player.level <= *v,
            Condition::After(t) => player.birthday >= *t,
            Condition::Before(t) => player.birthday <= *t,
            Condition::Banned(b) => player.banned == *b,
        }
    }
}

/// Conjunction of conditions; empty matches every player
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerFilter {
    conditions: Vec<Condition>,
}

impl PlayerFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn matches(&self, player: &Player) -> bool {
        self.conditions.iter().all(|c| c.matches(player))
    }

    /// Translate every supplied filter parameter and AND the results together
    pub fn from_query(query: &PlayerQuery) -> Result<Self, PlayerError> {
        RULES.iter().try_fold(PlayerFilter::all(), |filter, rule| {
            match (rule.value)(query) {
                None => Ok(filter),
                Some(raw) => (rule.translate)(raw)
                    .map(|condition| filter.and(condition))
                    .ok_or(PlayerError::invalid(rule.param)),
            }
        })
    }
}

/// Maps one query parameter to a condition
struct Rule {
    param: &'static str,
    value: fn(&PlayerQuery) -> Option<&str>,
    translate: fn(&str) -> Option<Condition>,
}

const RULES: [Rule; 11] = [
    Rule {
        param: "name",
        value: |q| q.name.as_deref(),
        translate: |v| Some(Condition::NameContains(v.to_string())),
    },
    Rule {
        param: "title",
        value: |q| q.title.as_deref(),
        translate: |v| Some(Condition::TitleContains(v.to_string())),
    },
    Rule {
        param: "race",
        value: |q| q.race.as_deref(),
        translate: |v| v.parse().ok().map(Condition::RaceIs),
    },
    Rule {
        param: "profession",
        value: |q| q.profession.as_deref(),
        translate: |v| v.parse().ok().map(Condition::ProfessionIs),
    },
    Rule {
        param: "minExperience",
        value: |q| q.min_experience.as_deref(),
        translate: |v| v.parse().ok().map(Condition::MinExperience),
    },
    Rule {
        param: "maxExperience",
        value: |q| q.max_experience.as_deref(),
        translate: |v| v.parse().ok().map(Condition::MaxExperience),
    },
    Rule {
        param: "minLevel",
        value: |q| q.min_level.as_deref(),
        translate: |v| v.parse().ok().map(Condition::MinLevel),
    },
    Rule {
        param: "maxLevel",
        value: |q| q.max_level.as_deref(),
        translate: |v| v.parse().ok().map(Condition::MaxLevel),
    },
    Rule {
        param: "after",
        value: |q| q.after.as_deref(),
        translate: |v| timestamp(v).map(Condition::After),
    },
    Rule {
        param: "before",
        value: |q| q.before.as_deref(),
        translate: |v| timestamp(v).map(Condition::Before),
    },
    Rule {
        param: "banned",
        value: |q| q.banned.as_deref(),
        translate: |v| Some(Condition::Banned(parse_flag(v))),
    },
];

fn timestamp(value: &str) -> Option<DateTime<Utc>> {
    parse_millis("timestamp", value).ok()
}
