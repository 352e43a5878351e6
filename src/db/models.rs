use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::DartsError;

/// Column width shared by `username`, `game` and `game_type`.
pub const MAX_TEXT_LEN: usize = 50;

/// A persisted darts result. Field order matches the column order of the
/// `darts` table and is the key order of every response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DartsRecord {
    pub id: i64,
    pub username: String,
    pub game: String,
    pub game_type: String,
    pub throws: Option<i64>,
    pub score: Option<i64>,
    pub max_score: Option<i64>,
    pub create_date: DateTime<Utc>,
    pub update_date: DateTime<Utc>,
}

/// Body of `POST /darts` and `PUT /darts/{id}`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DartsInput {
    pub username: String,
    pub game: String,
    pub game_type: String,
    pub throws: Option<i64>,
    pub score: Option<i64>,
    pub max_score: Option<i64>,
}

/// Body of `PATCH /darts/{id}`.
///
/// `None` means the key was absent. For the nullable columns `Some(None)`
/// is an explicit `null` and clears the stored value.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DartsPatch {
    #[serde(default, deserialize_with = "present")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub game: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub game_type: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub throws: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub score: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub max_score: Option<Option<i64>>,
}

/// Marks a key as present; combined with `#[serde(default)]` an absent key
/// stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq)]
pub enum DartsUpdate {
    /// Full replacement; optional columns missing from the input become null.
    Replace(DartsInput),
    /// Merge; only keys present in the payload are written.
    Patch(DartsPatch),
}

/// Request payloads checked before any store access.
pub trait Validate {
    fn validate(&self) -> Result<(), DartsError>;
}

fn check_len(field: &str, value: &str) -> Result<(), DartsError> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(DartsError::Validation(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

impl Validate for DartsInput {
    fn validate(&self) -> Result<(), DartsError> {
        check_len("username", &self.username)?;
        check_len("game", &self.game)?;
        check_len("game_type", &self.game_type)
    }
}

impl Validate for DartsPatch {
    fn validate(&self) -> Result<(), DartsError> {
        [
            ("username", &self.username),
            ("game", &self.game),
            ("game_type", &self.game_type),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .try_for_each(|(field, value)| check_len(field, value))
    }
}

/// Current time at the precision the store keeps (microseconds).
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl DartsRecord {
    /// Applies `update` and moves `update_date` strictly forward, even when
    /// the clock has not advanced past the previous write.
    pub fn apply(&mut self, update: DartsUpdate) {
        match update {
            DartsUpdate::Replace(input) => {
                self.username = input.username;
                self.game = input.game;
                self.game_type = input.game_type;
                self.throws = input.throws;
                self.score = input.score;
                self.max_score = input.max_score;
            }
            DartsUpdate::Patch(patch) => {
                if let Some(username) = patch.username {
                    self.username = username;
                }
                if let Some(game) = patch.game {
                    self.game = game;
                }
                if let Some(game_type) = patch.game_type {
                    self.game_type = game_type;
                }
                if let Some(throws) = patch.throws {
                    self.throws = throws;
                }
                if let Some(score) = patch.score {
                    self.score = score;
                }
                if let Some(max_score) = patch.max_score {
                    self.max_score = max_score;
                }
            }
        }
        self.update_date = now_utc().max(self.update_date + Duration::microseconds(1));
    }
}

impl fmt::Display for DartsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "darts(id={}, username='{}', game='{}')",
            self.id, self.username, self.game
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> DartsRecord {
        let ts = now_utc();
        DartsRecord {
            id: 7,
            username: "phil".to_string(),
            game: "cricket".to_string(),
            game_type: "practice".to_string(),
            throws: Some(21),
            score: Some(180),
            max_score: Some(180),
            create_date: ts,
            update_date: ts,
        }
    }

    #[test]
    fn input_optional_fields_default_to_none() {
        let input: DartsInput = serde_json::from_value(json!({
            "username": "phil", "game": "501", "game_type": "competition"
        }))
        .unwrap();
        assert_eq!(input.throws, None);
        assert_eq!(input.score, None);
        assert_eq!(input.max_score, None);
    }

    #[test]
    fn input_requires_username() {
        let res: Result<DartsInput, _> =
            serde_json::from_value(json!({ "game": "501", "game_type": "practice" }));
        assert!(res.is_err());
    }

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: DartsPatch =
            serde_json::from_value(json!({ "score": null, "throws": 9 })).unwrap();
        assert_eq!(patch.score, Some(None));
        assert_eq!(patch.throws, Some(Some(9)));
        assert_eq!(patch.max_score, None);
        assert_eq!(patch.username, None);
    }

    #[test]
    fn patch_rejects_null_username() {
        let res: Result<DartsPatch, _> = serde_json::from_value(json!({ "username": null }));
        assert!(res.is_err());
    }

    #[test]
    fn replace_clears_unsupplied_optionals() {
        let mut rec = record();
        let before = rec.update_date;
        rec.apply(DartsUpdate::Replace(DartsInput {
            username: "luke".to_string(),
            game: "501".to_string(),
            game_type: "competition".to_string(),
            throws: None,
            score: None,
            max_score: None,
        }));
        assert_eq!(rec.username, "luke");
        assert_eq!(rec.throws, None);
        assert_eq!(rec.score, None);
        assert_eq!(rec.max_score, None);
        assert!(rec.update_date > before);
        assert_eq!(rec.id, 7);
    }

    #[test]
    fn empty_patch_only_moves_update_date() {
        let original = record();
        let mut rec = original.clone();
        rec.apply(DartsUpdate::Patch(DartsPatch::default()));
        assert!(rec.update_date > original.update_date);
        rec.update_date = original.update_date;
        assert_eq!(rec, original);
    }

    #[test]
    fn patch_writes_only_present_fields() {
        let mut rec = record();
        rec.apply(DartsUpdate::Patch(DartsPatch {
            game: Some("around the clock".to_string()),
            score: Some(None),
            ..DartsPatch::default()
        }));
        assert_eq!(rec.game, "around the clock");
        assert_eq!(rec.score, None);
        assert_eq!(rec.throws, Some(21));
        assert_eq!(rec.username, "phil");
    }

    #[test]
    fn update_date_advances_past_future_timestamp() {
        let mut rec = record();
        rec.update_date = rec.update_date + Duration::hours(1);
        let before = rec.update_date;
        rec.apply(DartsUpdate::Patch(DartsPatch::default()));
        assert_eq!(rec.update_date, before + Duration::microseconds(1));
        assert!(rec.create_date <= rec.update_date);
    }

    #[test]
    fn long_strings_fail_validation() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        let input = DartsInput {
            username: long.clone(),
            game: "501".to_string(),
            game_type: "practice".to_string(),
            throws: None,
            score: None,
            max_score: None,
        };
        assert!(matches!(input.validate(), Err(DartsError::Validation(_))));

        let patch = DartsPatch {
            game_type: Some(long),
            ..DartsPatch::default()
        };
        assert!(matches!(patch.validate(), Err(DartsError::Validation(_))));
        assert!(DartsPatch::default().validate().is_ok());
    }

    #[test]
    fn serializes_columns_in_table_order() {
        let text = serde_json::to_string(&record()).unwrap();
        let columns = [
            "id", "username", "game", "game_type", "throws", "score", "max_score",
            "create_date", "update_date",
        ];
        let positions: Vec<usize> = columns
            .iter()
            .map(|col| {
                text.find(&format!("\"{col}\":"))
                    .unwrap_or_else(|| panic!("missing {col}"))
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
    }

    #[test]
    fn display_names_the_record() {
        assert_eq!(
            record().to_string(),
            "darts(id=7, username='phil', game='cricket')"
        );
    }
}
