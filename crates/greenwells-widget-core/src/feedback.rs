use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::StorageError;
use crate::storage::{FEEDBACK_STORAGE_KEY, FallbackStore, KeyValueStore};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const STAR_COUNT: usize = MAX_RATING as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies feedback from the numeric rating alone. `comments` is accepted
/// for call-site compatibility and not consulted.
#[must_use]
pub fn derive_sentiment(_comments: &str, rating: u8) -> Sentiment {
    match rating {
        4.. => Sentiment::Positive,
        3 => Sentiment::Neutral,
        _ => Sentiment::Negative,
    }
}

#[must_use]
pub fn summary_text(sentiment: Sentiment) -> String {
    format!("{sentiment} feedback detected — user appreciated the service quality.")
}

/// Raw form values as typed by the visitor. Nothing here is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFields {
    pub name: String,
    pub email: String,
    pub service_type: String,
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub name: String,
    pub email: String,
    pub service_type: String,
    #[serde(deserialize_with = "deserialize_rating")]
    pub rating: u8,
    pub comments: String,
    pub timestamp: String,
}

impl FeedbackRecord {
    #[must_use]
    pub fn sentiment(&self) -> Sentiment {
        derive_sentiment(&self.comments, self.rating)
    }
}

// Older pages stored the star's `data-value` attribute, so ratings may be strings.
fn deserialize_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRating {
        Number(u64),
        Text(String),
    }

    let raw = RawRating::deserialize(deserializer)?;
    let value = match raw {
        RawRating::Number(value) => value,
        RawRating::Text(text) => text
            .trim()
            .parse::<u64>()
            .map_err(|error| serde::de::Error::custom(format!("invalid rating '{text}': {error}")))?,
    };
    u8::try_from(value.min(u64::from(MAX_RATING)))
        .map_err(|error| serde::de::Error::custom(error.to_string()))
}

/// RFC 3339 UTC timestamp for a host wall-clock reading in epoch milliseconds.
#[must_use]
pub fn format_timestamp(now_ms: u64) -> String {
    i64::try_from(now_ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarState {
    Off,
    Lit,
}

/// Star control: a committed rating plus an optional hover preview. Zero means
/// no star picked yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StarRating {
    committed: u8,
    preview: Option<u8>,
}

impl StarRating {
    pub fn set(&mut self, value: u8) -> u8 {
        self.committed = value.clamp(MIN_RATING, MAX_RATING);
        self.preview = None;
        self.committed
    }

    pub fn hover(&mut self, value: u8) {
        self.preview = Some(value.min(MAX_RATING));
    }

    pub fn end_hover(&mut self) {
        self.preview = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn value(&self) -> u8 {
        self.committed
    }

    pub fn star_states(&self) -> [StarState; STAR_COUNT] {
        let lit = usize::from(self.preview.unwrap_or(self.committed));
        std::array::from_fn(|index| if index < lit { StarState::Lit } else { StarState::Off })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub record: FeedbackRecord,
    pub sentiment: Sentiment,
    pub summary: String,
    pub total_records: usize,
}

/// Append-only list of submissions mirrored to `feedbackData`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackRecorder {
    records: Vec<FeedbackRecord>,
}

impl FeedbackRecorder {
    /// Reads the persisted list. A value that does not parse is treated as empty.
    pub fn load<S: KeyValueStore>(store: &FallbackStore<S>) -> Self {
        let Some(raw) = store.get(FEEDBACK_STORAGE_KEY) else {
            return Self::default();
        };
        match serde_json::from_str::<Vec<FeedbackRecord>>(&raw) {
            Ok(records) => Self { records },
            Err(error) => {
                warn!(key = FEEDBACK_STORAGE_KEY, %error, "ignoring unreadable stored feedback");
                Self::default()
            }
        }
    }

    pub fn append<S: KeyValueStore>(
        &mut self,
        store: &mut FallbackStore<S>,
        fields: FeedbackFields,
        rating: u8,
        now_ms: u64,
    ) -> Result<SubmissionReceipt, StorageError> {
        let record = FeedbackRecord {
            name: fields.name,
            email: fields.email,
            service_type: fields.service_type,
            rating,
            comments: fields.comments,
            timestamp: format_timestamp(now_ms),
        };
        self.records.push(record.clone());
        let serialized = match self.serialize() {
            Ok(serialized) => serialized,
            Err(error) => {
                self.records.pop();
                return Err(error);
            }
        };
        store.set(FEEDBACK_STORAGE_KEY, &serialized);

        let sentiment = record.sentiment();
        Ok(SubmissionReceipt {
            summary: summary_text(sentiment),
            sentiment,
            record,
            total_records: self.records.len(),
        })
    }

    pub fn serialize(&self) -> Result<String, StorageError> {
        serde_json::to_string(&self.records).map_err(|error| StorageError::Serialize {
            key: FEEDBACK_STORAGE_KEY.to_string(),
            reason: error.to_string(),
        })
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
