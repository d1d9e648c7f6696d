use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CINEMA_EPOCH_DAY, CINEMA_EPOCH_MONTH, CINEMA_EPOCH_YEAR, MAX_DESCRIPTION_LENGTH,
};

/// Film record as stored and returned by the API
///
/// `duration` travels over the wire as a whole number of minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub release_date: NaiveDate,
    #[serde(with = "duration_minutes")]
    pub duration: TimeDelta,
}

/// POST /films body. Fields are optional so that absent values are
/// reported as validation errors instead of decode failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFilm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    #[serde(default, with = "duration_minutes::option")]
    pub duration: Option<TimeDelta>,
}

/// PUT /films body: only supplied fields are considered for overwrite
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmPatch {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    #[serde(default, with = "duration_minutes::option")]
    pub duration: Option<TimeDelta>,
}

impl Film {
    /// The earliest release date a film may carry
    pub fn cinema_epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(CINEMA_EPOCH_YEAR, CINEMA_EPOCH_MONTH, CINEMA_EPOCH_DAY)
            .expect("cinema epoch is a valid calendar date")
    }

    /// Name must be present and not only whitespace
    pub fn validate_name(name: &str) -> bool {
        !name.trim().is_empty()
    }

    /// Description must not exceed MAX_DESCRIPTION_LENGTH characters
    pub fn validate_description(description: &str) -> bool {
        description.chars().count() <= MAX_DESCRIPTION_LENGTH
    }

    /// Release date must not precede the cinema epoch (the epoch itself is allowed)
    pub fn validate_release_date(release_date: NaiveDate) -> bool {
        release_date >= Self::cinema_epoch()
    }

    /// Duration must be strictly positive
    pub fn validate_duration(duration: TimeDelta) -> bool {
        duration > TimeDelta::zero()
    }
}

/// Serde adapter storing a `TimeDelta` as whole minutes
pub mod duration_minutes {
    use chrono::TimeDelta;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_minutes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let minutes = i64::deserialize(deserializer)?;
        TimeDelta::try_minutes(minutes)
            .ok_or_else(|| D::Error::custom(format!("duration out of range: {minutes} minutes")))
    }

    pub mod option {
        use chrono::TimeDelta;
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<TimeDelta>, D::Error> {
            #[derive(Deserialize)]
            struct Minutes(#[serde(with = "super")] TimeDelta);

            Ok(Option::<Minutes>::deserialize(deserializer)?.map(|Minutes(d)| d))
        }
    }
}
