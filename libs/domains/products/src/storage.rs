//! BSON representation of product ids and timestamps
//!
//! JSON keeps the usual string forms. BSON serializers report themselves as
//! not human-readable, and there ids become binary UUIDs (subtype 4) and
//! timestamps become BSON dates with millisecond precision.

use chrono::{DateTime, Utc};
use mongodb::bson;
use uuid::Uuid;

/// Stored form of an id, as used in `_id` filters
pub fn stored_uuid(id: Uuid) -> bson::Uuid {
    bson::Uuid::from_bytes(*id.as_bytes())
}

/// Stored form of a timestamp
pub fn stored_datetime(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

pub mod uuid_as_binary {
    use super::stored_uuid;
    use mongodb::bson;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            id.serialize(serializer)
        } else {
            stored_uuid(*id).serialize(serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        if deserializer.is_human_readable() {
            Uuid::deserialize(deserializer)
        } else {
            bson::Uuid::deserialize(deserializer).map(|id| Uuid::from_bytes(id.bytes()))
        }
    }
}

pub mod datetime_as_bson {
    use super::stored_datetime;
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            at.serialize(serializer)
        } else {
            stored_datetime(*at).serialize(serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        if deserializer.is_human_readable() {
            return DateTime::<Utc>::deserialize(deserializer);
        }

        let millis = bson::DateTime::deserialize(deserializer)?.timestamp_millis();
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| D::Error::custom(format!("timestamp {millis} is out of range")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_uuid_keeps_bytes() {
        let id = Uuid::now_v7();
        assert_eq!(stored_uuid(id).bytes(), *id.as_bytes());
    }

    #[test]
    fn test_stored_datetime_is_millisecond_precision() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(stored_datetime(at).timestamp_millis(), 1_700_000_000_123);
    }
}
