//! Student record as stored and as exchanged over HTTP (camelCase keys).

use serde::{Deserialize, Serialize};

/// A persisted student. `id` is assigned by the store and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Student fields without an id: the create payload, and the body of a PUT
/// before the path id is attached. Any `id` in the JSON is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewStudent {
    pub fn with_id(self, id: i64) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let s = Student {
            id: 1,
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@x.com".into(),
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"id": 1, "firstName": "Ann", "lastName": "Lee", "email": "ann@x.com"})
        );
    }

    #[test]
    fn new_student_ignores_id() {
        let body = br#"{"id": 99, "firstName": "Ann", "lastName": "Lee", "email": "ann@x.com"}"#;
        let parsed: NewStudent = serde_json::from_slice(body).unwrap();
        assert_eq!(parsed.clone().with_id(4).id, 4);
        assert_eq!(parsed.email, "ann@x.com");
    }

    #[test]
    fn new_student_requires_all_fields() {
        let body = br#"{"firstName": "Ann", "email": "ann@x.com"}"#;
        assert!(serde_json::from_slice::<NewStudent>(body).is_err());
    }
}
