use chrono::{DateTime, SecondsFormat, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::Id;

/// Column order of the annotation record file.
pub const ANNOTATION_HEADER: [&str; 4] = ["id", "labels", "notes", "timestamp"];

/// Separator used to fold the label list into a single record field.
///
/// Labels that themselves contain this character cannot be split back
/// unambiguously.
pub const LABEL_SEPARATOR: &str = ",";

/// Incoming annotation payload. Any client-side timestamp is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewAnnotation {
    pub id: Id,
    pub labels: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// An accepted annotation, stamped on receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub id: Id,
    pub labels: Vec<String>,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotationValidationError {
    #[error("id is required")]
    MissingId,
    #[error("At least one label is required")]
    NoLabels,
}

impl NewAnnotation {
    /// Presence checks only. The id is not checked against known examples.
    pub fn validate(&self) -> Result<(), AnnotationValidationError> {
        if self.id.is_empty() {
            return Err(AnnotationValidationError::MissingId);
        }
        if self.labels.is_empty() {
            return Err(AnnotationValidationError::NoLabels);
        }
        Ok(())
    }

    pub fn into_annotation(self, timestamp: DateTime<Utc>) -> Annotation {
        Annotation {
            id: self.id,
            labels: self.labels,
            notes: self.notes.unwrap_or_default(),
            timestamp,
        }
    }
}

impl Annotation {
    pub fn joined_labels(&self) -> String {
        self.labels.iter().join(LABEL_SEPARATOR)
    }

    /// Labels that will not survive a split of the joined field.
    pub fn ambiguous_labels(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .map(String::as_str)
            .filter(|label| label.contains(LABEL_SEPARATOR))
    }

    /// RFC 3339, whole seconds, `Z` suffix.
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Fields in `ANNOTATION_HEADER` order.
    pub fn to_record(&self) -> [String; 4] {
        [
            self.id.clone(),
            self.joined_labels(),
            self.notes.clone(),
            self.formatted_timestamp(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(id: &str, labels: &[&str], notes: Option<&str>) -> NewAnnotation {
        NewAnnotation {
            id: id.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_validate() {
        assert_eq!(request("1", &["clarity"], None).validate(), Ok(()));
        assert_eq!(
            request("", &["clarity"], None).validate(),
            Err(AnnotationValidationError::MissingId)
        );
        assert_eq!(
            request("1", &[], Some("hi")).validate(),
            Err(AnnotationValidationError::NoLabels)
        );
    }

    #[test]
    fn test_deserialize_request() {
        let req: NewAnnotation =
            serde_json::from_str(r#"{"id": "42", "labels": ["a", "b"]}"#).unwrap();
        assert_eq!(req, request("42", &["a", "b"], None));

        let req: NewAnnotation = serde_json::from_str(
            r#"{"id": "42", "labels": ["a"], "notes": null, "timestamp": "1999-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.notes, None);

        assert!(serde_json::from_str::<NewAnnotation>(r#"{"labels": ["a"]}"#).is_err());
        assert!(serde_json::from_str::<NewAnnotation>(r#"{"id": "1"}"#).is_err());
        assert!(serde_json::from_str::<NewAnnotation>(r#"{"id": "1", "labels": null}"#).is_err());
    }

    #[test]
    fn test_to_record() {
        let timestamp = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 5).unwrap();
        let annotation = request("42", &["a", "b"], Some("hi")).into_annotation(timestamp);

        assert_eq!(
            annotation.to_record(),
            [
                "42".to_string(),
                "a,b".to_string(),
                "hi".to_string(),
                "2026-10-18T09:30:05Z".to_string(),
            ]
        );
        assert_eq!(annotation.ambiguous_labels().count(), 0);
    }

    #[test]
    fn test_missing_notes_become_empty() {
        let annotation = request("7", &["clarity"], None).into_annotation(Utc::now());
        assert_eq!(annotation.notes, "");
    }

    #[test]
    fn test_ambiguous_labels() {
        let annotation = request("1", &["tone", "too long, rambling"], None).into_annotation(Utc::now());
        assert_eq!(
            annotation.ambiguous_labels().collect::<Vec<_>>(),
            vec!["too long, rambling"]
        );
        assert_eq!(annotation.joined_labels(), "tone,too long, rambling");
    }
}
