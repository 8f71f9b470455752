//! Review request model and its git note encoding
//!
//! A review request is stored as a single-line JSON document in a git note:
//!
//! ```json
//! {"reviewRef":"refs/heads/feature","targetRef":"refs/heads/main","reviewers":["alice"]}
//! ```
//!
//! Empty optional fields are left out of the document. The notes ref is
//! shared with other kinds of metadata, so bulk parsing skips anything that
//! is not a request instead of failing.
//!
//! Keys are matched exactly as written above; `TargetRef` is an unknown key,
//! not an alias of `targetRef`.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::repository::{Note, NotesRef};
use crate::{Error, Result};

/// Notes ref that holds review requests
pub const NOTES_REF: &str = "refs/notes/devtools/reviews";

/// The notes ref that review requests are expected under
pub fn reviews_ref() -> NotesRef {
    NotesRef::new(NOTES_REF)
}

/// A request to review a change
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Ref of the change under review
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub review_ref: String,

    /// Ref the change is proposed to land on
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_ref: String,

    /// Who opened the request
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub requester: String,

    /// Who is asked to review
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub reviewers: Vec<String>,

    /// Free-form description of the change
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Request {
    /// Create a new request targeting the given ref
    pub fn new(target_ref: impl Into<String>) -> Self {
        Self {
            target_ref: target_ref.into(),
            ..Self::default()
        }
    }

    /// Set the ref under review
    pub fn with_review_ref(mut self, review_ref: impl Into<String>) -> Self {
        self.review_ref = review_ref.into();
        self
    }

    /// Set the requester
    pub fn with_requester(mut self, requester: impl Into<String>) -> Self {
        self.requester = requester.into();
        self
    }

    /// Set the reviewers
    pub fn with_reviewers<I, S>(mut self, reviewers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reviewers = reviewers.into_iter().map(Into::into).collect();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// A request is only meaningful once it names a target ref
    pub fn is_valid(&self) -> bool {
        !self.target_ref.is_empty()
    }

    /// Decode a request from a note
    ///
    /// Only checks structure: unknown keys are ignored, missing keys become
    /// empty values, and a request without a target ref still decodes.
    /// A repeated key keeps its last value, and a bare `null` decodes to an
    /// empty request.
    pub fn decode(note: &Note) -> Result<Self> {
        let value: Value = serde_json::from_slice(note.as_bytes()).map_err(Error::Decode)?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Self::deserialize(value).map_err(Error::Decode),
            _ => Err(Error::Decode(serde_json::Error::custom(
                "expected a JSON object",
            ))),
        }
    }

    /// Encode this request as a single-line JSON note
    ///
    /// Does not check [`is_valid`](Self::is_valid).
    pub fn encode(&self) -> Result<Note> {
        serde_json::to_vec(self).map(Note::from).map_err(Error::Encode)
    }
}

/// Decode every note that holds a valid review request
///
/// Notes that fail to decode, or decode without a target ref, are skipped.
/// The relative order of the surviving requests matches `notes`.
pub fn decode_all_valid(notes: &[Note]) -> Vec<Request> {
    notes
        .iter()
        .filter_map(|note| match Request::decode(note) {
            Ok(request) => Some(request),
            Err(e) => {
                debug!(error = %e, "Skipping note that is not a review request");
                None
            }
        })
        .filter(|request| {
            let valid = request.is_valid();
            if !valid {
                debug!(?request, "Skipping review request without a target ref");
            }
            valid
        })
        .collect()
}
