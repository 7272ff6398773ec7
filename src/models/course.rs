use crate::error::InvalidCourse;

/// A persisted course. Fields are private and only reachable through
/// `Course::new`, so an invalid instance is never observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: String,
    name: String,
    length: i64,
    url: String,
    notes: Option<String>,
}

impl Course {
    pub fn new(
        id: String,
        name: String,
        length: i64,
        url: String,
        notes: Option<String>,
    ) -> Result<Self, InvalidCourse> {
        if id.trim().is_empty() {
            return Err(InvalidCourse::BlankId);
        }
        if name.trim().is_empty() {
            return Err(InvalidCourse::BlankName);
        }
        if url.trim().is_empty() {
            return Err(InvalidCourse::BlankUrl);
        }
        if length <= 0 {
            return Err(InvalidCourse::NonPositiveLength(length));
        }
        if let Some(notes) = &notes {
            if notes.trim().is_empty() {
                return Err(InvalidCourse::BlankNotes);
            }
        }

        Ok(Self {
            id,
            name,
            length,
            url,
            notes,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Course length in whole minutes.
    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
