//! Contact storage for the celebration book.
//!
//! Contacts live in memory for the lifetime of a session; there is no backing
//! store. Dates are kept as "YYYY-MM-DD" strings so month matching stays a
//! plain substring comparison, but they are parsed and stored zero-padded on
//! the way in.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person we want to celebrate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub birthday: Option<String>,
    pub anniversary: Option<String>,
    pub relationship: Option<String>,
}

/// Input for creating a contact. Empty optional fields are treated as unset.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub birthday: Option<String>,
    pub anniversary: Option<String>,
    pub relationship: Option<String>,
}

impl ContactDraft {
    pub fn new(name: &str, phone: &str) -> Self {
        Self { name: name.to_string(), phone: phone.to_string(), ..Default::default() }
    }
}

/// Partial update for an existing contact. `None` leaves a field untouched;
/// an empty string clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<String>,
    pub anniversary: Option<String>,
    pub relationship: Option<String>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.birthday.is_none()
            && self.anniversary.is_none()
            && self.relationship.is_none()
    }
}

/// Errors raised by contact book operations.
#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("no contact matches '{0}'")]
    NotFound(String),
    #[error("'{0}' matches more than one contact; use the id")]
    Ambiguous(String),
}

/// In-memory contact list with CRUD operations.
#[derive(Debug, Default, Clone)]
pub struct ContactBook {
    contacts: Vec<Contact>,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A book pre-filled with the demo contacts shown on first launch.
    pub fn with_samples() -> Self {
        let samples = [
            ("Alex Thompson", "+11234567890", Some("1992-05-15"), None, Some("Best Friend")),
            ("Sarah Miller", "+10987654321", None, Some("2018-10-22"), Some("Sister")),
            ("Dad", "+15551234444", Some("1965-08-10"), None, Some("Parent")),
            ("Jordan Lee", "+12223334444", Some("1995-12-05"), Some("2021-06-12"), Some("Colleague")),
        ];
        let contacts = samples
            .into_iter()
            .map(|(name, phone, birthday, anniversary, relationship)| Contact {
                id: Uuid::new_v4(),
                name: name.to_string(),
                phone: phone.to_string(),
                birthday: birthday.map(String::from),
                anniversary: anniversary.map(String::from),
                relationship: relationship.map(String::from),
            })
            .collect();
        Self { contacts }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Validates the draft, assigns a fresh id and appends the contact.
    pub fn add(&mut self, draft: ContactDraft) -> Result<&Contact, ContactError> {
        if draft.name.trim().is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if draft.phone.trim().is_empty() {
            return Err(ContactError::MissingField("phone"));
        }
        let birthday = normalize_date(draft.birthday)?;
        let anniversary = normalize_date(draft.anniversary)?;

        let contact = Contact {
            id: Uuid::new_v4(),
            name: draft.name,
            phone: draft.phone,
            birthday,
            anniversary,
            relationship: normalize_label(draft.relationship),
        };
        self.contacts.push(contact);
        Ok(self.contacts.last().expect("just pushed"))
    }

    /// Merges the submitted fields into the contact with the given id.
    /// Unsubmitted fields are left exactly as they were.
    pub fn edit(&mut self, id: Uuid, patch: ContactPatch) -> Result<&Contact, ContactError> {
        // Validate before touching the stored contact so a failed edit is a no-op.
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(ContactError::MissingField("name"));
            }
        }
        if let Some(phone) = &patch.phone {
            if phone.trim().is_empty() {
                return Err(ContactError::MissingField("phone"));
            }
        }
        let birthday = patch.birthday.map(|d| normalize_date(Some(d))).transpose()?;
        let anniversary = patch.anniversary.map(|d| normalize_date(Some(d))).transpose()?;

        let contact = self
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ContactError::NotFound(id.to_string()))?;

        if let Some(name) = patch.name {
            contact.name = name;
        }
        if let Some(phone) = patch.phone {
            contact.phone = phone;
        }
        if let Some(date) = birthday {
            contact.birthday = date;
        }
        if let Some(date) = anniversary {
            contact.anniversary = date;
        }
        if let Some(label) = patch.relationship {
            contact.relationship = normalize_label(Some(label));
        }
        Ok(contact)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Contact, ContactError> {
        let index = self
            .contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ContactError::NotFound(id.to_string()))?;
        Ok(self.contacts.remove(index))
    }

    /// Resolves a user-supplied selector to a contact: a full id, a unique id
    /// prefix, or a unique case-insensitive name.
    pub fn resolve(&self, selector: &str) -> Result<&Contact, ContactError> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(ContactError::NotFound(selector.to_string()));
        }

        if let Ok(id) = Uuid::parse_str(selector) {
            if let Some(contact) = self.get(id) {
                return Ok(contact);
            }
        }

        let lowered = selector.to_lowercase();
        let prefix_matches: Vec<&Contact> =
            self.contacts.iter().filter(|c| c.id.to_string().starts_with(&lowered)).collect();
        match prefix_matches.as_slice() {
            [single] => return Ok(single),
            [] => {}
            _ => return Err(ContactError::Ambiguous(selector.to_string())),
        }

        let name_matches: Vec<&Contact> =
            self.contacts.iter().filter(|c| c.name.to_lowercase() == lowered).collect();
        match name_matches.as_slice() {
            [single] => Ok(single),
            [] => Err(ContactError::NotFound(selector.to_string())),
            _ => Err(ContactError::Ambiguous(selector.to_string())),
        }
    }
}

/// Case-insensitive name filter used by the list commands.
pub fn filter_by_name<'a>(contacts: &'a [Contact], term: &str) -> Vec<&'a Contact> {
    let term = term.to_lowercase();
    contacts.iter().filter(|c| c.name.to_lowercase().contains(&term)).collect()
}

fn normalize_date(value: Option<String>) -> Result<Option<String>, ContactError> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            // chrono accepts unpadded fields like "1992-5-15"; store the
            // re-formatted date so the byte-sliced month stays "MM".
            let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ContactError::InvalidDate(raw.to_string()))?;
            Ok(Some(parsed.format("%Y-%m-%d").to_string()))
        }
    }
}

fn normalize_label(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
