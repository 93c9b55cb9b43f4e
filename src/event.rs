//! Celebration events derived from the contact list.
//!
//! Derivation is a pure pass over the contacts: any birthday or anniversary
//! whose month matches the reference date yields one event. Events are a view,
//! never stored authoritatively.

use crate::contact::Contact;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The two recognized celebration types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Birthday,
    Anniversary,
}

impl EventKind {
    /// Suffix appended to the contact id to form the event id.
    pub fn id_suffix(self) -> &'static str {
        match self {
            EventKind::Birthday => "bday",
            EventKind::Anniversary => "anniv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EventKind::Birthday => "Birthday",
            EventKind::Anniversary => "Anniversary",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Sent,
}

/// A single celebration occurring in the current month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelebrationEvent {
    /// Composed from the contact id and the event kind, e.g. `<uuid>-bday`.
    pub id: String,
    pub contact_id: uuid::Uuid,
    pub contact_name: String,
    pub phone: String,
    pub kind: EventKind,
    /// Month-day portion of the source date, e.g. "05-15".
    pub date: String,
    pub status: EventStatus,
    pub generated_message: Option<String>,
}

impl CelebrationEvent {
    fn new(contact: &Contact, kind: EventKind, date: &str) -> Self {
        Self {
            id: format!("{}-{}", contact.id, kind.id_suffix()),
            contact_id: contact.id,
            contact_name: contact.name.clone(),
            phone: contact.phone.clone(),
            kind,
            date: month_day(date).to_string(),
            status: EventStatus::Pending,
            generated_message: None,
        }
    }
}

/// Derives this month's events from the contact list.
///
/// Each contact contributes at most one event per date field, and only when
/// that field's month component equals the month of `today`. Output order
/// follows the contact list; callers sort for display.
pub fn derive_events(contacts: &[Contact], today: NaiveDate) -> Vec<CelebrationEvent> {
    let current_month = format!("{:02}", today.month());
    let mut events = Vec::new();

    for contact in contacts {
        if let Some(birthday) = &contact.birthday {
            if month_of(birthday) == current_month {
                events.push(CelebrationEvent::new(contact, EventKind::Birthday, birthday));
            }
        }
        if let Some(anniversary) = &contact.anniversary {
            if month_of(anniversary) == current_month {
                events.push(CelebrationEvent::new(contact, EventKind::Anniversary, anniversary));
            }
        }
    }
    events
}

/// "MM" component of a "YYYY-MM-DD" string.
fn month_of(date: &str) -> &str {
    date.get(5..7).unwrap_or("")
}

/// "MM-DD" suffix of a "YYYY-MM-DD" string.
fn month_day(date: &str) -> &str {
    date.get(5..).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{ContactBook, ContactDraft};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn book_with(entries: &[(&str, Option<&str>, Option<&str>)]) -> ContactBook {
        let mut book = ContactBook::new();
        for (name, birthday, anniversary) in entries {
            let mut draft = ContactDraft::new(name, "+15551234567");
            draft.birthday = birthday.map(String::from);
            draft.anniversary = anniversary.map(String::from);
            book.add(draft).unwrap();
        }
        book
    }

    fn may_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 15).unwrap()
    }

    #[test]
    fn test_birthday_in_current_month_yields_one_event() {
        let book = book_with(&[("Alex", Some("1992-05-15"), None)]);
        let events = derive_events(book.contacts(), may_15());

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.kind, EventKind::Birthday);
        assert_eq!(event.date, "05-15");
        assert_eq!(event.contact_name, "Alex");
        assert_eq!(event.status, EventStatus::Pending);
        assert_eq!(event.generated_message, None);
        assert_eq!(event.id, format!("{}-bday", event.contact_id));
    }

    #[test]
    fn test_contact_without_dates_yields_nothing() {
        let book = book_with(&[("Alex", None, None)]);
        assert!(derive_events(book.contacts(), may_15()).is_empty());
    }

    #[test_case("1992-04-15", 0; "month before")]
    #[test_case("1992-06-01", 0; "month after")]
    #[test_case("1992-05-01", 1; "first of month")]
    #[test_case("1992-05-31", 1; "last of month")]
    fn test_month_boundary(birthday: &str, expected: usize) {
        let book = book_with(&[("Alex", Some(birthday), None)]);
        assert_eq!(derive_events(book.contacts(), may_15()).len(), expected);
    }

    #[test]
    fn test_unpadded_input_date_still_matches_its_month() {
        let book = book_with(&[("Alex", Some("1992-5-15"), None)]);
        let events = derive_events(book.contacts(), may_15());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, "05-15");
    }

    #[test]
    fn test_contact_with_both_dates_in_month_yields_two_events() {
        let book = book_with(&[("Jordan", Some("1995-05-05"), Some("2021-05-12"))]);
        let events = derive_events(book.contacts(), may_15());

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Birthday);
        assert_eq!(events[1].kind, EventKind::Anniversary);
        assert_eq!(events[0].contact_id, events[1].contact_id);
        assert!(events[0].id.ends_with("-bday"));
        assert!(events[1].id.ends_with("-anniv"));
    }

    #[test]
    fn test_anniversary_only_match() {
        let book = book_with(&[("Sarah", None, Some("2018-05-22"))]);
        let events = derive_events(book.contacts(), may_15());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Anniversary);
        assert_eq!(events[0].date, "05-22");
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let book = book_with(&[
            ("Alex", Some("1992-05-15"), None),
            ("Sarah", None, Some("2018-05-22")),
            ("Quiet", None, None),
        ]);
        let first = derive_events(book.contacts(), may_15());
        let second = derive_events(book.contacts(), may_15());
        assert_eq!(first, second);
    }

    #[test]
    fn test_each_matching_contact_contributes_exactly_one_birthday_event() {
        let book = book_with(&[
            ("A", Some("1990-05-01"), None),
            ("B", Some("1991-05-02"), None),
            ("C", Some("1992-11-03"), None),
        ]);
        let events = derive_events(book.contacts(), may_15());

        for contact in book.contacts() {
            let matching: Vec<_> = events
                .iter()
                .filter(|e| e.contact_id == contact.id && e.kind == EventKind::Birthday)
                .collect();
            match contact.birthday.as_deref() {
                Some(b) if &b[5..7] == "05" => {
                    assert_eq!(matching.len(), 1);
                    assert_eq!(matching[0].date, &b[5..]);
                }
                _ => assert!(matching.is_empty()),
            }
        }
    }
}
