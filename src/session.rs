//! Session state: the contact book plus the event list derived from it.
//!
//! All mutation goes through this controller so the event list is explicitly
//! re-derived after every contact change. Callers pass the reference date in,
//! which keeps derivation deterministic under test.

use crate::contact::{Contact, ContactBook, ContactDraft, ContactError, ContactPatch};
use crate::event::{derive_events, CelebrationEvent, EventStatus};
use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

#[derive(Debug)]
pub struct Session {
    contacts: ContactBook,
    events: Vec<CelebrationEvent>,
}

impl Session {
    pub fn new(contacts: ContactBook, today: NaiveDate) -> Self {
        let mut session = Self { contacts, events: Vec::new() };
        session.refresh_events(today);
        session
    }

    pub fn contacts(&self) -> &ContactBook {
        &self.contacts
    }

    pub fn add_contact(
        &mut self,
        draft: ContactDraft,
        today: NaiveDate,
    ) -> Result<Contact, ContactError> {
        let added = self.contacts.add(draft)?.clone();
        self.refresh_events(today);
        Ok(added)
    }

    pub fn edit_contact(
        &mut self,
        id: Uuid,
        patch: ContactPatch,
        today: NaiveDate,
    ) -> Result<Contact, ContactError> {
        let edited = self.contacts.edit(id, patch)?.clone();
        self.refresh_events(today);
        Ok(edited)
    }

    pub fn remove_contact(&mut self, id: Uuid, today: NaiveDate) -> Result<Contact, ContactError> {
        let removed = self.contacts.remove(id)?;
        self.refresh_events(today);
        Ok(removed)
    }

    /// Re-derives the event list for the month of `today`.
    ///
    /// Generated messages and Sent status survive as long as the re-derived
    /// event keeps the same id and date. An event whose source date changed
    /// starts over as Pending with no message.
    pub fn refresh_events(&mut self, today: NaiveDate) {
        let mut fresh = derive_events(self.contacts.contacts(), today);
        for event in &mut fresh {
            if let Some(prior) =
                self.events.iter().find(|e| e.id == event.id && e.date == event.date)
            {
                event.status = prior.status;
                event.generated_message = prior.generated_message.clone();
            }
        }
        debug!("Refreshed events: {} for month of {}", fresh.len(), today);
        self.events = fresh;
    }

    pub fn events(&self) -> &[CelebrationEvent] {
        &self.events
    }

    /// Events ordered by date, then contact name. Listing and index lookup
    /// share this order, so the numbers shown are the numbers accepted.
    pub fn sorted_events(&self) -> Vec<&CelebrationEvent> {
        let mut events: Vec<&CelebrationEvent> = self.events.iter().collect();
        events.sort_by(|a, b| {
            a.date.cmp(&b.date).then_with(|| a.contact_name.cmp(&b.contact_name))
        });
        events
    }

    /// Looks up an event by its 1-based position in the sorted listing.
    pub fn event_at(&self, index: usize) -> Option<&CelebrationEvent> {
        if index == 0 {
            return None;
        }
        self.sorted_events().get(index - 1).copied()
    }

    /// Stores a freshly composed message on the event. Leaves status alone so
    /// regenerating after a send keeps the Sent marker.
    pub fn attach_message(&mut self, event_id: &str, message: String) -> Option<&CelebrationEvent> {
        let event = self.events.iter_mut().find(|e| e.id == event_id)?;
        event.generated_message = Some(message);
        Some(event)
    }

    pub fn mark_sent(&mut self, event_id: &str) -> Option<&CelebrationEvent> {
        let event = self.events.iter_mut().find(|e| e.id == event_id)?;
        event.status = EventStatus::Sent;
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn may_20() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
    }

    fn book_with(entries: &[(&str, &str, Option<&str>, Option<&str>)]) -> ContactBook {
        let mut book = ContactBook::new();
        for (name, phone, birthday, anniversary) in entries {
            let mut draft = ContactDraft::new(name, phone);
            draft.birthday = birthday.map(str::to_string);
            draft.anniversary = anniversary.map(str::to_string);
            book.add(draft).unwrap();
        }
        book
    }

    #[test]
    fn test_new_session_derives_current_month_events() {
        let book = book_with(&[
            ("Alex", "+11234567890", Some("1992-05-15"), None),
            ("Sarah", "+10987654321", None, Some("2018-10-22")),
        ]);
        let session = Session::new(book, may_20());

        assert_eq!(session.events().len(), 1);
        assert_eq!(session.events()[0].contact_name, "Alex");
    }

    #[test]
    fn test_add_contact_refreshes_events() {
        let mut session = Session::new(ContactBook::new(), may_20());
        assert!(session.events().is_empty());

        let mut draft = ContactDraft::new("Jordan", "+12223334444");
        draft.anniversary = Some("2021-05-12".to_string());
        session.add_contact(draft, may_20()).unwrap();

        assert_eq!(session.events().len(), 1);
        assert_eq!(session.events()[0].date, "05-12");
    }

    #[test]
    fn test_remove_contact_drops_its_events() {
        let book = book_with(&[("Alex", "+11234567890", Some("1992-05-15"), None)]);
        let mut session = Session::new(book, may_20());
        let contact_id = session.events()[0].contact_id;

        session.remove_contact(contact_id, may_20()).unwrap();

        assert!(session.events().is_empty());
    }

    #[test]
    fn test_message_and_status_survive_unrelated_edit() {
        let book = book_with(&[
            ("Alex", "+11234567890", Some("1992-05-15"), None),
            ("Dad", "+15551234444", Some("1965-05-10"), None),
        ]);
        let mut session = Session::new(book, may_20());
        let alex = session
            .events()
            .iter()
            .find(|e| e.contact_name == "Alex")
            .unwrap();
        let event_id = alex.id.clone();
        let contact_id = alex.contact_id;

        session.attach_message(&event_id, "Happy Birthday Alex!".to_string());
        session.mark_sent(&event_id);

        let patch = ContactPatch {
            relationship: Some("Best Friend".to_string()),
            ..Default::default()
        };
        session.edit_contact(contact_id, patch, may_20()).unwrap();

        let alex = session.events().iter().find(|e| e.id == event_id).unwrap();
        assert_eq!(alex.generated_message.as_deref(), Some("Happy Birthday Alex!"));
        assert_eq!(alex.status, EventStatus::Sent);
    }

    #[test]
    fn test_changed_date_resets_message_and_status() {
        let book = book_with(&[("Alex", "+11234567890", Some("1992-05-15"), None)]);
        let mut session = Session::new(book, may_20());
        let event_id = session.events()[0].id.clone();
        let contact_id = session.events()[0].contact_id;

        session.attach_message(&event_id, "old message".to_string());
        session.mark_sent(&event_id);

        let patch = ContactPatch {
            birthday: Some("1992-05-16".to_string()),
            ..Default::default()
        };
        session.edit_contact(contact_id, patch, may_20()).unwrap();

        let event = &session.events()[0];
        assert_eq!(event.id, event_id);
        assert_eq!(event.date, "05-16");
        assert_eq!(event.generated_message, None);
        assert_eq!(event.status, EventStatus::Pending);
    }

    #[test]
    fn test_sorted_events_order_by_date_then_name() {
        let book = book_with(&[
            ("Zoe", "+15550001111", Some("1990-05-03"), None),
            ("Amy", "+15550002222", Some("1991-05-03"), None),
            ("Ben", "+15550003333", Some("1989-05-01"), None),
        ]);
        let session = Session::new(book, may_20());

        let names: Vec<&str> =
            session.sorted_events().iter().map(|e| e.contact_name.as_str()).collect();
        assert_eq!(names, vec!["Ben", "Amy", "Zoe"]);
    }

    #[test]
    fn test_event_at_is_one_based() {
        let book = book_with(&[("Alex", "+11234567890", Some("1992-05-15"), None)]);
        let session = Session::new(book, may_20());

        assert!(session.event_at(0).is_none());
        assert_eq!(session.event_at(1).unwrap().contact_name, "Alex");
        assert!(session.event_at(2).is_none());
    }

    #[test]
    fn test_attach_message_on_unknown_event() {
        let mut session = Session::new(ContactBook::new(), may_20());
        assert!(session.attach_message("missing-bday", "hi".to_string()).is_none());
        assert!(session.mark_sent("missing-bday").is_none());
    }
}
