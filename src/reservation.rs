//! Table reservation form.
//!
//! Validation mirrors what the browser checks on the form fields. A valid
//! submission only produces a confirmation message; nothing is sent anywhere.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use tracing::info;

use crate::constants::INVALID_RESERVATION;

pub const MAX_GUESTS: u8 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("phone must be 7 to 15 digits, spaces, '+' or '-'")]
    InvalidPhone,
    #[error("date must be YYYY-MM-DD")]
    InvalidDate,
    #[error("time must be HH:MM")]
    InvalidTime,
    #[error("guests must be between 1 and 8")]
    InvalidGuests,
}

/// Raw field values as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationForm {
    pub name: String,
    pub phone: String,
    pub date: String,
    pub time: String,
    pub guests: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub name: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u8,
    pub notes: Option<String>,
}

// Blank after trimming counts as missing, unlike the browser's `required`
fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ReservationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ReservationError::Missing(field))
    } else {
        Ok(value)
    }
}

fn valid_phone(phone: &str) -> bool {
    let count = phone.chars().count();
    (7..=15).contains(&count)
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c.is_whitespace())
}

impl ReservationForm {
    pub fn validate(&self) -> Result<Reservation, ReservationError> {
        let name = required(&self.name, "name")?;

        // The pattern applies to the raw value, surrounding spaces included
        required(&self.phone, "phone")?;
        if !valid_phone(&self.phone) {
            return Err(ReservationError::InvalidPhone);
        }

        let date = NaiveDate::parse_from_str(required(&self.date, "date")?, "%Y-%m-%d")
            .map_err(|_| ReservationError::InvalidDate)?;
        let time = NaiveTime::parse_from_str(required(&self.time, "time")?, "%H:%M")
            .map_err(|_| ReservationError::InvalidTime)?;

        let guests = required(&self.guests, "guests")?
            .parse::<u8>()
            .ok()
            .filter(|g| (1..=MAX_GUESTS).contains(g))
            .ok_or(ReservationError::InvalidGuests)?;

        let notes = Some(self.notes.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Reservation {
            name: name.to_string(),
            phone: self.phone.clone(),
            date,
            time,
            guests,
            notes,
        })
    }

    pub fn clear(&mut self) {
        *self = ReservationForm::default();
    }
}

/// Holds the status line shown under the form.
#[derive(Debug, Default)]
pub struct ReservationDesk {
    message: Option<String>,
    last: Option<Reservation>,
}

impl ReservationDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn last_reservation(&self) -> Option<&Reservation> {
        self.last.as_ref()
    }

    /// Validates and acknowledges a submission. The form is reset only when
    /// it was accepted.
    pub fn submit(&mut self, form: &mut ReservationForm) -> Result<&Reservation, ReservationError> {
        match form.validate() {
            Ok(reservation) => {
                info!(
                    guests = reservation.guests,
                    date = %reservation.date,
                    time = %reservation.time,
                    "reservation received"
                );
                self.message = Some(format!(
                    "Reservation received! We will confirm shortly on {}.",
                    reservation.phone
                ));
                form.clear();
                Ok(&*self.last.insert(reservation))
            }
            Err(e) => {
                info!(reason = %e, "reservation rejected");
                self.message = Some(INVALID_RESERVATION.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ReservationForm {
        ReservationForm {
            name: "Afreen K.".into(),
            phone: "+91 98765-43210".into(),
            date: "2026-11-02".into(),
            time: "19:30".into(),
            guests: "4".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn valid_form_is_parsed() {
        let r = filled().validate().unwrap();
        assert_eq!(r.name, "Afreen K.");
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());
        assert_eq!(r.time, NaiveTime::from_hms_opt(19, 30, 0).unwrap());
        assert_eq!(r.guests, 4);
        assert_eq!(r.notes, None);
    }

    #[test]
    fn missing_fields_are_reported_in_form_order() {
        let mut form = filled();
        form.name = "   ".into();
        form.guests.clear();
        assert_eq!(form.validate(), Err(ReservationError::Missing("name")));
    }

    #[test]
    fn phone_pattern() {
        for ok in ["9999999", "+91 99999 99999", "040-2345-678"] {
            assert!(valid_phone(ok), "{ok}");
        }
        for bad in ["123456", "1234567890123456", "99999x99", "(040) 2345678"] {
            assert!(!valid_phone(bad), "{bad}");
        }
    }

    #[test]
    fn bad_date_time_and_guests() {
        let mut form = filled();
        form.date = "02/11/2026".into();
        assert_eq!(form.validate(), Err(ReservationError::InvalidDate));

        let mut form = filled();
        form.time = "7pm".into();
        assert_eq!(form.validate(), Err(ReservationError::InvalidTime));

        for guests in ["0", "9", "two"] {
            let mut form = filled();
            form.guests = guests.into();
            assert_eq!(form.validate(), Err(ReservationError::InvalidGuests));
        }
    }

    #[test]
    fn notes_are_optional_and_trimmed() {
        let mut form = filled();
        form.notes = "  window seat \n".into();
        assert_eq!(form.validate().unwrap().notes.as_deref(), Some("window seat"));
    }

    #[test]
    fn accepted_submission_confirms_and_resets() {
        let mut desk = ReservationDesk::new();
        let mut form = filled();

        desk.submit(&mut form).unwrap();
        assert_eq!(
            desk.message(),
            Some("Reservation received! We will confirm shortly on +91 98765-43210.")
        );
        assert_eq!(form, ReservationForm::default());
        assert_eq!(desk.last_reservation().unwrap().guests, 4);
    }

    #[test]
    fn rejected_submission_keeps_the_form() {
        let mut desk = ReservationDesk::new();
        let mut form = filled();
        form.phone = "12".into();

        assert_eq!(desk.submit(&mut form), Err(ReservationError::InvalidPhone));
        assert_eq!(desk.message(), Some(INVALID_RESERVATION));
        assert_eq!(form.phone, "12");
        assert!(desk.last_reservation().is_none());
    }
}
