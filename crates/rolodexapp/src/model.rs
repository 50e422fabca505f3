//! # Domain Model: Fields, Addresses, and Records
//!
//! This module defines the validated field types and the [`Record`] aggregate.
//!
//! ## Validated fields
//!
//! Every field kind is its own newtype with a construction-time validator:
//!
//! - [`Name`]: any non-empty string.
//! - [`Phone`]: exactly 9 decimal digits, no separators.
//! - [`Email`]: `local@domain.tld` shape (alphanumeric/`_.+-` local part,
//!   domain with at least one dot).
//! - [`Birthday`]: a strict `YYYY-MM-DD` calendar date. `2023-02-30` is
//!   rejected, not clamped.
//! - [`Tag`], [`Note`]: bare labels and free text, never validated.
//!
//! Validation happens **only** at construction. A failed constructor returns
//! [`RolodexError::Validation`] with the field kind and the offending input;
//! it never panics. The validated newtypes also deserialize through their
//! constructors (`try_from = "String"`), so a snapshot file cannot smuggle an
//! invalid phone or email back into the store.
//!
//! ## Records
//!
//! A [`Record`] holds one name, ordered collections of phones, emails, tags,
//! and notes (duplicates permitted, insertion order preserved across edits),
//! plus an optional birthday and at most one postal [`Address`].
//!
//! The record's identifier is deliberately *not* a field here: only the
//! [`AddressBook`](crate::book::AddressBook) maps ids to records, so a record
//! cannot carry a stale id or live under two ids at once.
//!
//! ## Edit semantics
//!
//! `remove_*` drops the first value-equal entry and returns `false` when the
//! value is absent (an explicit no-op, not an error). `edit_*` is remove
//! followed by add: the replacement always lands at the **end** of the
//! sequence, and the other entries keep their relative order.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RolodexError};

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{9}$").unwrap());
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9-.]+$").unwrap());
// chrono's %m/%d accept non-padded numbers; the shape gate keeps the
// parse strict.
static BIRTHDAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// The closed set of field kinds, used for validation error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Name,
    Phone,
    Email,
    Birthday,
    Tag,
    Note,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldKind::Name => "name",
            FieldKind::Phone => "phone number",
            FieldKind::Email => "email address",
            FieldKind::Birthday => "birthday",
            FieldKind::Tag => "tag",
            FieldKind::Note => "note",
        };
        f.write_str(label)
    }
}

fn invalid(kind: FieldKind, input: impl Into<String>) -> RolodexError {
    RolodexError::Validation {
        kind,
        input: input.into(),
    }
}

// --- Name ---

/// A contact's display name. Any non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(invalid(FieldKind::Name, raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = RolodexError;

    fn try_from(raw: String) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Phone ---

/// A phone number: exactly 9 decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if !PHONE_RE.is_match(&raw) {
            return Err(invalid(FieldKind::Phone, raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Phone {
    type Error = RolodexError;

    fn try_from(raw: String) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Email ---

/// An email address: `local@domain.tld` shaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if !EMAIL_RE.is_match(&raw) {
            return Err(invalid(FieldKind::Email, raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = RolodexError;

    fn try_from(raw: String) -> Result<Self> {
        Self::new(raw)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Birthday ---

/// A birth date, parsed strictly from `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub fn new(raw: &str) -> Result<Self> {
        if !BIRTHDAY_RE.is_match(raw) {
            return Err(invalid(FieldKind::Birthday, raw));
        }
        NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT)
            .map(Self)
            .map_err(|_| invalid(FieldKind::Birthday, raw))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl TryFrom<String> for Birthday {
    type Error = RolodexError;

    fn try_from(raw: String) -> Result<Self> {
        Self::new(&raw)
    }
}

impl From<Birthday> for String {
    fn from(birthday: Birthday) -> Self {
        birthday.0.format(BIRTHDAY_FORMAT).to_string()
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BIRTHDAY_FORMAT))
    }
}

// --- Tag / Note ---

/// A bare label. Not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form text attached to a record. Not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Note(String);

impl Note {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Address ---

/// A postal address. A record holds at most one; assigning a new one
/// replaces the previous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.street, self.city, self.postal_code, self.country
        )
    }
}

// --- Record ---

/// One contact: a name plus ordered collections of phones, emails, tags, and
/// notes, an optional birthday, and an optional address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    #[serde(default)]
    phones: Vec<Phone>,
    #[serde(default)]
    emails: Vec<Email>,
    #[serde(default)]
    birthday: Option<Birthday>,
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    notes: Vec<Note>,
}

impl Record {
    pub fn new(name: Name, birthday: Option<Birthday>) -> Self {
        Self {
            name,
            phones: Vec::new(),
            emails: Vec::new(),
            birthday,
            address: None,
            tags: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn birthday(&self) -> Option<Birthday> {
        self.birthday
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Replaces the name wholesale.
    pub fn edit_name(&mut self, name: Name) {
        self.name = name;
    }

    pub fn set_birthday(&mut self, birthday: Birthday) {
        self.birthday = Some(birthday);
    }

    /// Assigns the address, replacing any existing one.
    pub fn set_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    pub fn add_phone(&mut self, phone: Phone) {
        self.phones.push(phone);
    }

    /// Removes the first phone equal to `phone`. Returns `false` when absent.
    pub fn remove_phone(&mut self, phone: &Phone) -> bool {
        remove_first(&mut self.phones, phone)
    }

    /// Remove-then-add: the replacement is appended at the end of the
    /// sequence, not slotted into the old position. Returns `false` (and adds
    /// nothing) when `old` is absent.
    pub fn edit_phone(&mut self, old: &Phone, new: Phone) -> bool {
        if self.remove_phone(old) {
            self.add_phone(new);
            true
        } else {
            false
        }
    }

    pub fn add_email(&mut self, email: Email) {
        self.emails.push(email);
    }

    pub fn remove_email(&mut self, email: &Email) -> bool {
        remove_first(&mut self.emails, email)
    }

    pub fn edit_email(&mut self, old: &Email, new: Email) -> bool {
        if self.remove_email(old) {
            self.add_email(new);
            true
        } else {
            false
        }
    }

    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        remove_first(&mut self.tags, tag)
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn remove_note(&mut self, note: &Note) -> bool {
        remove_first(&mut self.notes, note)
    }

    pub fn edit_note(&mut self, old: &Note, new: Note) -> bool {
        if self.remove_note(old) {
            self.add_note(new);
            true
        } else {
            false
        }
    }

    /// Overwrites the tag at `index` in place, keeping its position.
    /// Positional edits take the label verbatim, without a validator.
    pub fn set_tag_at(&mut self, index: usize, raw: impl Into<String>) -> Result<()> {
        let len = self.tags.len();
        match self.tags.get_mut(index) {
            Some(slot) => {
                *slot = Tag::new(raw);
                Ok(())
            }
            None => Err(RolodexError::IndexOutOfRange { index, len }),
        }
    }

    /// Overwrites the note at `index` in place, keeping its position.
    pub fn set_note_at(&mut self, index: usize, raw: impl Into<String>) -> Result<()> {
        let len = self.notes.len();
        match self.notes.get_mut(index) {
            Some(slot) => {
                *slot = Note::new(raw);
                Ok(())
            }
            None => Err(RolodexError::IndexOutOfRange { index, len }),
        }
    }

    /// Whole days until the next occurrence of the birthday's month/day,
    /// measured from `now`. Returns `None` when no birthday is set.
    ///
    /// The candidate is the birthday in `now`'s year; if that midnight is
    /// strictly before `now`, the candidate advances a year. The duration is
    /// truncated to whole days, so a partial day still to run does not count.
    /// A Feb-29 birthday falls back to Mar 1 in non-leap years.
    pub fn days_to_birthday(&self, now: NaiveDateTime) -> Option<i64> {
        let birthday = self.birthday?.date();
        let this_year = now.date().year();
        let mut candidate = birthday_in_year(birthday, this_year);
        if candidate.and_time(NaiveTime::MIN) < now {
            candidate = birthday_in_year(birthday, this_year + 1);
        }
        Some((candidate.and_time(NaiveTime::MIN) - now).num_days())
    }
}

fn birthday_in_year(birthday: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .expect("March 1st exists in every year")
}

fn remove_first<T: PartialEq>(items: &mut Vec<T>, value: &T) -> bool {
    match items.iter().position(|item| item == value) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}", self.name)?;
        write!(f, ", Phones: {}", join(&self.phones))?;
        write!(f, ", Emails: {}", join(&self.emails))?;
        if let Some(birthday) = &self.birthday {
            write!(f, ", Birthday: {}", birthday)?;
        }
        write!(f, ", Tags: {}", join(&self.tags))?;
        if let Some(address) = &self.address {
            write!(f, "\nAddress: {}", address)?;
        }
        if !self.notes.is_empty() {
            write!(f, "\nNotes: {}", join(&self.notes))?;
        }
        Ok(())
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(T::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
