//! Typed field sets decoded from submitted forms
//!
//! The same field set is used for insert and update: an update rewrites every
//! mutable column, so a field missing from the submission is written as its
//! empty/false default.

use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::catalog;
use crate::model::{Artist, Venue};
use crate::validation::{ValidationError, ValidationErrors};

/// Maximum length for venue and artist names
pub const MAX_NAME_LEN: usize = 120;

/// Maximum length for free-text fields
const MAX_TEXT_LEN: usize = 500;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("invalid url regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ().-]{5,23}[0-9]$").expect("invalid phone regex"));

/// Accepted `start_time` layouts besides RFC 3339, read as UTC
const START_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Decoded `application/x-www-form-urlencoded` body.
///
/// Keeps every pair in submission order so repeated keys (`genres`) survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair (builder style, mostly for tests).
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.pairs.push((key.to_owned(), value.to_owned()));
        self
    }

    /// First value submitted under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed text value, empty when absent.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(str::trim).unwrap_or_default().to_owned()
    }

    /// Every non-empty value submitted under `key`, in order.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_owned())
            .collect()
    }

    /// Checkbox value: only an explicit "y" (or on/true/1) counts as checked.
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.get(key).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("y" | "yes" | "on" | "true" | "1")
        )
    }
}

/// Mutable columns of a venue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueFields {
    /// Read every field, defaulting the missing ones. Does not validate.
    pub fn from_form(form: &FormData) -> Self {
        Self {
            name: form.text("name"),
            city: form.text("city"),
            state: form.text("state"),
            address: form.text("address"),
            phone: form.text("phone"),
            image_link: form.text("image_link"),
            facebook_link: form.text("facebook_link"),
            website: form.text("website_link"),
            genres: form.all("genres"),
            seeking_talent: form.flag("seeking_talent"),
            seeking_description: form.text("seeking_description"),
        }
    }

    /// Decode and validate a venue submission.
    pub fn parse(form: &FormData) -> Result<Self, ValidationErrors> {
        let fields = Self::from_form(form);
        fields.validate()?;
        Ok(fields)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_listing(
            &mut errors,
            Listing {
                name: &self.name,
                city: &self.city,
                state: &self.state,
                phone: &self.phone,
                image_link: &self.image_link,
                facebook_link: &self.facebook_link,
                website: &self.website,
                genres: &self.genres,
                seeking_description: &self.seeking_description,
            },
        );
        errors.check(required("address", &self.address));
        errors.check(max_len("address", &self.address, MAX_TEXT_LEN));
        errors.finish(())
    }
}

impl From<&Venue> for VenueFields {
    fn from(v: &Venue) -> Self {
        Self {
            name: v.name.clone(),
            city: v.city.clone(),
            state: v.state.clone(),
            address: v.address.clone(),
            phone: v.phone.clone(),
            image_link: v.image_link.clone(),
            facebook_link: v.facebook_link.clone(),
            website: v.website.clone(),
            genres: v.genres.clone(),
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_description.clone(),
        }
    }
}

/// Mutable columns of an artist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistFields {
    /// Read every field, defaulting the missing ones. Does not validate.
    pub fn from_form(form: &FormData) -> Self {
        Self {
            name: form.text("name"),
            city: form.text("city"),
            state: form.text("state"),
            phone: form.text("phone"),
            image_link: form.text("image_link"),
            facebook_link: form.text("facebook_link"),
            website: form.text("website_link"),
            genres: form.all("genres"),
            seeking_venue: form.flag("seeking_venue"),
            seeking_description: form.text("seeking_description"),
        }
    }

    /// Decode and validate an artist submission.
    pub fn parse(form: &FormData) -> Result<Self, ValidationErrors> {
        let fields = Self::from_form(form);
        fields.validate()?;
        Ok(fields)
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_listing(
            &mut errors,
            Listing {
                name: &self.name,
                city: &self.city,
                state: &self.state,
                phone: &self.phone,
                image_link: &self.image_link,
                facebook_link: &self.facebook_link,
                website: &self.website,
                genres: &self.genres,
                seeking_description: &self.seeking_description,
            },
        );
        errors.finish(())
    }
}

impl From<&Artist> for ArtistFields {
    fn from(a: &Artist) -> Self {
        Self {
            name: a.name.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            phone: a.phone.clone(),
            image_link: a.image_link.clone(),
            facebook_link: a.facebook_link.clone(),
            website: a.website.clone(),
            genres: a.genres.clone(),
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_description.clone(),
        }
    }
}

/// A new show booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowFields {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

impl ShowFields {
    /// Decode and validate a show submission.
    ///
    /// Only the shape is checked here; whether the ids resolve is decided by
    /// the foreign keys when the row is written.
    pub fn parse(form: &FormData) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let venue_id = parse_id("venue_id", form.get("venue_id"));
        let artist_id = parse_id("artist_id", form.get("artist_id"));
        let start_time = parse_start_time(form.get("start_time"));

        if let Err(e) = &venue_id {
            errors.push(e.clone());
        }
        if let Err(e) = &artist_id {
            errors.push(e.clone());
        }
        if let Err(e) = &start_time {
            errors.push(e.clone());
        }

        match (venue_id, artist_id, start_time) {
            (Ok(venue_id), Ok(artist_id), Ok(start_time)) => Ok(Self {
                venue_id,
                artist_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

/// Columns venues and artists share
struct Listing<'a> {
    name: &'a str,
    city: &'a str,
    state: &'a str,
    phone: &'a str,
    image_link: &'a str,
    facebook_link: &'a str,
    website: &'a str,
    genres: &'a [String],
    seeking_description: &'a str,
}

fn check_listing(errors: &mut ValidationErrors, l: Listing<'_>) {
    errors.check(required("name", l.name));
    errors.check(max_len("name", l.name, MAX_NAME_LEN));
    errors.check(required("city", l.city));
    errors.check(max_len("city", l.city, MAX_NAME_LEN));

    if l.state.is_empty() {
        errors.push(ValidationError::Empty { field: "state" });
    } else if !catalog::is_state(l.state) {
        errors.push(ValidationError::InvalidVariant {
            field: "state",
            value: l.state.to_owned(),
        });
    }

    if l.genres.is_empty() {
        errors.push(ValidationError::Empty { field: "genres" });
    }
    for genre in l.genres.iter().filter(|g| !catalog::is_genre(g)) {
        errors.push(ValidationError::InvalidVariant {
            field: "genres",
            value: genre.clone(),
        });
    }

    if !l.phone.is_empty() && !PHONE_RE.is_match(l.phone) {
        errors.push(ValidationError::InvalidFormat {
            field: "phone",
            reason: "must be a phone number such as 123-456-7890",
        });
    }

    errors.check(link("image_link", l.image_link));
    errors.check(link("facebook_link", l.facebook_link));
    errors.check(link("website_link", l.website));
    errors.check(max_len("seeking_description", l.seeking_description, MAX_TEXT_LEN));
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(())
    }
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        Err(ValidationError::TooLong { field, max })
    } else {
        Ok(())
    }
}

/// Optional link: empty is fine, anything else must be an http(s) URL.
fn link(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || URL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field,
            reason: "must be an http:// or https:// URL",
        })
    }
}

fn parse_id(field: &'static str, raw: Option<&str>) -> Result<i64, ValidationError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive integer id",
        }),
    }
}

fn parse_start_time(raw: Option<&str>) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: "start_time" });
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or(ValidationError::InvalidFormat {
            field: "start_time",
            reason: "must look like 2035-04-01 20:00:00",
        })
}
