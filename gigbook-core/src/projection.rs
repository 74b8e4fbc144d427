//! Page projections
//!
//! The shapes handed to the presentation layer. Short views back the list and
//! search pages, detail views back the single-entity pages and carry the
//! upcoming/past show split computed against one request clock.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::{GENRES, STATES};
use crate::clock::{Now, ShowWindow};
use crate::model::{Artist, ShowListing, Venue};

/// Layout used when pre-filling a `start_time` input
const FORM_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// id + name + upcoming show count, for list and search pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortView {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl ShortView {
    /// `upcoming` maps an owner id to its upcoming show count; absent means none.
    pub fn venue(venue: &Venue, upcoming: &HashMap<i64, i64>) -> Self {
        Self {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
        }
    }

    pub fn artist(artist: &Artist, upcoming: &HashMap<i64, i64>) -> Self {
        Self {
            id: artist.id,
            name: artist.name.clone(),
            num_upcoming_shows: upcoming.get(&artist.id).copied().unwrap_or(0),
        }
    }
}

/// Venues sharing a city, as listed on the venues page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<ShortView>,
}

/// Group venues by (state, city), keeping the order areas are first seen in.
pub fn group_by_area(venues: &[Venue], upcoming: &HashMap<i64, i64>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for venue in venues {
        let key = (venue.state.as_str(), venue.city.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            areas.push(VenueArea {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            areas.len() - 1
        });
        areas[slot].venues.push(ShortView::venue(venue, upcoming));
    }

    areas
}

/// Search page payload, shared by venue and artist search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<ShortView>,
}

impl SearchResults {
    pub fn new(search_term: impl Into<String>, data: Vec<ShortView>) -> Self {
        Self {
            search_term: search_term.into(),
            count: data.len(),
            data,
        }
    }
}

/// One show with both sides of the join flattened in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowView {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

impl From<&ShowListing> for ShowView {
    fn from(s: &ShowListing) -> Self {
        Self {
            venue_id: s.show.venue_id,
            venue_name: s.venue_name.clone(),
            venue_image_link: s.venue_image_link.clone(),
            artist_id: s.show.artist_id,
            artist_name: s.artist_name.clone(),
            artist_image_link: s.artist_image_link.clone(),
            start_time: s.show.date_time.to_rfc3339(),
        }
    }
}

/// Upcoming and past shows of one venue or artist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShowSplit {
    pub upcoming_shows: Vec<ShowView>,
    pub upcoming_shows_count: usize,
    pub past_shows: Vec<ShowView>,
    pub past_shows_count: usize,
}

impl ShowSplit {
    /// Classify every show against the same `now`.
    pub fn new(shows: &[ShowListing], now: Now) -> Self {
        let (upcoming, past): (Vec<&ShowListing>, Vec<&ShowListing>) = shows
            .iter()
            .partition(|s| now.window_of(s.date_time()) == ShowWindow::Upcoming);

        let upcoming_shows: Vec<ShowView> = upcoming.into_iter().map(ShowView::from).collect();
        let past_shows: Vec<ShowView> = past.into_iter().map(ShowView::from).collect();

        Self {
            upcoming_shows_count: upcoming_shows.len(),
            past_shows_count: past_shows.len(),
            upcoming_shows,
            past_shows,
        }
    }
}

/// Venue page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub image_link: String,
    #[serde(flatten)]
    pub shows: ShowSplit,
}

impl VenueDetail {
    pub fn build(venue: Venue, shows: &[ShowListing], now: Now) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            genres: venue.genres,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            shows: ShowSplit::new(shows, now),
        }
    }
}

/// Artist page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub image_link: String,
    #[serde(flatten)]
    pub shows: ShowSplit,
}

impl ArtistDetail {
    pub fn build(artist: Artist, shows: &[ShowListing], now: Now) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            shows: ShowSplit::new(shows, now),
        }
    }
}

/// Allowed values for the select inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Choices {
    pub genres: &'static [&'static str],
    pub states: &'static [&'static str],
}

impl Default for Choices {
    fn default() -> Self {
        Self {
            genres: GENRES,
            states: STATES,
        }
    }
}

/// Venue create/edit form, keyed by input name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VenueForm {
    /// Set when editing an existing venue
    pub venue_id: Option<i64>,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: String,
    pub facebook_link: String,
    pub image_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub choices: Choices,
}

impl VenueForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn edit(venue: &Venue) -> Self {
        Self {
            venue_id: Some(venue.id),
            name: venue.name.clone(),
            genres: venue.genres.clone(),
            address: venue.address.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            phone: venue.phone.clone(),
            website_link: venue.website.clone(),
            facebook_link: venue.facebook_link.clone(),
            image_link: venue.image_link.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
            choices: Choices::default(),
        }
    }
}

/// Artist create/edit form, keyed by input name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtistForm {
    pub artist_id: Option<i64>,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website_link: String,
    pub facebook_link: String,
    pub image_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub choices: Choices,
}

impl ArtistForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn edit(artist: &Artist) -> Self {
        Self {
            artist_id: Some(artist.id),
            name: artist.name.clone(),
            genres: artist.genres.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            website_link: artist.website.clone(),
            facebook_link: artist.facebook_link.clone(),
            image_link: artist.image_link.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
            choices: Choices::default(),
        }
    }
}

/// Show booking form; `start_time` defaults to the request clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowForm {
    pub venue_id: Option<i64>,
    pub artist_id: Option<i64>,
    pub start_time: String,
}

impl ShowForm {
    pub fn blank(now: Now) -> Self {
        Self {
            venue_id: None,
            artist_id: None,
            start_time: now.instant().format(FORM_TIME_FORMAT).to_string(),
        }
    }
}
