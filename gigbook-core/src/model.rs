//! Stored record types
//!
//! Venue 1--N Show N--1 Artist. A show is a pure association record with a
//! single scalar attribute; it has no lifecycle apart from its two parents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Venue row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    /// Stored inline, order preserved
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

/// Artist row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
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

/// Show row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub date_time: DateTime<Utc>,
}

/// Show joined with the name and image of its venue and artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub show: Show,
    pub venue_name: String,
    pub venue_image_link: String,
    pub artist_name: String,
    pub artist_image_link: String,
}

impl ShowListing {
    pub fn date_time(&self) -> DateTime<Utc> {
        self.show.date_time
    }
}
