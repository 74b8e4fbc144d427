//! Sample listings for a fresh database

use chrono::{Duration, Utc};
use gigbook_core::{ArtistFields, ShowFields, VenueFields};

use super::error::DbError;
use super::pool::Store;

/// What a seeding run wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.venues == 0 && self.artists == 0 && self.shows == 0
    }
}

/// Insert sample venues, artists and shows, only when no venue exists yet.
///
/// Show times are relative to the current clock so both the upcoming and
/// past lists have entries.
pub async fn seed_if_empty(store: &Store) -> Result<SeedReport, DbError> {
    let mut session = store.begin().await?;

    if session.venues().any().await? {
        tracing::info!("venues already present, skipping seed");
        return Ok(SeedReport::default());
    }

    let mut venue_ids = Vec::new();
    for fields in sample_venues() {
        venue_ids.push(session.venues().insert(&fields).await?.id);
    }

    let mut artist_ids = Vec::new();
    for fields in sample_artists() {
        artist_ids.push(session.artists().insert(&fields).await?.id);
    }

    let now = Utc::now();
    let bookings = [
        (venue_ids[0], artist_ids[0], now - Duration::days(30)),
        (venue_ids[2], artist_ids[1], now - Duration::days(10)),
        (venue_ids[2], artist_ids[2], now + Duration::days(30)),
        (venue_ids[2], artist_ids[2], now + Duration::days(37)),
        (venue_ids[2], artist_ids[2], now + Duration::days(44)),
    ];
    for (venue_id, artist_id, start_time) in bookings {
        session
            .shows()
            .insert(&ShowFields {
                venue_id,
                artist_id,
                start_time,
            })
            .await?;
    }

    session.commit().await?;

    let report = SeedReport {
        venues: venue_ids.len(),
        artists: artist_ids.len(),
        shows: bookings.len(),
    };
    tracing::info!(
        venues = report.venues,
        artists = report.artists,
        shows = report.shows,
        "seeded sample listings"
    );
    Ok(report)
}

fn sample_venues() -> Vec<VenueFields> {
    vec![
        VenueFields {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: "123-123-1234".into(),
            image_link: "https://images.example.com/venues/musical-hop.jpg".into(),
            facebook_link: "https://www.facebook.com/TheMusicalHop".into(),
            website: "https://www.themusicalhop.com".into(),
            genres: vec!["Jazz".into(), "Reggae".into(), "Classical".into(), "Folk".into()],
            seeking_talent: true,
            seeking_description: "We are on the lookout for a local artist to play every two weeks. Please call us.".into(),
        },
        VenueFields {
            name: "The Dueling Pianos Bar".into(),
            city: "New York".into(),
            state: "NY".into(),
            address: "335 Delancey Street".into(),
            phone: "914-003-1132".into(),
            image_link: "https://images.example.com/venues/dueling-pianos.jpg".into(),
            facebook_link: "https://www.facebook.com/theduelingpianos".into(),
            website: "https://www.theduelingpianos.com".into(),
            genres: vec!["Classical".into(), "R&B".into(), "Hip-Hop".into()],
            seeking_talent: false,
            seeking_description: String::new(),
        },
        VenueFields {
            name: "Park Square Live Music & Coffee".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "34 Whiskey Moore Ave".into(),
            phone: "415-000-1234".into(),
            image_link: "https://images.example.com/venues/park-square.jpg".into(),
            facebook_link: "https://www.facebook.com/ParkSquareLiveMusicAndCoffee".into(),
            website: "https://www.parksquarelivemusicandcoffee.com".into(),
            genres: vec!["Rock n Roll".into(), "Jazz".into(), "Classical".into(), "Folk".into()],
            seeking_talent: false,
            seeking_description: String::new(),
        },
    ]
}

fn sample_artists() -> Vec<ArtistFields> {
    vec![
        ArtistFields {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "326-123-5000".into(),
            image_link: "https://images.example.com/artists/guns-n-petals.jpg".into(),
            facebook_link: "https://www.facebook.com/GunsNPetals".into(),
            website: "https://www.gunsnpetalsband.com".into(),
            genres: vec!["Rock n Roll".into()],
            seeking_venue: true,
            seeking_description: "Looking for shows to perform at in the San Francisco Bay Area!".into(),
        },
        ArtistFields {
            name: "Matt Quevado".into(),
            city: "New York".into(),
            state: "NY".into(),
            phone: "300-400-5000".into(),
            image_link: "https://images.example.com/artists/matt-quevado.jpg".into(),
            facebook_link: "https://www.facebook.com/mattquevedo923251523".into(),
            website: String::new(),
            genres: vec!["Jazz".into()],
            seeking_venue: false,
            seeking_description: String::new(),
        },
        ArtistFields {
            name: "The Wild Sax Band".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: "432-325-5432".into(),
            image_link: "https://images.example.com/artists/wild-sax-band.jpg".into(),
            facebook_link: String::new(),
            website: String::new(),
            genres: vec!["Jazz".into(), "Classical".into()],
            seeking_venue: false,
            seeking_description: String::new(),
        },
    ]
}
