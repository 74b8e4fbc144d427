//! Repository tests against a live PostgreSQL
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p gigbook-server -- --ignored`.
//! Each test works inside a session it never commits, so nothing it writes
//! is visible to the others.

use chrono::{Duration, SubsecRound, Utc};
use gigbook_core::{ArtistFields, FormData, Now, ShowFields, ShowSplit, VenueFields};
use gigbook_server::db::migrations;
use gigbook_server::{DatabaseConfig, DbError, Store};
use tokio::sync::OnceCell;

static MIGRATED: OnceCell<()> = OnceCell::const_new();

async fn store() -> Store {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let store = Store::connect(&DatabaseConfig::new(url))
        .await
        .expect("pool creation failed");
    MIGRATED
        .get_or_try_init(|| migrations::run(store.pool()))
        .await
        .expect("migrations failed");
    store
}

fn venue(name: &str) -> VenueFields {
    VenueFields::parse(
        &FormData::new()
            .with("name", name)
            .with("city", "San Francisco")
            .with("state", "CA")
            .with("address", "1015 Folsom Street")
            .with("phone", "123-123-1234")
            .with("genres", "Jazz")
            .with("genres", "Folk")
            .with("seeking_talent", "y")
            .with("seeking_description", "Looking for local acts"),
    )
    .expect("sample venue is valid")
}

fn artist(name: &str) -> ArtistFields {
    ArtistFields::parse(
        &FormData::new()
            .with("name", name)
            .with("city", "San Francisco")
            .with("state", "CA")
            .with("genres", "Rock n Roll"),
    )
    .expect("sample artist is valid")
}

#[tokio::test]
#[ignore = "requires database"]
async fn venue_insert_then_get_keeps_every_field() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    // Every column gets a distinct value so a swapped bind can't go unnoticed.
    let submitted = VenueFields::parse(
        &FormData::new()
            .with("name", "The Musical Hop")
            .with("city", "San Francisco")
            .with("state", "CA")
            .with("address", "1015 Folsom Street")
            .with("phone", "123-123-1234")
            .with("image_link", "https://img.test/hop.jpg")
            .with("facebook_link", "https://facebook.test/hop")
            .with("website_link", "https://hop.test")
            .with("genres", "Jazz")
            .with("genres", "Folk")
            .with("seeking_talent", "y")
            .with("seeking_description", "Looking for local acts"),
    )
    .unwrap();

    let created = session.venues().insert(&submitted).await.unwrap();
    assert!(created.id > 0);

    let fetched = session
        .venues()
        .get(created.id)
        .await
        .unwrap()
        .expect("inserted venue is visible");
    assert_eq!(fetched.id, created.id);
    assert_eq!(VenueFields::from(&fetched), submitted);
}

#[tokio::test]
#[ignore = "requires database"]
async fn artist_insert_then_get_keeps_every_field() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    let submitted = ArtistFields::parse(
        &FormData::new()
            .with("name", "Guns N Petals")
            .with("city", "Oakland")
            .with("state", "NV")
            .with("phone", "326-123-5000")
            .with("image_link", "https://img.test/gnp.jpg")
            .with("facebook_link", "https://facebook.test/gnp")
            .with("website_link", "https://gnp.test")
            .with("genres", "Rock n Roll")
            .with("genres", "Blues")
            .with("seeking_venue", "y")
            .with("seeking_description", "Looking for Bay Area shows"),
    )
    .unwrap();

    let created = session.artists().insert(&submitted).await.unwrap();
    assert!(created.id > 0);

    let fetched = session
        .artists()
        .get(created.id)
        .await
        .unwrap()
        .expect("inserted artist is visible");
    assert_eq!(fetched.id, created.id);
    assert_eq!(ArtistFields::from(&fetched), submitted);
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_id_is_none_not_error() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    assert!(session.venues().get(i64::MAX).await.unwrap().is_none());
    assert!(session.artists().get(i64::MAX).await.unwrap().is_none());
    assert!(session
        .venues()
        .update(i64::MAX, &venue("Nowhere"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_is_case_insensitive_substring() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    let hop = session.venues().insert(&venue("The Musical Hop")).await.unwrap();
    let park = session
        .venues()
        .insert(&venue("Park Square Live Music & Coffee"))
        .await
        .unwrap();
    let pianos = session
        .venues()
        .insert(&venue("The Dueling Pianos Bar"))
        .await
        .unwrap();
    let ours = [hop.id, park.id, pianos.id];

    let ids = |found: Vec<gigbook_core::Venue>| -> Vec<i64> {
        found
            .into_iter()
            .map(|v| v.id)
            .filter(|id| ours.contains(id))
            .collect()
    };

    let music = ids(session.venues().search("music").await.unwrap());
    assert!(music.contains(&hop.id));
    assert!(music.contains(&park.id));
    assert!(!music.contains(&pianos.id));

    let hop_only = ids(session.venues().search("Hop").await.unwrap());
    assert_eq!(hop_only, vec![hop.id]);

    let lower = ids(session.venues().search("hop").await.unwrap());
    let upper = ids(session.venues().search("HOP").await.unwrap());
    assert_eq!(lower, upper);

    let everything = ids(session.venues().search("").await.unwrap());
    assert_eq!(everything.len(), 3);
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_treats_wildcards_literally() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    let plain = session.artists().insert(&artist("Guns N Petals")).await.unwrap();
    let found = session.artists().search("%").await.unwrap();

    assert!(!found.iter().any(|a| a.id == plain.id));
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_overwrites_every_field() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    let created = session.venues().insert(&venue("The Musical Hop")).await.unwrap();

    // A submission without phone or the checkbox clears both.
    let sparse = VenueFields::parse(
        &FormData::new()
            .with("name", "The Musical Hop")
            .with("city", "Oakland")
            .with("state", "CA")
            .with("address", "1 Broadway")
            .with("genres", "Blues"),
    )
    .unwrap();
    let updated = session
        .venues()
        .update(created.id, &sparse)
        .await
        .unwrap()
        .expect("venue exists");

    assert_eq!(VenueFields::from(&updated), sparse);

    let fetched = session
        .venues()
        .get(created.id)
        .await
        .unwrap()
        .expect("venue exists");
    assert_eq!(VenueFields::from(&fetched), sparse);
    assert_eq!(fetched.city, "Oakland");
    assert_eq!(fetched.address, "1 Broadway");
    assert_eq!(fetched.phone, "");
    assert!(!fetched.seeking_talent);
    assert_eq!(fetched.seeking_description, "");
    assert_eq!(fetched.genres, vec!["Blues"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn second_delete_reports_missing() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    let created = session.venues().insert(&venue("Short Lived")).await.unwrap();

    assert!(session.venues().delete(created.id).await.unwrap());
    assert!(!session.venues().delete(created.id).await.unwrap());
    assert!(session.venues().get(created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn venue_with_shows_cannot_be_deleted() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    let v = session.venues().insert(&venue("Busy Room")).await.unwrap();
    let a = session.artists().insert(&artist("Matt Quevado")).await.unwrap();
    session
        .shows()
        .insert(&ShowFields {
            venue_id: v.id,
            artist_id: a.id,
            start_time: Utc::now() + Duration::days(3),
        })
        .await
        .unwrap();

    let err = session.venues().delete(v.id).await.unwrap_err();
    assert!(err.is_constraint_violation(), "{err}");
}

#[tokio::test]
#[ignore = "requires database"]
async fn show_with_unknown_venue_is_rejected_and_not_stored() {
    let store = store().await;

    let before = {
        let mut session = store.begin().await.unwrap();
        session.shows().count().await.unwrap()
    };

    let err = {
        let mut session = store.begin().await.unwrap();
        let a = session.artists().insert(&artist("The Wild Sax Band")).await.unwrap();
        session
            .shows()
            .insert(&ShowFields {
                venue_id: i64::MAX,
                artist_id: a.id,
                start_time: Utc::now(),
            })
            .await
            .unwrap_err()
    };
    assert!(matches!(err, DbError::ConstraintViolation { .. }), "{err}");

    let after = {
        let mut session = store.begin().await.unwrap();
        session.shows().count().await.unwrap()
    };
    assert_eq!(before, after);
}

#[tokio::test]
#[ignore = "requires database"]
async fn detail_shows_split_on_one_clock() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    let v = session.venues().insert(&venue("Split Room")).await.unwrap();
    let a = session.artists().insert(&artist("Split Act")).await.unwrap();
    let now = Now::capture();

    for offset in [-10, -1, 2] {
        session
            .shows()
            .insert(&ShowFields {
                venue_id: v.id,
                artist_id: a.id,
                start_time: now.instant() + Duration::days(offset),
            })
            .await
            .unwrap();
    }

    let venue_shows = session.shows().for_venue(v.id).await.unwrap();
    let split = ShowSplit::new(&venue_shows, now);
    assert_eq!(split.upcoming_shows_count, 1);
    assert_eq!(split.past_shows_count, 2);
    assert_eq!(split.upcoming_shows[0].artist_name, "Split Act");

    let artist_shows = session.shows().for_artist(a.id).await.unwrap();
    assert_eq!(artist_shows.len(), 3);
    let artist_split = ShowSplit::new(&artist_shows, now);
    assert_eq!(artist_split.upcoming_shows_count, 1);
    assert_eq!(artist_split.past_shows_count, 2);
    assert!(artist_shows.iter().all(|s| s.venue_name == "Split Room"));

    let by_venue = session.shows().count_upcoming_by_venue(now).await.unwrap();
    assert_eq!(by_venue.get(&v.id), Some(&1));
    let by_artist = session.shows().count_upcoming_by_artist(now).await.unwrap();
    assert_eq!(by_artist.get(&a.id), Some(&1));
}

#[tokio::test]
#[ignore = "requires database"]
async fn show_at_the_current_instant_is_past() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    let v = session.venues().insert(&venue("Edge Room")).await.unwrap();
    let a = session.artists().insert(&artist("Edge Act")).await.unwrap();

    // Postgres keeps microseconds; trim the clock so the stored value equals it.
    let now = Now::at(Utc::now().trunc_subsecs(6));
    for start_time in [now.instant(), now.instant() + Duration::microseconds(1)] {
        session
            .shows()
            .insert(&ShowFields {
                venue_id: v.id,
                artist_id: a.id,
                start_time,
            })
            .await
            .unwrap();
    }

    let shows = session.shows().for_venue(v.id).await.unwrap();
    assert_eq!(shows[0].date_time(), now.instant());

    let split = ShowSplit::new(&shows, now);
    assert_eq!(split.past_shows_count, 1);
    assert_eq!(split.upcoming_shows_count, 1);

    let by_venue = session.shows().count_upcoming_by_venue(now).await.unwrap();
    assert_eq!(by_venue.get(&v.id), Some(&1));
    let by_artist = session.shows().count_upcoming_by_artist(now).await.unwrap();
    assert_eq!(by_artist.get(&a.id), Some(&1));
}

#[tokio::test]
#[ignore = "requires database"]
async fn seed_check_sees_stored_venues() {
    let store = store().await;
    let mut session = store.begin().await.unwrap();

    session.venues().insert(&venue("Somewhere")).await.unwrap();
    assert!(session.venues().any().await.unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn uncommitted_session_leaves_no_trace() {
    let store = store().await;

    let id = {
        let mut session = store.begin().await.unwrap();
        session.artists().insert(&artist("Ghost Act")).await.unwrap().id
    };

    let mut session = store.begin().await.unwrap();
    assert!(session.artists().get(id).await.unwrap().is_none());
}
