//! gigbook-core: listing model for venues, artists and shows
//!
//! Pure domain layer with no I/O:
//! - record types as stored (`model`)
//! - typed field sets decoded from submitted forms (`fields`)
//! - per-field validation (`validation`, `catalog`)
//! - the per-request clock and upcoming/past split (`clock`)
//! - page projections consumed by the presentation layer (`projection`)

pub mod catalog;
pub mod clock;
pub mod fields;
pub mod model;
pub mod projection;
pub mod validation;

pub use clock::{Now, ShowWindow};
pub use fields::{ArtistFields, FormData, ShowFields, VenueFields};
pub use model::{Artist, Show, ShowListing, Venue};
pub use projection::{
    group_by_area, ArtistDetail, ArtistForm, Choices, SearchResults, ShortView, ShowForm, ShowSplit,
    ShowView, VenueArea, VenueDetail, VenueForm,
};
pub use validation::{ValidationError, ValidationErrors};
