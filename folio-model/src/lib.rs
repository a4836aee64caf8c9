//! Content data model shared across Folio crates.
//!
//! Everything here is static, locally bundled content: hero carousel cards,
//! their calls to action, and the navigation registry that names the page
//! sections. Types deserialize straight from the site's JSON data files.
#![allow(missing_docs)]

pub mod card;
pub mod error;
pub mod ids;
pub mod navigation;

pub use card::{BackgroundImage, Cta, CtaAction, HeroCard, HomeContent};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{CardId, SectionId};
pub use navigation::{NavItem, NavigationData};
