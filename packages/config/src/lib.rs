//! Persistence of last-used sync locations.
//!
//! Remembers the `source` and `destination` directories between runs in a
//! small TOML file under the platform configuration directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use syncmedia_config::LocationStore;
//!
//! let store = LocationStore::open_default()?;
//! let mut locations = store.load()?;
//! locations.source = Some("/media/phone/DCIM".into());
//! store.save(&locations)?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod store;
mod types;

pub use error::ConfigError;
pub use store::{APP_DIR_NAME, LOCATIONS_FILE_NAME, LocationStore};
pub use types::Locations;
