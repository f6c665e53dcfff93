//! Headless core of samwich: the recipe swipe deck, its gesture state
//! machine, and the macro bookkeeping triggered by cooking a recipe.
//!
//! Hosts feed raw gesture events into a [`session::DiscoverSession`] and
//! draw the [`samwich_protocol::CardLayer`]s it returns.

pub mod config;
pub mod deck;
pub mod gesture;
pub mod model;
pub mod nutrition;
pub mod session;
pub mod store;
pub mod tutorial;

pub use config::{ConfigError, SamwichConfig};
pub use deck::{CardDeck, CardItem, Decided};
