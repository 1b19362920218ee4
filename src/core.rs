//! Availability and booking engine.
//!
//! Cages carry owner-published availability windows. The [`matcher::Matcher`] ranks the cages
//! that can host a snake over a requested stay, and the [`coordinator::BookingCoordinator`]
//! turns one open window into a booking through the [`store::CageStore`] port.

pub mod availability;
pub mod booking;
pub mod cage;
pub mod coordinator;
pub mod error;
pub mod id;
pub mod matcher;
pub mod registry;
pub mod snake;
pub mod store;
pub mod window;
