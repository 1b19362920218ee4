use chrono::{DateTime, Local};
use itertools::Itertools;

use crate::{
    core::{
        cage::Cage,
        id::{CageId, OwnerId, SnakeId, WindowId},
        store::CageStore,
        window::Window,
    },
    ops::Stay,
    prelude::*,
    quantity::price::Price,
};

/// Read-only view of a claimed window.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Booking {
    pub cage_id: CageId,
    pub cage_name: String,
    pub host_id: OwnerId,
    pub window_id: WindowId,
    pub guest_owner_id: OwnerId,
    pub guest_snake_id: SnakeId,

    /// The whole claimed window, which may be longer than the stay the guest searched for.
    pub stay: Stay,

    pub booked_at: DateTime<Local>,
    pub price_per_night: Price,
}

impl Booking {
    /// Build the view, or [`None`] if the window is still open.
    pub fn from_window(cage: &Cage, window: &Window) -> Option<Self> {
        let claim = window.claim()?;
        Some(Self {
            cage_id: cage.id,
            cage_name: cage.name.clone(),
            host_id: cage.owner_id,
            window_id: window.id(),
            guest_owner_id: claim.guest_owner_id,
            guest_snake_id: claim.guest_snake_id,
            stay: window.stay(),
            booked_at: claim.booked_at,
            price_per_night: cage.price_per_night,
        })
    }

    pub fn total_price(&self) -> Price {
        self.price_per_night * self.stay.nights()
    }
}

fn all_bookings(cages: &[Cage]) -> impl Iterator<Item = Booking> {
    cages
        .iter()
        .flat_map(|cage| cage.windows.iter().filter_map(|window| Booking::from_window(cage, window)))
}

/// Bookings made by the guest, earliest check-in first.
#[instrument(skip_all, fields(guest_owner_id = %guest_owner_id))]
pub fn bookings_of_guest(store: &impl CageStore, guest_owner_id: OwnerId) -> Result<Vec<Booking>> {
    let bookings = all_bookings(&store.load_all()?)
        .filter(|booking| booking.guest_owner_id == guest_owner_id)
        .sorted_by_key(|booking| (booking.stay.start, booking.cage_id, booking.window_id))
        .collect_vec();
    info!(n_bookings = bookings.len(), "fetched guest bookings");
    Ok(bookings)
}

/// Bookings received on the host's cages, earliest check-in first.
#[instrument(skip_all, fields(host_id = %host_id))]
pub fn bookings_of_host(store: &impl CageStore, host_id: OwnerId) -> Result<Vec<Booking>> {
    let bookings = all_bookings(&store.load_all()?)
        .filter(|booking| booking.host_id == host_id)
        .sorted_by_key(|booking| (booking.stay.start, booking.cage_id, booking.window_id))
        .collect_vec();
    info!(n_bookings = bookings.len(), "fetched host bookings");
    Ok(bookings)
}
