use chrono::{DateTime, Local};

use crate::{
    core::{
        booking::Booking,
        error::BookingError,
        id::{CageId, OwnerId, WindowId},
        snake::SnakeProfile,
        store::{CageStore, Missing, Swap},
        window::Claim,
    },
    prelude::*,
};

/// Turns an open window into a booking.
pub struct BookingCoordinator<'s, S> {
    store: &'s S,
}

impl<'s, S: CageStore> BookingCoordinator<'s, S> {
    pub const fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Claim the entire window for the guest's snake.
    ///
    /// The open state is checked by the store at the moment of the claim, so a window chosen from
    /// an earlier search may turn out taken. The caller should then search again rather than
    /// retry the same window.
    #[instrument(
        skip_all,
        fields(
            cage_id = %cage_id,
            window_id = %window_id,
            guest_owner_id = %guest_owner_id,
            snake_id = %guest_snake.id
        )
    )]
    pub fn book_cage(
        &self,
        cage_id: CageId,
        window_id: WindowId,
        guest_owner_id: OwnerId,
        guest_snake: &SnakeProfile,
        now: DateTime<Local>,
    ) -> Result<Booking, BookingError> {
        let claim = Claim::builder()
            .guest_owner_id(guest_owner_id)
            .guest_snake_id(guest_snake.id)
            .booked_at(now)
            .build();

        match self.store.compare_and_swap(cage_id, window_id, claim)? {
            Swap::Swapped(cage) => {
                let booking = cage
                    .window(window_id)
                    .and_then(|window| Booking::from_window(&cage, window))
                    .ok_or(BookingError::NotFound(Missing::Window(cage_id, window_id)))?;
                info!(stay = ?booking.stay, total_price = %booking.total_price(), "booked");
                Ok(booking)
            }
            Swap::Claimed(claim) => {
                warn!(claimed_by = %claim.guest_owner_id, "the window has already been booked");
                Err(BookingError::AlreadyClaimed { cage_id, window_id, claim })
            }
            Swap::Missing(missing) => {
                warn!(%missing, "nothing to book");
                Err(BookingError::NotFound(missing))
            }
        }
    }
}
