use chrono::NaiveDate;
use thiserror::Error;

use crate::core::{
    id::{CageId, WindowId},
    store::Missing,
    window::Claim,
};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("check-in {check_in} must be before check-out {check_out}")]
    InvalidRange { check_in: NaiveDate, check_out: NaiveDate },

    #[error("{days} nights from {check_in} run past the last supported date")]
    OutOfCalendar { check_in: NaiveDate, days: u64 },

    #[error("window #{window_id} of cage #{cage_id} has already been booked")]
    AlreadyClaimed { cage_id: CageId, window_id: WindowId, claim: Claim },

    #[error("{0} not found")]
    NotFound(Missing),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
