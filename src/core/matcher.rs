use std::cmp::Reverse;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::{
    core::{
        cage::Cage,
        error::BookingError,
        registry::CageRegistry,
        snake::SnakeProfile,
        store::CageStore,
        window::Window,
    },
    ops::Stay,
    prelude::*,
};

/// Cage that can host the snake over the requested stay.
#[must_use]
#[derive(Clone, Debug)]
pub struct CageMatch {
    pub cage: Cage,

    /// Open windows spanning the stay, earliest check-in first, never empty.
    pub candidate_windows: Vec<Window>,
}

impl CageMatch {
    /// The window a booking should go for.
    #[must_use]
    pub fn first_window(&self) -> Option<&Window> {
        self.candidate_windows.first()
    }
}

pub struct Matcher<'s, S> {
    store: &'s S,
}

impl<'s, S: CageStore> Matcher<'s, S> {
    pub const fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Find the cages available for the snake over the stay.
    ///
    /// Each cage appears at most once. The cheapest cages go first, then the roomiest ones,
    /// and the cage identifier settles the remaining ties.
    #[instrument(
        skip_all,
        fields(check_in = %check_in, check_out = %check_out, snake_id = %snake.id)
    )]
    pub fn search(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        snake: &SnakeProfile,
    ) -> Result<Vec<CageMatch>, BookingError> {
        let stay = Stay::try_new(check_in, check_out)
            .ok_or(BookingError::InvalidRange { check_in, check_out })?;
        let mut matches = CageRegistry::new(self.store)
            .suitable_for(snake)?
            .into_values()
            .filter_map(|cage| {
                let candidate_windows = cage.candidate_windows(stay);
                (!candidate_windows.is_empty()).then_some(CageMatch { cage, candidate_windows })
            })
            .collect_vec();
        matches.sort_unstable_by_key(|cage_match| {
            let cage = &cage_match.cage;
            (cage.price_per_night, Reverse(cage.square_meters), cage.id)
        });

        info!(n_matches = matches.len(), "searched");
        Ok(matches)
    }
}
