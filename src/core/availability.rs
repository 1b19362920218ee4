use chrono::{DateTime, Days, Local, NaiveDate};

use crate::{
    core::{
        error::BookingError,
        id::CageId,
        store::{CageStore, Missing},
        window::Window,
    },
    ops::Stay,
    prelude::*,
};

/// Windows that owners publish on their cages.
///
/// Overlapping windows on the same cage are allowed.
pub struct Availability<'s, S> {
    store: &'s S,
}

impl<'s, S: CageStore> Availability<'s, S> {
    pub const fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Windows of the cage in publication order.
    pub fn windows_for_cage(&self, cage_id: CageId) -> Result<Vec<Window>, BookingError> {
        let cage = self.store.load(cage_id)?.ok_or(BookingError::NotFound(Missing::Cage(cage_id)))?;
        Ok(cage.windows)
    }

    #[instrument(skip_all, fields(cage_id = %cage_id, check_in = %check_in, check_out = %check_out))]
    pub fn append_window(
        &self,
        cage_id: CageId,
        check_in: NaiveDate,
        check_out: NaiveDate,
        now: DateTime<Local>,
    ) -> Result<Window, BookingError> {
        let stay = Stay::try_new(check_in, check_out)
            .ok_or(BookingError::InvalidRange { check_in, check_out })?;
        let window = self
            .store
            .append_window(cage_id, stay, now)?
            .ok_or(BookingError::NotFound(Missing::Cage(cage_id)))?;
        info!(window_id = %window.id(), "published");
        Ok(window)
    }

    /// Publish a block of `days` nights starting at `check_in`.
    pub fn publish_days(
        &self,
        cage_id: CageId,
        check_in: NaiveDate,
        days: u64,
        now: DateTime<Local>,
    ) -> Result<Window, BookingError> {
        let check_out = check_in
            .checked_add_days(Days::new(days))
            .ok_or(BookingError::OutOfCalendar { check_in, days })?;
        self.append_window(cage_id, check_in, check_out, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{cage::NewCage, id::OwnerId},
        db::Db,
        quantity::{area::SquareMeters, price::Price},
    };

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn cage_id(db: &Db) -> Result<CageId> {
        let cage = db.insert(
            NewCage::builder()
                .owner_id(OwnerId(1))
                .name("Cage")
                .square_meters(SquareMeters(20.0))
                .price_per_night(Price(10.0))
                .build(),
        )?;
        Ok(cage.id)
    }

    #[test]
    fn reversed_range_is_rejected() -> Result {
        let db = Db::in_memory();
        let cage_id = cage_id(&db)?;
        let availability = Availability::new(&db);
        let result = availability.append_window(cage_id, june(10), june(1), Local::now());
        assert!(matches!(result, Err(BookingError::InvalidRange { .. })));
        assert!(availability.windows_for_cage(cage_id)?.is_empty());
        Ok(())
    }

    #[test]
    fn empty_range_is_rejected() -> Result {
        let db = Db::in_memory();
        let cage_id = cage_id(&db)?;
        let result = Availability::new(&db).publish_days(cage_id, june(1), 0, Local::now());
        assert!(matches!(result, Err(BookingError::InvalidRange { .. })));
        Ok(())
    }

    #[test]
    fn check_out_past_the_calendar_is_rejected() -> Result {
        let db = Db::in_memory();
        let cage_id = cage_id(&db)?;
        let availability = Availability::new(&db);
        let result = availability.publish_days(cage_id, june(1), u64::MAX, Local::now());
        assert!(matches!(
            result,
            Err(BookingError::OutOfCalendar { check_in, days: u64::MAX }) if check_in == june(1),
        ));
        assert!(availability.windows_for_cage(cage_id)?.is_empty());
        Ok(())
    }

    #[test]
    fn overlapping_windows_are_kept_in_order() -> Result {
        let db = Db::in_memory();
        let cage_id = cage_id(&db)?;
        let availability = Availability::new(&db);
        let first = availability.append_window(cage_id, june(1), june(10), Local::now())?;
        let second = availability.publish_days(cage_id, june(5), 3, Local::now())?;
        assert_eq!(second.stay(), Stay::try_new(june(5), june(8)).unwrap());

        let windows = availability.windows_for_cage(cage_id)?;
        assert_eq!(windows, [first, second]);
        assert!(windows.iter().all(Window::is_open));
        Ok(())
    }

    #[test]
    fn unknown_cage_is_not_found() {
        let db = Db::in_memory();
        let availability = Availability::new(&db);
        assert!(matches!(
            availability.append_window(CageId(7), june(1), june(2), Local::now()),
            Err(BookingError::NotFound(Missing::Cage(CageId(7)))),
        ));
        assert!(matches!(
            availability.windows_for_cage(CageId(7)),
            Err(BookingError::NotFound(Missing::Cage(CageId(7)))),
        ));
    }
}
