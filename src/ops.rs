use std::fmt::{Debug, Formatter};

use chrono::NaiveDate;

/// Requested or published date range: check-in day inclusive, check-out day exclusive.
pub type Stay = RangeExclusive<NaiveDate>;

#[must_use]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct RangeExclusive<T: Copy> {
    pub start: T,
    pub end: T,
}

impl<T: Copy + Debug> Debug for RangeExclusive<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl<T: Copy + PartialOrd> RangeExclusive<T> {
    /// Build the range if it is non-empty.
    pub fn try_new(start: T, end: T) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Whether the `other` range lies entirely within this one.
    #[must_use]
    pub fn covers(self, other: Self) -> bool {
        (self.start <= other.start) && (other.end <= self.end)
    }
}

impl Stay {
    /// Number of nights between check-in and check-out.
    #[must_use]
    pub fn nights(self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn try_new_rejects_empty_and_reversed() {
        assert!(Stay::try_new(date(2024, 6, 1), date(2024, 6, 1)).is_none());
        assert!(Stay::try_new(date(2024, 6, 10), date(2024, 6, 1)).is_none());
        assert!(Stay::try_new(date(2024, 6, 1), date(2024, 6, 2)).is_some());
    }

    #[test]
    fn covers_ok() {
        let window = Stay::try_new(date(2024, 6, 1), date(2024, 6, 10)).unwrap();
        assert!(window.covers(Stay::try_new(date(2024, 6, 2), date(2024, 6, 5)).unwrap()));
        assert!(window.covers(window));
        assert!(!window.covers(Stay::try_new(date(2024, 5, 31), date(2024, 6, 5)).unwrap()));
        assert!(!window.covers(Stay::try_new(date(2024, 6, 5), date(2024, 6, 11)).unwrap()));
    }

    #[test]
    fn nights_ok() {
        assert_eq!(Stay::try_new(date(2024, 6, 1), date(2024, 6, 10)).unwrap().nights(), 9);
    }
}
