use bon::Builder;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    core::id::{OwnerId, SnakeId, WindowId},
    ops::Stay,
};

/// Guest side of a claimed window.
#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Builder, Serialize, Deserialize)]
pub struct Claim {
    pub guest_owner_id: OwnerId,
    pub guest_snake_id: SnakeId,
    pub booked_at: DateTime<Local>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ClaimState {
    Open,
    Claimed(Claim),
}

/// Owner-published availability of a cage.
///
/// The dates never change after publication. The claim state moves from open to claimed
/// at most once, through [`Window::try_claim`].
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Window {
    id: WindowId,
    check_in: NaiveDate,
    check_out: NaiveDate,
    published_at: DateTime<Local>,

    #[serde(flatten)]
    state: ClaimState,
}

impl Window {
    pub const fn open(id: WindowId, stay: Stay, published_at: DateTime<Local>) -> Self {
        Self {
            id,
            check_in: stay.start,
            check_out: stay.end,
            published_at,
            state: ClaimState::Open,
        }
    }

    #[must_use]
    pub const fn id(&self) -> WindowId {
        self.id
    }

    pub const fn stay(&self) -> Stay {
        Stay { start: self.check_in, end: self.check_out }
    }

    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    #[must_use]
    pub const fn published_at(&self) -> DateTime<Local> {
        self.published_at
    }

    #[must_use]
    pub const fn state(&self) -> &ClaimState {
        &self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, ClaimState::Open)
    }

    #[must_use]
    pub const fn claim(&self) -> Option<&Claim> {
        match &self.state {
            ClaimState::Open => None,
            ClaimState::Claimed(claim) => Some(claim),
        }
    }

    /// Whether the window is still open and spans the whole requested stay.
    #[must_use]
    pub fn is_candidate_for(&self, stay: Stay) -> bool {
        self.is_open() && self.stay().covers(stay)
    }

    /// Claim the window unless somebody already did.
    ///
    /// The booking timestamp is never earlier than the publication timestamp.
    /// On conflict, the existing claim is returned and the window stays untouched.
    pub fn try_claim(&mut self, mut claim: Claim) -> Result<Claim, Claim> {
        match self.state {
            ClaimState::Claimed(existing) => Err(existing),
            ClaimState::Open => {
                claim.booked_at = claim.booked_at.max(self.published_at);
                self.state = ClaimState::Claimed(claim);
                Ok(claim)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn window() -> Window {
        Window::open(WindowId(0), Stay::try_new(june(1), june(10)).unwrap(), Local::now())
    }

    fn claim(owner: u64, booked_at: DateTime<Local>) -> Claim {
        Claim::builder()
            .guest_owner_id(OwnerId(owner))
            .guest_snake_id(SnakeId(owner * 10))
            .booked_at(booked_at)
            .build()
    }

    #[test]
    fn candidate_requires_containment() {
        let window = window();
        assert!(window.is_candidate_for(Stay::try_new(june(2), june(5)).unwrap()));
        assert!(window.is_candidate_for(Stay::try_new(june(1), june(10)).unwrap()));
        assert!(!window.is_candidate_for(Stay::try_new(june(9), june(11)).unwrap()));
    }

    #[test]
    fn claimed_window_is_not_a_candidate() {
        let mut window = window();
        let _ = window.try_claim(claim(1, Local::now())).unwrap();
        assert!(!window.is_candidate_for(Stay::try_new(june(2), june(5)).unwrap()));
    }

    #[test]
    fn second_claim_is_rejected() {
        let mut window = window();
        let first = window.try_claim(claim(1, Local::now())).unwrap();
        let existing = window.try_claim(claim(2, Local::now())).unwrap_err();
        assert_eq!(existing, first);
        assert_eq!(window.claim(), Some(&first));
        assert_eq!(window.stay(), Stay::try_new(june(1), june(10)).unwrap());
    }

    #[test]
    fn booked_at_is_not_before_publication() {
        let mut window = window();
        let too_early = window.published_at() - TimeDelta::hours(1);
        let claim = window.try_claim(claim(1, too_early)).unwrap();
        assert_eq!(claim.booked_at, window.published_at());
    }
}
