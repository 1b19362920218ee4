use chrono::{DateTime, Local};
use derive_more::Display;

use crate::{
    core::{
        cage::{Cage, NewCage},
        id::{CageId, WindowId},
        window::{Claim, Window},
    },
    ops::Stay,
    prelude::*,
};

/// Something the caller referred to that the store does not have.
#[derive(Copy, Clone, Debug, Display, Eq, PartialEq)]
pub enum Missing {
    #[display("cage #{_0}")]
    Cage(CageId),

    #[display("window #{_1} of cage #{_0}")]
    Window(CageId, WindowId),
}

/// Outcome of [`CageStore::compare_and_swap`].
#[must_use]
#[derive(Clone, Debug)]
pub enum Swap {
    /// The window was open and now carries the claim. Holds the cage as it is after the swap.
    Swapped(Cage),

    /// The window had already been claimed, nothing has changed.
    Claimed(Claim),

    Missing(Missing),
}

/// Persistence port of the engine.
///
/// Implementations must make every method atomic: in particular, [`CageStore::compare_and_swap`]
/// must observe the open state and write the claim without anybody else claiming in between.
pub trait CageStore: Sync {
    /// All cages in identifier order.
    fn load_all(&self) -> Result<Vec<Cage>>;

    fn load(&self, cage_id: CageId) -> Result<Option<Cage>>;

    /// Register the cage under a freshly allocated identifier.
    fn insert(&self, cage: NewCage) -> Result<Cage>;

    /// Append an open window, or return [`None`] if there is no such cage.
    fn append_window(
        &self,
        cage_id: CageId,
        stay: Stay,
        published_at: DateTime<Local>,
    ) -> Result<Option<Window>>;

    /// Claim the window if, and only if, it is still open.
    fn compare_and_swap(&self, cage_id: CageId, window_id: WindowId, claim: Claim) -> Result<Swap>;
}
