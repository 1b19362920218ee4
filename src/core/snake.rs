use bon::Builder;

use crate::{core::id::SnakeId, quantity::length::Meters};

/// The part of a snake the engine cares about.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct SnakeProfile {
    pub id: SnakeId,
    pub length: Meters,

    #[builder(default)]
    pub is_venomous: bool,
}
