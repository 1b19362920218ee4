use bon::Builder;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        id::{CageId, OwnerId, WindowId},
        snake::SnakeProfile,
        window::Window,
    },
    ops::Stay,
    quantity::{area::SquareMeters, price::Price},
};

/// Static attributes of a cage that is about to be registered.
#[must_use]
#[derive(Clone, Debug, Builder)]
pub struct NewCage {
    pub owner_id: OwnerId,

    #[builder(into)]
    pub name: String,

    pub square_meters: SquareMeters,

    #[builder(default)]
    pub is_carpeted: bool,

    #[builder(default)]
    pub has_toys: bool,

    #[builder(default)]
    pub allow_dangerous_snakes: bool,

    pub price_per_night: Price,
}

#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cage {
    pub id: CageId,
    pub owner_id: OwnerId,
    pub name: String,
    pub square_meters: SquareMeters,
    pub is_carpeted: bool,
    pub has_toys: bool,
    pub allow_dangerous_snakes: bool,
    pub price_per_night: Price,

    /// Published windows in publication order.
    #[serde(default)]
    pub windows: Vec<Window>,
}

impl Cage {
    pub fn new(id: CageId, cage: NewCage) -> Self {
        Self {
            id,
            owner_id: cage.owner_id,
            name: cage.name,
            square_meters: cage.square_meters,
            is_carpeted: cage.is_carpeted,
            has_toys: cage.has_toys,
            allow_dangerous_snakes: cage.allow_dangerous_snakes,
            price_per_night: cage.price_per_night,
            windows: Vec::new(),
        }
    }

    /// Check the static constraints: enough floor for the snake, and a venomous snake
    /// only where the owner allows dangerous snakes.
    #[must_use]
    pub fn is_suitable_for(&self, snake: &SnakeProfile) -> bool {
        self.square_meters >= snake.length.min_cage_area()
            && (self.allow_dangerous_snakes || !snake.is_venomous)
    }

    #[must_use]
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|window| window.id() == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|window| window.id() == id)
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn next_window_id(&self) -> WindowId {
        WindowId(self.windows.len() as u32)
    }

    /// Open windows spanning the entire stay, earliest check-in first.
    ///
    /// Windows with the same check-in keep their publication order.
    pub fn candidate_windows(&self, stay: Stay) -> Vec<Window> {
        self.windows
            .iter()
            .filter(|window| window.is_candidate_for(stay))
            .sorted_by_key(|window| (window.check_in(), window.id()))
            .cloned()
            .collect()
    }
}
