use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        id::{OwnerId, SnakeId},
        snake::SnakeProfile,
    },
    quantity::length::Meters,
};

/// Registered user. The same account may act both as a host and as a guest.
#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub email: String,
}

#[must_use]
#[derive(Clone, Debug, Builder)]
pub struct NewSnake {
    pub owner_id: OwnerId,

    #[builder(into)]
    pub name: String,

    #[builder(into)]
    pub species: String,

    pub length: Meters,

    #[builder(default)]
    pub is_venomous: bool,
}

#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snake {
    pub id: SnakeId,
    pub owner_id: OwnerId,
    pub name: String,
    pub species: String,
    pub length: Meters,
    pub is_venomous: bool,
}

impl Snake {
    pub fn new(id: SnakeId, snake: NewSnake) -> Self {
        Self {
            id,
            owner_id: snake.owner_id,
            name: snake.name,
            species: snake.species,
            length: snake.length,
            is_venomous: snake.is_venomous,
        }
    }

    pub const fn profile(&self) -> SnakeProfile {
        SnakeProfile { id: self.id, length: self.length, is_venomous: self.is_venomous }
    }
}

/// Emails are matched case-insensitively and without surrounding whitespace.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
