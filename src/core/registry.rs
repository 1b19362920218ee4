use std::collections::BTreeMap;

use crate::{
    core::{
        cage::{Cage, NewCage},
        id::{CageId, OwnerId},
        snake::SnakeProfile,
        store::CageStore,
    },
    prelude::*,
    quantity::{area::SquareMeters, price::Price},
};

/// Cages and their static attributes.
pub struct CageRegistry<'s, S> {
    store: &'s S,
}

impl<'s, S: CageStore> CageRegistry<'s, S> {
    pub const fn new(store: &'s S) -> Self {
        Self { store }
    }

    #[instrument(skip_all, fields(owner_id = %cage.owner_id, name = %cage.name))]
    pub fn register(&self, cage: NewCage) -> Result<Cage> {
        ensure!(cage.square_meters > SquareMeters::ZERO, "cage area must be positive");
        ensure!(cage.price_per_night >= Price::ZERO, "price per night must not be negative");
        let cage = self.store.insert(cage)?;
        info!(id = %cage.id, "registered cage");
        Ok(cage)
    }

    /// Cages of the owner in registration order.
    pub fn cages_of(&self, owner_id: OwnerId) -> Result<Vec<Cage>> {
        Ok(self.store.load_all()?.into_iter().filter(|cage| cage.owner_id == owner_id).collect())
    }

    /// Cages that can host the snake, judging by their static attributes only.
    ///
    /// All the cages come from a single snapshot of the store, windows included.
    #[instrument(skip_all, fields(snake_id = %snake.id))]
    pub fn suitable_for(&self, snake: &SnakeProfile) -> Result<BTreeMap<CageId, Cage>> {
        let cages: BTreeMap<CageId, Cage> = self
            .store
            .load_all()?
            .into_iter()
            .filter(|cage| cage.is_suitable_for(snake))
            .map(|cage| (cage.id, cage))
            .collect();
        debug!(n_cages = cages.len(), "filtered");
        Ok(cages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::id::SnakeId,
        db::Db,
        quantity::length::Meters,
    };

    fn suitable_ids(registry: &CageRegistry<'_, Db>, snake: &SnakeProfile) -> Result<Vec<CageId>> {
        Ok(registry.suitable_for(snake)?.into_keys().collect())
    }

    fn new_cage(owner_id: u64, square_meters: f64, allow_dangerous_snakes: bool) -> NewCage {
        NewCage::builder()
            .owner_id(OwnerId(owner_id))
            .name("Cage")
            .square_meters(SquareMeters(square_meters))
            .allow_dangerous_snakes(allow_dangerous_snakes)
            .price_per_night(Price(5.0))
            .build()
    }

    #[test]
    fn register_validates_attributes() {
        let db = Db::in_memory();
        let registry = CageRegistry::new(&db);
        assert!(registry.register(new_cage(1, 0.0, false)).is_err());
        let mut negative_price = new_cage(1, 1.0, false);
        negative_price.price_per_night = Price(-1.0);
        assert!(registry.register(negative_price).is_err());
        assert!(registry.register(new_cage(1, 1.0, false)).is_ok());
    }

    #[test]
    fn free_cage_is_accepted() -> Result {
        let db = Db::in_memory();
        let mut free = new_cage(1, 1.0, false);
        free.price_per_night = Price::ZERO;
        let cage = CageRegistry::new(&db).register(free)?;
        assert_eq!(cage.price_per_night, Price::ZERO);
        Ok(())
    }

    #[test]
    fn cages_of_owner_ok() -> Result {
        let db = Db::in_memory();
        let registry = CageRegistry::new(&db);
        let first = registry.register(new_cage(1, 1.0, false))?;
        let _other = registry.register(new_cage(2, 1.0, false))?;
        let second = registry.register(new_cage(1, 2.0, false))?;
        let ids: Vec<_> = registry.cages_of(OwnerId(1))?.iter().map(|cage| cage.id).collect();
        assert_eq!(ids, [first.id, second.id]);
        Ok(())
    }

    #[test]
    fn suitable_for_ok() -> Result {
        let db = Db::in_memory();
        let registry = CageRegistry::new(&db);
        let small = registry.register(new_cage(1, 0.5, true))?;
        let safe = registry.register(new_cage(1, 20.0, false))?;
        let dangerous = registry.register(new_cage(1, 20.0, true))?;

        let python = SnakeProfile::builder().id(SnakeId(1)).length(Meters(4.0)).build();
        assert_eq!(suitable_ids(&registry, &python)?, [safe.id, dangerous.id]);

        // Too long for the small cage, and venomous for the safe one.
        let cobra = SnakeProfile::builder().id(SnakeId(2)).length(Meters(3.0)).is_venomous(true).build();
        assert_eq!(suitable_ids(&registry, &cobra)?, [dangerous.id]);

        let viper = SnakeProfile::builder().id(SnakeId(3)).length(Meters(1.0)).is_venomous(true).build();
        assert_eq!(suitable_ids(&registry, &viper)?, [small.id, dangerous.id]);
        Ok(())
    }
}
