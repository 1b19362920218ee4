use derive_more::{Display, From, FromStr};
use serde::{Deserialize, Serialize};

#[derive(
    Copy, Clone, Debug, Display, Eq, From, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OwnerId(pub u64);

#[derive(
    Copy, Clone, Debug, Display, Eq, From, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SnakeId(pub u64);

#[derive(
    Copy, Clone, Debug, Display, Eq, From, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CageId(pub u64);

/// Window ordinal within its cage, assigned in publication order.
#[derive(
    Copy, Clone, Debug, Display, Eq, From, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WindowId(pub u32);
