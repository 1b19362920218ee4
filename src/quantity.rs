#[macro_use]
mod macros;

pub mod area;
pub mod length;
pub mod price;
