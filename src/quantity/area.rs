use std::fmt::{Display, Formatter};

quantity!(SquareMeters, "m²");

impl Display for SquareMeters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m²", self.0)
    }
}
