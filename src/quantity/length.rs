use std::fmt::{Display, Formatter};

use crate::quantity::area::SquareMeters;

quantity!(Meters, "m");

impl Display for Meters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.0)
    }
}

impl Meters {
    /// Smallest cage floor a snake of this length may be housed on.
    pub fn min_cage_area(self) -> SquareMeters {
        SquareMeters(self.0 / 4.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn min_cage_area_is_quarter_of_length() {
        assert_abs_diff_eq!(Meters(40.0).min_cage_area().0, 10.0);
        assert_abs_diff_eq!(Meters(1.8).min_cage_area().0, 0.45);
    }
}
