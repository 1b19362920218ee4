use std::{
    fmt::{Display, Formatter},
    ops::Mul,
};

quantity!(Price, "$");

impl Display for Price {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Mul<i64> for Price {
    type Output = Self;

    #[expect(clippy::cast_precision_loss)]
    fn mul(self, nights: i64) -> Self::Output {
        Self(self.0 * nights as f64)
    }
}
