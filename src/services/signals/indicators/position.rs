//! Price position relative to a band.

use crate::types::PricePosition;

/// Classify `price` against `upper` and `lower`.
///
/// Ties resolve toward the band, upper first, so a price equal to collapsed
/// bands is `Upper`.
pub fn price_position(price: f64, upper: f64, lower: f64) -> PricePosition {
    if price >= upper {
        PricePosition::Upper
    } else if price <= lower {
        PricePosition::Lower
    } else {
        PricePosition::Middle
    }
}
