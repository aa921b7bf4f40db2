//! Price bars - domain model and storage trait.

mod prices_model;
mod prices_traits;

pub use prices_model::{normalize_to_day, PriceBar};
pub use prices_traits::PriceStore;
