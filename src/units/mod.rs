pub mod convert;
pub mod derived;

pub use convert::{convert, normalize, target_unit};
pub use derived::{dew_point, feels_like, heat_index, wind_chill};
