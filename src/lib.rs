pub mod almanac;
pub mod constants;
pub mod crescent_errors;
pub mod crescent_width;
pub mod criteria;
pub mod earth_orientation;
pub mod env_state;
pub mod geometry;
pub mod jpl_ephem;
pub mod observers;
pub mod sweep;
pub mod time;
