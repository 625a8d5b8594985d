//! Reader for NAIF SPK kernels (DAF container, type 2 Chebyshev segments).
mod daf_header;
mod directory;
mod ephemeris_record;
mod jpl_ephem_header;
pub mod naif_data;
pub mod naif_ids;
pub mod naif_version;
mod summary_record;
