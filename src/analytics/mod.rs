//! Pipeline run log and the stats built from it.

pub mod logger;
pub mod reporter;
