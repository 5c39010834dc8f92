//! Parsers for `/proc` files. Pure functions over file contents; callers do the reading.

pub mod loadavg;
pub mod meminfo;
pub mod mountinfo;
pub mod stat;
