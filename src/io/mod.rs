//! External collaborators: layer loading and table export. The engine never
//! touches the filesystem; everything behind these modules is replaceable.

pub mod csv;
pub mod shapefile;
pub mod xlsx;
