//! Allocation chart output port.

use std::path::Path;

use crate::domain::error::RothkitError;
use crate::domain::glide_path::GlidePath;

pub trait ChartPort {
    /// Render the glide path with the current age marked and write it to `out`,
    /// replacing any existing file.
    fn write_allocation_chart(&self, path: &GlidePath, out: &Path) -> Result<(), RothkitError>;
}
