/// UI building blocks
///
/// This module renders the application surface:
/// - Result and favorites card grids (grid.rs)
/// - The detail modal overlay (detail.rs)

pub mod detail;
pub mod grid;
