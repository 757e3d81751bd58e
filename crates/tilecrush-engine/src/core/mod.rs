pub use self::{grid::*, tile::*};

pub(crate) mod grid;
pub(crate) mod tile;
