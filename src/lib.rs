pub mod game;
pub mod raster;
pub mod surface;
pub mod util;
