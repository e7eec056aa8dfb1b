pub mod raster;
pub mod sink;
