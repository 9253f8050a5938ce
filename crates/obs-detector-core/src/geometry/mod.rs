pub mod region;

pub use region::ScreenRegion;
