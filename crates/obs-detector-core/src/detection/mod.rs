pub mod counts;

pub use counts::DetectionCounts;
