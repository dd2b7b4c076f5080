pub mod profile;
pub mod replay;

pub use profile::{build_samples, GaitProfile, GaitSegment};
pub use replay::load_samples;
