pub use self::{dice::*, die_face::*, face_counts::*, scoring::*};

pub(crate) mod dice;
pub(crate) mod die_face;
pub(crate) mod face_counts;
pub mod scoring;
