mod timestamp;
pub use timestamp::Timestamp;

mod sample;
pub use sample::Sample;

mod reading;
pub use reading::{Reading, SpO2};
