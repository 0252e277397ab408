pub(crate) mod history;
pub use history::{History, SampleWindow};

pub(crate) mod presence;
pub use presence::Presence;

pub(crate) mod peak;
pub use peak::{PEAK_HISTORY, PeakDetector, PeakHistory};

pub(crate) mod heart_rate;
pub use heart_rate::HeartRateCalculator;

pub(crate) mod spo2;
pub use spo2::{ChannelHistory, SAMPLE_HISTORY, SpO2Calculator};

pub(crate) mod alert;
pub use alert::{AlertAction, AlertController, AlertLevel};

pub(crate) mod session;
pub use session::Session;
