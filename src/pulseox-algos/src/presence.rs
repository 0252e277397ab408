/// Whether a finger is covering the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Present,
    Absent,
}

impl Presence {
    /// Infrared intensity below which the sensor is considered uncovered.
    pub const MIN_SIGNAL: u32 = 5000;

    pub fn classify(infrared: u32) -> Self {
        if infrared >= Self::MIN_SIGNAL {
            Presence::Present
        } else {
            Presence::Absent
        }
    }

    pub fn is_present(self) -> bool {
        self == Presence::Present
    }
}
