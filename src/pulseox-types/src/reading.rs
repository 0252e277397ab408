use std::fmt;

/// Blood-oxygen saturation in whole percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpO2(u8);

impl SpO2 {
    pub fn new(percent: u8) -> Option<Self> {
        (percent <= 100).then_some(Self(percent))
    }

    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for SpO2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Result of processing one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// Infrared intensity below the finger threshold, all history dropped.
    NoFinger,
    /// Finger on the sensor. A heart rate of 0 means no estimate yet.
    Vitals { heart_rate: u32, spo2: Option<SpO2> },
}

impl Reading {
    pub fn heart_rate(&self) -> Option<u32> {
        match self {
            Reading::NoFinger => None,
            Reading::Vitals { heart_rate, .. } => Some(*heart_rate),
        }
    }

    pub fn spo2(&self) -> Option<SpO2> {
        match self {
            Reading::NoFinger => None,
            Reading::Vitals { spo2, .. } => *spo2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spo2_rejects_above_hundred() {
        assert!(SpO2::new(101).is_none());
        assert_eq!(SpO2::new(100).map(SpO2::percent), Some(100));
        assert_eq!(SpO2::new(0).map(SpO2::percent), Some(0));
    }

    #[test]
    fn no_finger_has_no_vitals() {
        assert_eq!(Reading::NoFinger.heart_rate(), None);
        assert_eq!(Reading::NoFinger.spo2(), None);
    }
}
