use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Normal,
    Alert,
    NoFinger,
}

/// Output state for one processed sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertAction {
    pub level: AlertLevel,
    pub red: bool,
    pub green: bool,
    /// Number of buzzer pulses to sound, each `AlertController::PULSE_MS` long.
    pub pulses: u8,
}

/// Maps heart rate to LED and buzzer state with a one-shot escalation.
///
/// The first out-of-range sample sounds an extra pulse and sets the latch.
/// The latch is only cleared when the finger leaves the sensor; returning to
/// the normal range keeps it set, so a heart rate oscillating around a
/// threshold escalates once per finger placement.
#[derive(Debug, Clone, Default)]
pub struct AlertController {
    latched: bool,
}

impl AlertController {
    pub const HEART_RATE_LOW: u32 = 50;
    pub const HEART_RATE_HIGH: u32 = 120;
    pub const NORMAL_RANGE: RangeInclusive<u32> = Self::HEART_RATE_LOW..=Self::HEART_RATE_HIGH;
    pub const PULSE_MS: u32 = 200;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    pub fn absent(&mut self) -> AlertAction {
        self.latched = false;
        AlertAction {
            level: AlertLevel::NoFinger,
            red: true,
            green: false,
            pulses: 1,
        }
    }

    /// `heart_rate` of 0 means no estimate and counts as out of range.
    pub fn evaluate(&mut self, heart_rate: u32) -> AlertAction {
        if Self::NORMAL_RANGE.contains(&heart_rate) {
            return AlertAction {
                level: AlertLevel::Normal,
                red: false,
                green: true,
                pulses: 0,
            };
        }

        let mut pulses = 1;
        if !self.latched {
            pulses += 1;
            self.latched = true;
        }

        AlertAction {
            level: AlertLevel::Alert,
            red: true,
            green: false,
            pulses,
        }
    }

    pub fn reset(&mut self) {
        self.latched = false;
    }
}
