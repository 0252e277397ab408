use pulseox_types::Timestamp;

use crate::History;

/// Number of most recent peaks kept for heart-rate estimation.
pub const PEAK_HISTORY: usize = 10;

pub type PeakHistory = History<Timestamp, PEAK_HISTORY>;

/// Single-sample-lag local maximum detector on the infrared channel.
///
/// A peak is confirmed on the first falling sample after a rise. There is no
/// smoothing or refractory period, so noise on the waveform can produce
/// double peaks.
#[derive(Debug, Clone, Default)]
pub struct PeakDetector {
    previous: u32,
    rising: bool,
    peaks: PeakHistory,
}

impl PeakDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one infrared value. Returns `now` if it confirmed a peak.
    pub fn update(&mut self, infrared: u32, now: Timestamp) -> Option<Timestamp> {
        let mut confirmed = None;

        if infrared > self.previous {
            self.rising = true;
        } else if self.rising && infrared < self.previous {
            self.peaks.push(now);
            self.rising = false;
            confirmed = Some(now);
        }

        self.previous = infrared;
        confirmed
    }

    pub fn peaks(&self) -> &PeakHistory {
        &self.peaks
    }

    pub fn is_rising(&self) -> bool {
        self.rising
    }

    pub fn previous(&self) -> u32 {
        self.previous
    }

    pub fn reset(&mut self) {
        self.previous = 0;
        self.rising = false;
        self.peaks.clear();
    }
}
