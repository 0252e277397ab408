use crate::PeakHistory;

pub struct HeartRateCalculator;

impl HeartRateCalculator {
    pub const MIN_PEAKS: usize = 2;

    /// Beats per minute over the peak window, 0 when there is no estimate.
    ///
    /// The rate divides the number of recorded peaks (not the number of
    /// intervals) by the span between the oldest and newest peak.
    pub fn calculate(peaks: &PeakHistory) -> u32 {
        let beats = peaks.len();
        if beats < Self::MIN_PEAKS {
            return 0;
        }

        let (Some(first), Some(last)) = (peaks.first(), peaks.last()) else {
            return 0;
        };

        let duration_ms = last.diff(first);
        if duration_ms <= 0 {
            return 0;
        }

        (beats as f64 / f64::from(duration_ms) * 60_000_f64) as u32
    }
}
