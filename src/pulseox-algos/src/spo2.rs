use pulseox_types::SpO2;

use crate::History;

/// Number of raw samples kept per channel for SpO2 estimation.
pub const SAMPLE_HISTORY: usize = 50;

pub type ChannelHistory = History<u32, SAMPLE_HISTORY>;

pub struct SpO2Calculator;

impl SpO2Calculator {
    pub const MIN_SAMPLES: usize = 10;

    /// Ratio-of-ratios estimate using mean absolute deviation as the AC
    /// component. Returns `None` when the window is too short, the infrared
    /// channel is flat, or the linear fit leaves `0..=100`.
    pub fn calculate(red: &ChannelHistory, ir: &ChannelHistory) -> Option<SpO2> {
        if red.len() < Self::MIN_SAMPLES || ir.len() < Self::MIN_SAMPLES {
            return None;
        }

        let (mean_red, ac_red) = mean_and_deviation(red)?;
        let (mean_ir, ac_ir) = mean_and_deviation(ir)?;

        if mean_red == 0.0 || mean_ir == 0.0 {
            return None;
        }

        let ir_ratio = ac_ir / mean_ir;
        if ir_ratio == 0.0 {
            return None;
        }

        let r = (ac_red / mean_red) / ir_ratio;
        let spo2 = 110.0 - 25.0 * r;
        if !(0.0..=100.0).contains(&spo2) {
            return None;
        }

        SpO2::new(spo2 as u8)
    }
}

fn mean_and_deviation(values: &ChannelHistory) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().map(f64::from).sum::<f64>() / n;
    let deviation = values.iter().map(|v| (f64::from(v) - mean).abs()).sum::<f64>() / n;
    Some((mean, deviation))
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    fn history(values: impl IntoIterator<Item = u32>) -> ChannelHistory {
        let mut history = ChannelHistory::new();
        for v in values {
            history.push(v);
        }
        history
    }

    #[test]
    fn too_few_samples() {
        let red = history((0..9).map(|i| 50_000 + i * 100));
        let ir = history((0..9).map(|i| 80_000 + i * 900));
        assert!(SpO2Calculator::calculate(&red, &ir).is_none());
    }

    #[test]
    fn constant_signal() {
        let red = history([100; 10]);
        let ir = history([100; 10]);
        assert!(SpO2Calculator::calculate(&red, &ir).is_none());
    }

    #[test]
    fn all_zeros() {
        let red = history([0; 20]);
        let ir = history([0; 20]);
        assert!(SpO2Calculator::calculate(&red, &ir).is_none());
    }

    #[test]
    fn ratio_of_one() {
        // Same relative modulation on both channels: R = 1, SpO2 = 110 - 25 = 85
        let red = history((0..30).map(|i| 1000 + (i % 3) * 10));
        let ir = history((0..30).map(|i| 2000 + (i % 3) * 20));
        let result = SpO2Calculator::calculate(&red, &ir).unwrap();
        assert!(
            (84..=85).contains(&result.percent()),
            "Expected ~85%, got {}",
            result
        );
    }

    #[test]
    fn synthetic_normal() {
        // IR modulated 2x more than red relative to DC: R = 0.5, SpO2 = 97.5
        let red = history((0..50).map(|i| 40_000 + (i % 5) * 100));
        let ir = history((0..50).map(|i| 40_000 + (i % 5) * 200));
        let result = SpO2Calculator::calculate(&red, &ir).unwrap();
        assert_eq!(result.percent(), 97);
    }

    #[test]
    fn flat_red_reads_full_saturation() {
        // R = 0 gives 110, outside the plausible range
        let red = history([40_000; 20]);
        let ir = history((0..20).map(|i| 40_000 + (i % 2) * 500));
        assert!(SpO2Calculator::calculate(&red, &ir).is_none());
    }

    #[test]
    fn implausibly_low() {
        // Red modulated 5x more than IR: R = 5, SpO2 = -15
        let red = history((0..20).map(|i| 10_000 + (i % 2) * 1000));
        let ir = history((0..20).map(|i| 10_000 + (i % 2) * 200));
        assert!(SpO2Calculator::calculate(&red, &ir).is_none());
    }

    #[test]
    fn noisy_signal_stays_in_range() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let red = history((0..50).map(|_| rng.random_range(30_000..31_000)));
            let ir = history((0..50).map(|_| rng.random_range(60_000..64_000)));
            if let Some(spo2) = SpO2Calculator::calculate(&red, &ir) {
                assert!(spo2.percent() <= 100);
            }
        }
    }

    #[test]
    fn repeated_queries_do_not_mutate() {
        let red = history([100; 10]);
        let ir = history([100; 10]);
        for _ in 0..5 {
            assert!(SpO2Calculator::calculate(&red, &ir).is_none());
        }
        assert_eq!(red.len(), 10);
        assert_eq!(ir.iter().collect::<Vec<_>>(), vec![100; 10]);
    }
}
