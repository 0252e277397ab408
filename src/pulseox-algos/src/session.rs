use pulseox_types::{Reading, Sample, Timestamp};

use crate::{
    AlertAction, AlertController, HeartRateCalculator, PeakDetector, Presence, SAMPLE_HISTORY,
    SampleWindow, SpO2Calculator,
};

/// All per-finger state of the monitor.
#[derive(Debug, Clone, Default)]
pub struct Session {
    peaks: PeakDetector,
    window: SampleWindow<SAMPLE_HISTORY>,
    alert: AlertController,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one sample through presence, peak detection, both estimators and
    /// the alert controller.
    pub fn process(&mut self, sample: Sample, now: Timestamp) -> (Reading, AlertAction) {
        if !Presence::classify(sample.infrared).is_present() {
            self.reset();
            return (Reading::NoFinger, self.alert.absent());
        }

        self.peaks.update(sample.infrared, now);
        self.window.push(sample);

        let heart_rate = HeartRateCalculator::calculate(self.peaks.peaks());
        let spo2 = SpO2Calculator::calculate(self.window.red(), self.window.infrared());

        let action = self.alert.evaluate(heart_rate);
        (Reading::Vitals { heart_rate, spo2 }, action)
    }

    pub fn reset(&mut self) {
        self.peaks.reset();
        self.window.clear();
        self.alert.reset();
    }

    pub fn peak_detector(&self) -> &PeakDetector {
        &self.peaks
    }

    pub fn window(&self) -> &SampleWindow<SAMPLE_HISTORY> {
        &self.window
    }

    pub fn alert(&self) -> &AlertController {
        &self.alert
    }
}
