use std::{
    convert::Infallible,
    f64::consts::TAU,
    time::{Duration, Instant},
};

use pulseox_types::Sample;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{SampleSource, SensorSettings};

#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub bpm: u32,
    pub spo2: u8,
    /// Lift the finger for the last `FINGER_OFF` of every period.
    pub finger_off_every: Option<Duration>,
    pub connected: bool,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bpm: 75,
            spo2: 97,
            finger_off_every: None,
            connected: true,
            seed: None,
        }
    }
}

/// Synthetic MAX30102 producing a PPG waveform from the wall clock.
pub struct SimulatedSensor {
    config: SimulationConfig,
    settings: Option<SensorSettings>,
    started: Instant,
    last_sample: Option<Duration>,
    pending: Option<Sample>,
    rng: StdRng,
}

impl SimulatedSensor {
    const IR_DC: f64 = 80_000.0;
    const IR_AC: f64 = 1_600.0;
    const RED_DC: f64 = 45_000.0;
    const AMBIENT: u32 = 1_200;
    const NOISE: u32 = 40;
    const FINGER_OFF: Duration = Duration::from_secs(3);

    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            settings: None,
            started: Instant::now(),
            last_sample: None,
            pending: None,
            rng,
        }
    }

    /// Effective output rate after FIFO averaging.
    fn sample_period(&self) -> Option<Duration> {
        let settings = self.settings?;
        let rate = u64::from(settings.sample_rate) / u64::from(settings.fifo_average.max(1));
        Some(Duration::from_micros(1_000_000 / rate.max(1)))
    }

    fn finger_on(&self, elapsed: Duration) -> bool {
        let Some(period) = self.config.finger_off_every else {
            return true;
        };

        let period = period.as_millis().max(1);
        let phase = elapsed.as_millis() % period;
        phase + Self::FINGER_OFF.as_millis() < period
    }

    /// Sample at `elapsed` since start.
    pub fn sample_at(&mut self, elapsed: Duration) -> Sample {
        if !self.finger_on(elapsed) {
            let red = Self::AMBIENT + self.rng.random_range(0..Self::NOISE);
            let infrared = Self::AMBIENT + self.rng.random_range(0..Self::NOISE);
            return Sample::new(red, infrared);
        }

        let beats = elapsed.as_secs_f64() * f64::from(self.config.bpm) / 60.0;
        let shape = pulse_shape(beats.fract());

        // Invert 110 - 25 R to get the red modulation for the requested SpO2
        let ratio = (110.0 - f64::from(self.config.spo2.min(100))) / 25.0;
        let ir_modulation = Self::IR_AC / Self::IR_DC;
        let red_ac = ratio * ir_modulation * Self::RED_DC;

        let infrared = Self::IR_DC + Self::IR_AC * shape;
        let red = Self::RED_DC + red_ac * shape;

        Sample::new(
            red as u32 + self.rng.random_range(0..Self::NOISE),
            infrared as u32 + self.rng.random_range(0..Self::NOISE),
        )
    }
}

/// Systolic upstroke followed by a slower diastolic decay, in `0.0..=1.0`.
fn pulse_shape(phase: f64) -> f64 {
    const SYSTOLE: f64 = 0.3;
    if phase < SYSTOLE {
        (1.0 - (phase / SYSTOLE * TAU / 2.0).cos()) / 2.0
    } else {
        let decay = (phase - SYSTOLE) / (1.0 - SYSTOLE);
        (1.0 + (decay * TAU / 2.0).cos()) / 2.0
    }
}

impl SampleSource for SimulatedSensor {
    type Error = Infallible;

    fn probe(&mut self) -> Result<bool, Self::Error> {
        Ok(self.config.connected)
    }

    fn configure(&mut self, settings: &SensorSettings) -> Result<(), Self::Error> {
        debug!("Simulated sensor configured with {:?}", settings);
        self.settings = Some(*settings);
        self.started = Instant::now();
        self.last_sample = None;
        Ok(())
    }

    fn poll(&mut self) -> Result<(), Self::Error> {
        let Some(period) = self.sample_period() else {
            return Ok(());
        };

        let elapsed = self.started.elapsed();
        let due = self
            .last_sample
            .is_none_or(|last| elapsed.saturating_sub(last) >= period);
        if due {
            self.pending = Some(self.sample_at(elapsed));
            self.last_sample = Some(elapsed);
        }
        Ok(())
    }

    fn has_sample(&mut self) -> bool {
        self.pending.is_some()
    }

    fn take_red(&mut self) -> u32 {
        self.pending.map(|s| s.red).unwrap_or_default()
    }

    fn take_infrared(&mut self) -> u32 {
        self.pending.take().map(|s| s.infrared).unwrap_or_default()
    }
}
