use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::{delay::DelayNs, digital::OutputPin};
use pulseox_algos::{AlertAction, AlertController, AlertLevel, Session};
use pulseox_types::{Reading, Sample};

use crate::{
    Clock, MonitorError, Outputs, SampleSource, Screen, SensorSettings, TextDisplay,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    pub sensor: SensorSettings,
    pub poll_interval_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sensor: SensorSettings::default(),
            poll_interval_ms: 100,
        }
    }
}

/// Owns the devices and the per-finger [`Session`] and drives the polling loop.
pub struct Monitor<S, D, R, G, B, T, C> {
    source: S,
    display: D,
    outputs: Outputs<R, G, B>,
    delay: T,
    clock: C,
    config: MonitorConfig,
    session: Session,
    level: Option<AlertLevel>,
}

impl<S, D, R, G, B, T, C> Monitor<S, D, R, G, B, T, C>
where
    S: SampleSource,
    D: TextDisplay,
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
    T: DelayNs,
    C: Clock,
{
    pub fn new(
        source: S,
        display: D,
        outputs: Outputs<R, G, B>,
        delay: T,
        clock: C,
        config: MonitorConfig,
    ) -> Self {
        Self {
            source,
            display,
            outputs,
            delay,
            clock,
            config,
            session: Session::new(),
            level: None,
        }
    }

    /// Probes and configures the sensor. A missing sensor is fatal and the
    /// loop must not be started.
    pub fn initialize(&mut self) -> Result<(), MonitorError> {
        self.render(Screen::Initializing)?;

        let present = self.source.probe().map_err(MonitorError::sensor)?;
        if !present {
            self.render(Screen::DeviceError)?;
            return Err(MonitorError::DeviceAbsent);
        }

        let settings = self.config.sensor;
        self.source
            .configure(&settings)
            .map_err(MonitorError::sensor)?;
        info!(
            "Sensor configured: average {}, {} Hz, LED amplitude {:#04x}",
            settings.fifo_average, settings.sample_rate, settings.led_amplitude
        );

        self.render(Screen::Ready)
    }

    /// One loop iteration without the idle delay. Consumes at most one
    /// sample; returns `None` without touching any state when none is ready.
    pub fn step(&mut self) -> Result<Option<Reading>, MonitorError> {
        self.source.poll().map_err(MonitorError::sensor)?;
        if !self.source.has_sample() {
            return Ok(None);
        }

        let red = self.source.take_red();
        let infrared = self.source.take_infrared();
        self.process_sample(Sample::new(red, infrared)).map(Some)
    }

    pub fn process_sample(&mut self, sample: Sample) -> Result<Reading, MonitorError> {
        let now = self.clock.now();
        let (reading, action) = self.session.process(sample, now);
        debug!("{} {:?} -> {:?}", now, sample, reading);

        self.render(Screen::from(reading))?;
        self.log_transition(&action);
        self.apply(action)?;

        Ok(reading)
    }

    /// Polls until `stop` is set or the source runs dry, then drives all
    /// outputs to the safe state.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<(), MonitorError> {
        info!("Monitoring, polling every {}ms", self.config.poll_interval_ms);
        let result = self.poll_until(stop);
        let shutdown = self.shutdown();
        result.and(shutdown)
    }

    fn poll_until(&mut self, stop: &AtomicBool) -> Result<(), MonitorError> {
        while !stop.load(Ordering::SeqCst) {
            if self.source.is_finished() {
                info!("Sample source exhausted");
                break;
            }

            self.step()?;
            self.delay.delay_ms(self.config.poll_interval_ms);
        }
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<(), MonitorError> {
        self.safe_state()?;
        self.render(Screen::Stopped)?;
        info!("Program stopped");
        Ok(())
    }

    /// Buzzer and both LEDs off, display untouched.
    pub fn safe_state(&mut self) -> Result<(), MonitorError> {
        self.outputs.all_off()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    fn render(&mut self, screen: Screen) -> Result<(), MonitorError> {
        self.display.clear().map_err(MonitorError::display)?;
        for line in screen.lines() {
            self.display
                .draw_line(&line.text, line.x, line.y)
                .map_err(MonitorError::display)?;
        }
        self.display.commit().map_err(MonitorError::display)
    }

    fn apply(&mut self, action: AlertAction) -> Result<(), MonitorError> {
        if action.pulses == 0 {
            self.outputs.set_buzzer(false)?;
        }
        self.outputs.set_leds(action.red, action.green)?;
        self.outputs
            .pulse(&mut self.delay, action.pulses, AlertController::PULSE_MS)
    }

    fn log_transition(&mut self, action: &AlertAction) {
        if action.level == AlertLevel::Alert && action.pulses > 1 {
            warn!("Heart rate out of range");
        }

        if self.level == Some(action.level) {
            return;
        }

        match action.level {
            AlertLevel::NoFinger => info!("No finger on sensor"),
            AlertLevel::Normal => info!("Heart rate in range"),
            AlertLevel::Alert => {}
        }
        self.level = Some(action.level);
    }
}
