use std::fmt::Debug;

use embedded_hal::{
    delay::DelayNs,
    digital::{Error as _, OutputPin, PinState},
};
use pulseox_types::Timestamp;

use crate::MonitorError;

/// Acquisition parameters pushed to the optical sensor at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSettings {
    pub fifo_average: u8,
    pub sample_rate: u16,
    pub led_amplitude: u8,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            fifo_average: 4,
            sample_rate: 200,
            led_amplitude: 0x2F,
        }
    }
}

/// Two-wavelength PPG sensor.
///
/// Per ready sample the caller queries `has_sample`, then `take_red`, then
/// `take_infrared`, exactly once each.
pub trait SampleSource {
    type Error: Debug;

    /// Whether the device answers on its bus.
    fn probe(&mut self) -> Result<bool, Self::Error>;

    fn configure(&mut self, settings: &SensorSettings) -> Result<(), Self::Error>;

    /// Advances the internal FIFO state without blocking.
    fn poll(&mut self) -> Result<(), Self::Error>;

    fn has_sample(&mut self) -> bool;

    fn take_red(&mut self) -> u32;

    fn take_infrared(&mut self) -> u32;

    /// Sources backed by a finite recording return true once drained.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Line-oriented text display. A frame is `clear`, one or more `draw_line`,
/// then `commit`.
pub trait TextDisplay {
    type Error: Debug;

    fn clear(&mut self) -> Result<(), Self::Error>;

    fn draw_line(&mut self, text: &str, x: i32, y: i32) -> Result<(), Self::Error>;

    fn commit(&mut self) -> Result<(), Self::Error>;
}

/// Free-running millisecond counter.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Red LED, green LED and buzzer.
pub struct Outputs<R, G, B> {
    pub red_led: R,
    pub green_led: G,
    pub buzzer: B,
}

impl<R, G, B> Outputs<R, G, B>
where
    R: OutputPin,
    G: OutputPin,
    B: OutputPin,
{
    pub fn new(red_led: R, green_led: G, buzzer: B) -> Self {
        Self {
            red_led,
            green_led,
            buzzer,
        }
    }

    pub fn set_leds(&mut self, red: bool, green: bool) -> Result<(), MonitorError> {
        set(&mut self.red_led, red)?;
        set(&mut self.green_led, green)
    }

    pub fn set_buzzer(&mut self, on: bool) -> Result<(), MonitorError> {
        set(&mut self.buzzer, on)
    }

    /// Sounds `count` buzzer pulses of `duration_ms`, blocking for each.
    pub fn pulse<D: DelayNs>(
        &mut self,
        delay: &mut D,
        count: u8,
        duration_ms: u32,
    ) -> Result<(), MonitorError> {
        for _ in 0..count {
            self.set_buzzer(true)?;
            delay.delay_ms(duration_ms);
            self.set_buzzer(false)?;
        }
        Ok(())
    }

    pub fn all_off(&mut self) -> Result<(), MonitorError> {
        self.set_leds(false, false)?;
        self.set_buzzer(false)
    }
}

fn set<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), MonitorError> {
    pin.set_state(PinState::from(high))
        .map_err(|e| MonitorError::Output(e.kind()))
}
