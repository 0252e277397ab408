use std::{convert::Infallible, thread, time::Duration, time::Instant};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};
use pulseox_types::Timestamp;

use crate::{Clock, TextDisplay};

/// Prints each committed frame to stdout when it differs from the previous one.
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    drawing: Vec<(i32, String)>,
    shown: Vec<(i32, String)>,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextDisplay for ConsoleDisplay {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.drawing.clear();
        Ok(())
    }

    fn draw_line(&mut self, text: &str, _x: i32, y: i32) -> Result<(), Self::Error> {
        self.drawing.push((y, text.to_owned()));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.drawing.sort_by_key(|(y, _)| *y);
        if self.drawing == self.shown {
            return Ok(());
        }

        let frame = self
            .drawing
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join(" | ");
        println!("{}", frame);

        self.shown = self.drawing.clone();
        Ok(())
    }
}

/// Output pin that only logs its level.
#[derive(Debug)]
pub struct LoggedPin {
    name: &'static str,
    pin: u8,
    high: bool,
}

impl LoggedPin {
    pub fn new(name: &'static str, pin: u8) -> Self {
        Self {
            name,
            pin,
            high: false,
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    fn set(&mut self, high: bool) {
        if self.high != high {
            debug!("{} (GPIO{}) -> {}", self.name, self.pin, if high { "on" } else { "off" });
        }
        self.high = high;
    }
}

impl ErrorType for LoggedPin {
    type Error = Infallible;
}

impl OutputPin for LoggedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

/// Blocking delay backed by `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

/// Milliseconds since construction, truncated to a wrapping `u32` counter.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.started.elapsed().as_millis() as u32)
    }
}
