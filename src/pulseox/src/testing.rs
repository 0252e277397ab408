use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    convert::Infallible,
    rc::Rc,
};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};
use pulseox_types::{Sample, Timestamp};

use crate::{Clock, SampleSource, SensorSettings, TextDisplay};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pin(&'static str, bool),
    Delay(u32),
    Frame(Vec<String>),
}

/// Shared, ordered log of everything the fakes observed.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Recorder {
    fn record(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn frames(&self) -> Vec<Vec<String>> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Frame(lines) => Some(lines),
                _ => None,
            })
            .collect()
    }
}

pub struct FakeSource {
    samples: VecDeque<Sample>,
    present: bool,
    finite: bool,
    pub configured: Option<SensorSettings>,
    pub polls: usize,
}

impl FakeSource {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples: samples.into(),
            present: true,
            finite: false,
            configured: None,
            polls: 0,
        }
    }

    pub fn absent() -> Self {
        Self {
            present: false,
            ..Self::new(vec![])
        }
    }

    pub fn finite(mut self) -> Self {
        self.finite = true;
        self
    }
}

impl SampleSource for FakeSource {
    type Error = Infallible;

    fn probe(&mut self) -> Result<bool, Self::Error> {
        Ok(self.present)
    }

    fn configure(&mut self, settings: &SensorSettings) -> Result<(), Self::Error> {
        self.configured = Some(*settings);
        Ok(())
    }

    fn poll(&mut self) -> Result<(), Self::Error> {
        self.polls += 1;
        Ok(())
    }

    fn has_sample(&mut self) -> bool {
        !self.samples.is_empty()
    }

    fn take_red(&mut self) -> u32 {
        self.samples.front().map(|s| s.red).unwrap_or_default()
    }

    fn take_infrared(&mut self) -> u32 {
        self.samples
            .pop_front()
            .map(|s| s.infrared)
            .unwrap_or_default()
    }

    fn is_finished(&self) -> bool {
        self.finite && self.samples.is_empty()
    }
}

pub struct FakeDisplay {
    recorder: Recorder,
    lines: Vec<String>,
}

impl FakeDisplay {
    pub fn new(recorder: Recorder) -> Self {
        Self {
            recorder,
            lines: Vec::new(),
        }
    }
}

impl TextDisplay for FakeDisplay {
    type Error = Infallible;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.lines.clear();
        Ok(())
    }

    fn draw_line(&mut self, text: &str, _x: i32, _y: i32) -> Result<(), Self::Error> {
        self.lines.push(text.to_owned());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.recorder.record(Event::Frame(self.lines.clone()));
        Ok(())
    }
}

pub struct FakePin {
    name: &'static str,
    recorder: Recorder,
}

impl FakePin {
    pub fn new(name: &'static str, recorder: Recorder) -> Self {
        Self { name, recorder }
    }
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.recorder.record(Event::Pin(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.recorder.record(Event::Pin(self.name, true));
        Ok(())
    }
}

pub struct FakeDelay {
    recorder: Recorder,
}

impl FakeDelay {
    pub fn new(recorder: Recorder) -> Self {
        Self { recorder }
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.recorder.record(Event::Delay(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.recorder.record(Event::Delay(ms));
    }
}

/// Clock that advances by a fixed step on every read.
pub struct ManualClock {
    now: Cell<u32>,
    step: u32,
}

impl ManualClock {
    pub fn new(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        Timestamp(now)
    }
}
