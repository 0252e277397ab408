#[macro_use]
extern crate log;

mod error;
pub use error::{MonitorError, ReplayError};

mod device;
pub use device::{Clock, Outputs, SampleSource, SensorSettings, TextDisplay};

mod screen;
pub use screen::{Line, Screen};

mod monitor;
pub use monitor::{Monitor, MonitorConfig};

mod sim;
pub use sim::{SimulatedSensor, SimulationConfig};

mod replay;
pub use replay::ReplaySource;

mod console;
pub use console::{ConsoleDisplay, LoggedPin, StdDelay, SystemClock};

#[cfg(test)]
mod testing;
