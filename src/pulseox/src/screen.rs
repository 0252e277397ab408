use pulseox_types::{Reading, SpO2};

/// Everything the monitor ever shows on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Initializing,
    DeviceError,
    Ready,
    PlaceFinger,
    Vitals { heart_rate: u32, spo2: Option<SpO2> },
    Stopped,
}

pub struct Line {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

impl Line {
    fn at(text: impl Into<String>, y: i32) -> Self {
        Self {
            text: text.into(),
            x: 0,
            y,
        }
    }
}

impl Screen {
    pub fn lines(&self) -> Vec<Line> {
        match self {
            Screen::Initializing => vec![Line::at("Initializing...", 0)],
            Screen::DeviceError => vec![Line::at("MAX30102 Error!", 0)],
            Screen::Ready => vec![Line::at("MAX30102 Ready", 0)],
            Screen::PlaceFinger => vec![Line::at("Place finger", 0)],
            Screen::Vitals { heart_rate, spo2 } => {
                let spo2 = match spo2 {
                    Some(spo2) => format!("SpO2: {}", spo2),
                    None => "no data SpO2".to_owned(),
                };
                vec![
                    Line::at("Pulse and O2", 0),
                    Line::at(format!("Pulse: {} bpm", heart_rate), 20),
                    Line::at(spo2, 40),
                ]
            }
            Screen::Stopped => vec![Line::at("Program stopped", 0)],
        }
    }
}

impl From<Reading> for Screen {
    fn from(reading: Reading) -> Self {
        match reading {
            Reading::NoFinger => Screen::PlaceFinger,
            Reading::Vitals { heart_rate, spo2 } => Screen::Vitals { heart_rate, spo2 },
        }
    }
}
