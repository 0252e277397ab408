use embedded_hal::digital::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("MAX30102 not detected")]
    DeviceAbsent,
    #[error("Sensor error: {0}")]
    Sensor(String),
    #[error("Display error: {0}")]
    Display(String),
    #[error("Output pin error: {0:?}")]
    Output(ErrorKind),
}

impl MonitorError {
    pub(crate) fn sensor(error: impl std::fmt::Debug) -> Self {
        Self::Sensor(format!("{:?}", error))
    }

    pub(crate) fn display(error: impl std::fmt::Debug) -> Self {
        Self::Display(format!("{:?}", error))
    }
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid sample on line {line}: `{content}`")]
    InvalidLine { line: usize, content: String },
}
