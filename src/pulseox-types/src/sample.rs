/// One red/infrared intensity pair as read from the sensor FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample {
    pub red: u32,
    pub infrared: u32,
}

impl Sample {
    pub const fn new(red: u32, infrared: u32) -> Self {
        Self { red, infrared }
    }
}
