use std::{
    collections::VecDeque,
    convert::Infallible,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use pulseox_types::Sample;

use crate::{ReplayError, SampleSource, SensorSettings};

/// Plays back a recording of `red infrared` pairs, one per line.
///
/// Blank lines and lines starting with `#` are skipped. One sample becomes
/// ready per poll.
pub struct ReplaySource {
    samples: VecDeque<Sample>,
    pending: Option<Sample>,
}

impl ReplaySource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self, ReplayError> {
        let mut samples = VecDeque::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let content = line.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }

            let sample = parse_line(content).ok_or_else(|| ReplayError::InvalidLine {
                line: index + 1,
                content: content.to_owned(),
            })?;
            samples.push_back(sample);
        }

        info!("Loaded {} samples for replay", samples.len());
        Ok(Self {
            samples,
            pending: None,
        })
    }

    pub fn remaining(&self) -> usize {
        self.samples.len() + usize::from(self.pending.is_some())
    }
}

fn parse_line(line: &str) -> Option<Sample> {
    let mut fields = line.split(|c: char| c.is_whitespace() || c == ',').filter(|f| !f.is_empty());
    let red = fields.next()?.parse().ok()?;
    let infrared = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(Sample::new(red, infrared))
}

impl SampleSource for ReplaySource {
    type Error = Infallible;

    fn probe(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn configure(&mut self, settings: &SensorSettings) -> Result<(), Self::Error> {
        debug!("Replay ignores sensor settings {:?}", settings);
        Ok(())
    }

    fn poll(&mut self) -> Result<(), Self::Error> {
        if self.pending.is_none() {
            self.pending = self.samples.pop_front();
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

    fn is_finished(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recording() {
        let data = "# red ir\n45000 80000\n\n45010,80100\n  45020\t80200  \n";
        let mut source = ReplaySource::from_reader(data.as_bytes()).unwrap();
        assert_eq!(source.remaining(), 3);

        let mut samples = Vec::new();
        while !source.is_finished() {
            source.poll().unwrap();
            assert!(source.has_sample());
            let red = source.take_red();
            let infrared = source.take_infrared();
            samples.push(Sample::new(red, infrared));
        }

        assert_eq!(
            samples,
            vec![
                Sample::new(45000, 80000),
                Sample::new(45010, 80100),
                Sample::new(45020, 80200),
            ]
        );
        source.poll().unwrap();
        assert!(!source.has_sample());
    }

    #[test]
    fn rejects_bad_line() {
        let data = "45000 80000\n45000\n";
        let result = ReplaySource::from_reader(data.as_bytes());
        assert!(matches!(
            result,
            Err(ReplayError::InvalidLine { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_extra_fields() {
        assert!(parse_line("1 2 3").is_none());
        assert!(parse_line("-1 2").is_none());
        assert_eq!(parse_line("1 2"), Some(Sample::new(1, 2)));
    }
}
