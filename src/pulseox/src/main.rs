#[macro_use]
extern crate log;

use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use pulseox::{
    ConsoleDisplay, LoggedPin, Monitor, MonitorConfig, Outputs, ReplaySource, SampleSource,
    SensorSettings, SimulatedSensor, SimulationConfig, StdDelay, SystemClock,
};

#[derive(Parser)]
pub struct PulseOxCli {
    /// Idle time between two sensor polls
    #[arg(env, long, default_value_t = 100)]
    pub poll_interval_ms: u32,
    #[arg(env, long, default_value_t = 4)]
    pub fifo_average: u8,
    #[arg(env, long, default_value_t = 200)]
    pub sample_rate: u16,
    #[arg(env, long, default_value = "0x2F", value_parser = parse_u8)]
    pub led_amplitude: u8,
    #[arg(env, long, default_value_t = 25)]
    pub red_led_pin: u8,
    #[arg(env, long, default_value_t = 26)]
    pub green_led_pin: u8,
    #[arg(env, long, default_value_t = 27)]
    pub buzzer_pin: u8,
    #[clap(subcommand)]
    pub subcommand: PulseOxCommand,
}

#[derive(Subcommand)]
pub enum PulseOxCommand {
    ///
    /// Run the monitor against a synthetic PPG signal
    ///
    Simulate {
        #[arg(long, default_value_t = 75)]
        bpm: u32,
        #[arg(long, default_value_t = 97)]
        spo2: u8,
        /// Lift the finger for a few seconds every N seconds
        #[arg(long)]
        finger_off_every_secs: Option<u64>,
        /// Pretend the sensor does not answer on the bus
        #[arg(long)]
        no_sensor: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
    ///
    /// Run the monitor over a recording of `red infrared` lines
    ///
    Replay { file: PathBuf },
}

impl PulseOxCli {
    fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            sensor: SensorSettings {
                fifo_average: self.fifo_average,
                sample_rate: self.sample_rate,
                led_amplitude: self.led_amplitude,
            },
            poll_interval_ms: self.poll_interval_ms,
        }
    }

    fn outputs(&self) -> Outputs<LoggedPin, LoggedPin, LoggedPin> {
        Outputs::new(
            LoggedPin::new("red led", self.red_led_pin),
            LoggedPin::new("green led", self.green_led_pin),
            LoggedPin::new("buzzer", self.buzzer_pin),
        )
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = PulseOxCli::parse();
    if cli.fifo_average == 0 || cli.sample_rate == 0 {
        return Err(anyhow!("FIFO average and sample rate must be non-zero"));
    }

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))?;
    }

    let config = cli.monitor_config();
    let outputs = cli.outputs();

    match cli.subcommand {
        PulseOxCommand::Simulate {
            bpm,
            spo2,
            finger_off_every_secs,
            no_sensor,
            seed,
        } => {
            let sensor = SimulatedSensor::new(SimulationConfig {
                bpm,
                spo2,
                finger_off_every: finger_off_every_secs.map(Duration::from_secs),
                connected: !no_sensor,
                seed,
            });
            run_monitor(sensor, outputs, config, &stop)
        }
        PulseOxCommand::Replay { file } => {
            let source = ReplaySource::open(&file)?;
            run_monitor(source, outputs, config, &stop)
        }
    }
}

fn run_monitor<S: SampleSource>(
    source: S,
    outputs: Outputs<LoggedPin, LoggedPin, LoggedPin>,
    config: MonitorConfig,
    stop: &AtomicBool,
) -> anyhow::Result<()> {
    let mut monitor = Monitor::new(
        source,
        ConsoleDisplay::new(),
        outputs,
        StdDelay,
        SystemClock::new(),
        config,
    );

    if let Err(error) = monitor.initialize() {
        error!("{}", error);
        monitor.safe_state()?;
        return Err(error.into());
    }

    monitor.run(stop)?;
    Ok(())
}

fn parse_u8(value: &str) -> Result<u8, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("`{}`: {}", value, e))
}
