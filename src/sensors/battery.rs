//! Battery sampling task.
//!
//! Called every control cycle; does real work only when battery
//! monitoring is enabled and its interval has elapsed. Each sample goes
//! straight into the [`SafetyEvaluator`], which may disarm the vehicle.
//!
//! A failed read is not retried within the cycle. The last good reading
//! is kept but flagged stale, and the evaluator is skipped: the arm state
//! is never changed on data that wasn't actually measured.

use crate::app::events::FlightEvent;
use crate::app::ports::EventSink;
use crate::bus::TwoWire;
use crate::config::SystemConfig;
use crate::error::{ConfigError, Error};
use crate::math::map_range;
use crate::safety::{BatteryState, CycleOutcome, SafetyEvaluator, VoltageTier};
use crate::scheduler::IntervalTimer;

use super::ina226::{Ina226, PowerReading};

pub struct BatteryMonitor {
    sensor: Ina226,
    /// `None` when battery monitoring is disabled.
    timer: Option<IntervalTimer>,
    evaluator: SafetyEvaluator,
    last: Option<PowerReading>,
    stale: bool,
}

impl BatteryMonitor {
    pub fn new(config: &SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sensor: Ina226::new(&config.power_monitor)?,
            timer: IntervalTimer::from_config(&config.battery_sampling),
            evaluator: SafetyEvaluator::new(&config.battery),
            last: None,
            stale: false,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.timer.is_some()
    }

    /// Identify and program the power monitor. A no-op when monitoring is
    /// disabled.
    pub fn init<W: TwoWire>(&mut self, bus: &mut W) -> Result<(), Error> {
        if !self.is_enabled() {
            log::info!("Battery monitoring disabled");
            return Ok(());
        }
        self.sensor.init(bus)
    }

    /// Run one cycle. Returns the evaluation when a fresh sample was taken.
    pub fn poll<W: TwoWire>(
        &mut self,
        now_secs: f32,
        bus: &mut W,
        state: &mut BatteryState,
        sink: &mut impl EventSink,
    ) -> Option<CycleOutcome> {
        let timer = self.timer.as_mut()?;
        if !timer.due(now_secs) {
            return None;
        }

        let reading = match self.sensor.read(bus) {
            Ok(r) => r,
            Err(error) => {
                self.stale = true;
                sink.emit(&FlightEvent::SensorReadFailed {
                    device: self.sensor.device(),
                    error,
                });
                return None;
            }
        };
        self.last = Some(reading);
        self.stale = false;

        let outcome = self
            .evaluator
            .evaluate(state, reading.voltage_mv, reading.current_ma);
        if let Some(reason) = outcome.disarmed {
            sink.emit(&FlightEvent::Disarmed(reason));
        }
        if outcome.tier_changed() {
            sink.emit(&FlightEvent::TierChanged {
                from: outcome.previous_tier,
                to: outcome.tier,
            });
        }
        Some(outcome)
    }

    /// Last good reading, even if stale.
    pub fn last_reading(&self) -> Option<PowerReading> {
        self.last
    }

    /// True when the most recent attempt failed.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn tier(&self) -> VoltageTier {
        self.evaluator.tier()
    }

    /// Remaining charge (0-100 %) from the last reading, linear between
    /// the minimum and maximum pack voltage.
    pub fn remaining_percent(&self) -> Option<u8> {
        let reading = self.last?;
        let cfg = self.evaluator.config();
        let pct = map_range(
            reading.voltage_mv as f32,
            cfg.min_level_mv() as f32,
            cfg.max_level_mv() as f32,
            0.0,
            100.0,
        );
        Some(pct.clamp(0.0, 100.0).round() as u8)
    }
}
