//! Vehicle configuration parameters.
//!
//! Loaded once before the control loop starts and never mutated after.
//! Every loader runs [`SystemConfig::validate`], so the control loop only
//! ever sees a config whose thresholds are consistently ordered.
//!
//! Voltage thresholds are stored **per cell** and scaled by `cell_count`
//! through the accessor methods on [`BatteryConfig`].

use serde::{Deserialize, Serialize};

use crate::bus::BusDevice;
use crate::error::ConfigError;

/// Highest per-cell voltage accepted (mV). Keeps every pack-level
/// threshold well inside `u32` for any `cell_count`.
pub const MAX_CELL_MV: u32 = 5_000;

/// Battery pack limits and protection thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatteryConfig {
    /// Number of cells in series (1S, 2S, ...).
    pub cell_count: u8,

    // --- Pack range (mV per cell) ---
    /// Absolute minimum safe cell voltage. Also the Emergency tier.
    pub min_level_mv_per_cell: u32,
    /// Fully charged cell voltage.
    pub max_level_mv_per_cell: u32,

    // --- Disarm ---
    /// Motors are disarmed at or below this cell voltage.
    pub disarm_voltage_mv_per_cell: u32,
    /// Pack current below this (mA) suggests a disconnected load.
    pub disarm_current_min_ma: i32,
    /// Pack current above this (mA) suggests a short or a fault.
    pub disarm_current_max_ma: i32,

    // --- Ground station notification (mV per cell) ---
    pub notify_low_mv_per_cell: u32,
    pub notify_critical_mv_per_cell: u32,
}

impl BatteryConfig {
    fn scaled(&self, per_cell: u32) -> u32 {
        per_cell * u32::from(self.cell_count)
    }

    pub fn min_level_mv(&self) -> u32 {
        self.scaled(self.min_level_mv_per_cell)
    }

    pub fn max_level_mv(&self) -> u32 {
        self.scaled(self.max_level_mv_per_cell)
    }

    pub fn disarm_voltage_mv(&self) -> u32 {
        self.scaled(self.disarm_voltage_mv_per_cell)
    }

    pub fn low_mv(&self) -> u32 {
        self.scaled(self.notify_low_mv_per_cell)
    }

    pub fn critical_mv(&self) -> u32 {
        self.scaled(self.notify_critical_mv_per_cell)
    }

    /// Emergency notification level: the absolute minimum safe voltage.
    pub fn emergency_mv(&self) -> u32 {
        self.min_level_mv()
    }

    /// Check ordering and ranges. Cell scaling is linear, so checking the
    /// per-cell values covers every cell count. Max level is the largest
    /// threshold once ordering holds, so its ceiling bounds all of them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_count == 0 {
            return Err(ConfigError::ValidationFailed("cell_count must be >= 1"));
        }
        if self.min_level_mv_per_cell == 0 {
            return Err(ConfigError::ValidationFailed("min level must be > 0"));
        }
        if self.max_level_mv_per_cell > MAX_CELL_MV {
            return Err(ConfigError::ValidationFailed(
                "max level must be <= 5000 mV per cell",
            ));
        }
        if self.max_level_mv_per_cell <= self.notify_low_mv_per_cell {
            return Err(ConfigError::ValidationFailed("max level must be above low"));
        }
        if self.notify_low_mv_per_cell <= self.notify_critical_mv_per_cell {
            return Err(ConfigError::ValidationFailed("low must be above critical"));
        }
        if self.notify_critical_mv_per_cell <= self.min_level_mv_per_cell {
            return Err(ConfigError::ValidationFailed(
                "critical must be above min level (emergency)",
            ));
        }
        if self.disarm_voltage_mv_per_cell < self.min_level_mv_per_cell
            || self.disarm_voltage_mv_per_cell >= self.max_level_mv_per_cell
        {
            return Err(ConfigError::ValidationFailed(
                "disarm voltage must be within [min level, max level)",
            ));
        }
        if self.disarm_current_min_ma >= self.disarm_current_max_ma {
            return Err(ConfigError::ValidationFailed(
                "disarm current min must be below max",
            ));
        }
        Ok(())
    }
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            cell_count: 1,
            min_level_mv_per_cell: 3200,
            max_level_mv_per_cell: 4200,
            disarm_voltage_mv_per_cell: 3400,
            disarm_current_min_ma: 10,
            disarm_current_max_ma: 15_000,
            notify_low_mv_per_cell: 3500,
            notify_critical_mv_per_cell: 3300,
        }
    }
}

/// INA226 power monitor wiring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PowerMonitorConfig {
    /// 7-bit bus address (A0/A1 strapping).
    pub address: u8,
    /// Shunt resistor value (ohms).
    pub shunt_ohms: f32,
    /// Largest current the monitor must resolve (amps).
    pub max_current_amps: f32,
}

impl PowerMonitorConfig {
    pub fn device(&self) -> Result<BusDevice, ConfigError> {
        BusDevice::new(self.address)
            .ok_or(ConfigError::ValidationFailed("power monitor address is not 7-bit"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.device()?;
        if !(self.shunt_ohms > 0.0) {
            return Err(ConfigError::ValidationFailed("shunt_ohms must be > 0"));
        }
        if !(self.max_current_amps > 0.0) {
            return Err(ConfigError::ValidationFailed("max_current_amps must be > 0"));
        }
        Ok(())
    }
}

impl Default for PowerMonitorConfig {
    fn default() -> Self {
        Self {
            address: 0x40,
            shunt_ohms: 0.005,
            max_current_amps: 15.0,
        }
    }
}

/// Enable flag and period for one periodically sampled subsystem.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SamplingConfig {
    pub enabled: bool,
    /// Seconds between samples.
    pub interval_secs: f32,
}

impl SamplingConfig {
    fn validate(&self, what: &'static str) -> Result<(), ConfigError> {
        if self.interval_secs > 0.0 && self.interval_secs.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::ValidationFailed(what))
        }
    }
}

/// Complete configuration for the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemConfig {
    pub battery: BatteryConfig,
    pub power_monitor: PowerMonitorConfig,
    pub battery_sampling: SamplingConfig,
    pub barometer_sampling: SamplingConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            battery: BatteryConfig::default(),
            power_monitor: PowerMonitorConfig::default(),
            battery_sampling: SamplingConfig {
                enabled: false,
                interval_secs: 0.1, // 10 Hz
            },
            barometer_sampling: SamplingConfig {
                enabled: false,
                interval_secs: 1.0, // 1 Hz
            },
        }
    }
}

impl SystemConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.battery.validate()?;
        self.power_monitor.validate()?;
        self.battery_sampling
            .validate("battery interval_secs must be > 0")?;
        self.barometer_sampling
            .validate("barometer interval_secs must be > 0")?;
        Ok(())
    }

    /// Parse and validate a JSON config (provisioning / host tooling).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("config JSON rejected: {}", e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate the compact persisted form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|e| {
            log::warn!("stored config rejected: {}", e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to the compact persisted form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Corrupted)
    }
}
