//! Battery safety evaluator.
//!
//! Runs once per sampling cycle with the latest pack voltage and current.
//! Two independent outputs:
//!
//! 1. **Arm state.** An armed vehicle is forced to `Disarmed` as soon as
//!    the voltage reaches the disarm threshold or the current leaves the
//!    plausible window. The evaluator never arms; only the external arming
//!    command does, through [`BatteryState::arm`].
//! 2. **Voltage tier.** A notification severity for the ground station,
//!    computed whether or not the vehicle is armed.
//!
//! ## Tier boundaries
//!
//! ```text
//!   voltage ─────────────────────────────────────────────────▶
//!   Emergency ≤ emergency < Critical ≤ critical < Low ≤ low < Normal
//! ```
//!
//! A voltage exactly on a threshold belongs to the more severe tier.

use core::fmt;

use log::{error, info, warn};

use crate::config::BatteryConfig;

// ───────────────────────────────────────────────────────────────
// Arm state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArmState {
    Armed,
    #[default]
    Disarmed,
}

/// Why the evaluator disarmed (or refused to arm) the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisarmReason {
    /// Pack voltage at or below the disarm threshold.
    UnderVoltage,
    /// Current below the plausible minimum (load disconnected?).
    CurrentTooLow,
    /// Current above the plausible maximum (short, stalled motor).
    CurrentTooHigh,
}

impl fmt::Display for DisarmReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnderVoltage => write!(f, "under voltage"),
            Self::CurrentTooLow => write!(f, "current below minimum"),
            Self::CurrentTooHigh => write!(f, "current above maximum"),
        }
    }
}

/// Check one sample against the disarm thresholds.
///
/// Voltage is checked first, so a sagging pack is reported as
/// `UnderVoltage` even when the current is also out of range.
pub fn check_thresholds(
    config: &BatteryConfig,
    voltage_mv: u32,
    current_ma: i32,
) -> Option<DisarmReason> {
    if voltage_mv <= config.disarm_voltage_mv() {
        Some(DisarmReason::UnderVoltage)
    } else if current_ma < config.disarm_current_min_ma {
        Some(DisarmReason::CurrentTooLow)
    } else if current_ma > config.disarm_current_max_ma {
        Some(DisarmReason::CurrentTooHigh)
    } else {
        None
    }
}

/// Live battery and arm state, owned by the control loop.
#[derive(Debug, Clone, Default)]
pub struct BatteryState {
    /// Last sampled pack voltage (mV).
    pub voltage_mv: u32,
    /// Last sampled pack current (mA). Negative while charging.
    pub current_ma: i32,
    arm_state: ArmState,
}

impl BatteryState {
    /// Fresh state at startup: no reading yet, disarmed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm_state(&self) -> ArmState {
        self.arm_state
    }

    pub fn is_armed(&self) -> bool {
        self.arm_state == ArmState::Armed
    }

    /// External arming command.
    ///
    /// Refused while the last sampled voltage is at or below the disarm
    /// threshold. Current is not checked: an idle pack draws almost nothing
    /// until the motors spin.
    pub fn arm(&mut self, config: &BatteryConfig) -> Result<(), DisarmReason> {
        if self.voltage_mv <= config.disarm_voltage_mv() {
            warn!(
                "Arming refused: {} mV <= {} mV",
                self.voltage_mv,
                config.disarm_voltage_mv()
            );
            return Err(DisarmReason::UnderVoltage);
        }
        if self.arm_state != ArmState::Armed {
            info!("Armed at {} mV", self.voltage_mv);
        }
        self.arm_state = ArmState::Armed;
        Ok(())
    }

    /// External disarm command (operator or failsafe outside this core).
    pub fn disarm(&mut self) {
        if self.arm_state == ArmState::Armed {
            info!("Disarmed by command");
        }
        self.arm_state = ArmState::Disarmed;
    }
}

// ───────────────────────────────────────────────────────────────
// Voltage tiers
// ───────────────────────────────────────────────────────────────

/// Notification severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum VoltageTier {
    #[default]
    Normal,
    Low,
    Critical,
    Emergency,
}

impl VoltageTier {
    pub fn classify(config: &BatteryConfig, voltage_mv: u32) -> Self {
        if voltage_mv <= config.emergency_mv() {
            Self::Emergency
        } else if voltage_mv <= config.critical_mv() {
            Self::Critical
        } else if voltage_mv <= config.low_mv() {
            Self::Low
        } else {
            Self::Normal
        }
    }

    /// MAVLink `MAV_BATTERY_CHARGE_STATE` value for this tier.
    pub fn mav_charge_state(self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::Low => 2,
            Self::Critical => 3,
            Self::Emergency => 4,
        }
    }
}

impl fmt::Display for VoltageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Low => write!(f, "low"),
            Self::Critical => write!(f, "critical"),
            Self::Emergency => write!(f, "emergency"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Evaluator
// ───────────────────────────────────────────────────────────────

/// Result of one evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Set when this cycle forced an armed vehicle to disarm.
    pub disarmed: Option<DisarmReason>,
    pub tier: VoltageTier,
    pub previous_tier: VoltageTier,
}

impl CycleOutcome {
    pub fn tier_changed(&self) -> bool {
        self.tier != self.previous_tier
    }
}

pub struct SafetyEvaluator {
    config: BatteryConfig,
    tier: VoltageTier,
}

impl SafetyEvaluator {
    pub fn new(config: &BatteryConfig) -> Self {
        Self {
            config: config.clone(),
            tier: VoltageTier::Normal,
        }
    }

    pub fn config(&self) -> &BatteryConfig {
        &self.config
    }

    /// Tier from the most recent cycle.
    pub fn tier(&self) -> VoltageTier {
        self.tier
    }

    /// Record a fresh sample in `state` and evaluate it.
    pub fn evaluate(
        &mut self,
        state: &mut BatteryState,
        voltage_mv: u32,
        current_ma: i32,
    ) -> CycleOutcome {
        state.voltage_mv = voltage_mv;
        state.current_ma = current_ma;

        let mut disarmed = None;
        if state.arm_state == ArmState::Armed {
            if let Some(reason) = check_thresholds(&self.config, voltage_mv, current_ma) {
                error!(
                    "SAFETY DISARM: {} ({} mV, {} mA)",
                    reason, voltage_mv, current_ma
                );
                state.arm_state = ArmState::Disarmed;
                disarmed = Some(reason);
            }
        }

        let previous_tier = self.tier;
        let tier = VoltageTier::classify(&self.config, voltage_mv);
        if tier > previous_tier {
            warn!("Battery {} -> {} at {} mV", previous_tier, tier, voltage_mv);
        } else if tier < previous_tier {
            info!("Battery {} -> {} at {} mV", previous_tier, tier, voltage_mv);
        }
        self.tier = tier;

        CycleOutcome {
            disarmed,
            tier,
            previous_tier,
        }
    }
}
