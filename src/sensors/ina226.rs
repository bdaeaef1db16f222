//! TI INA226 high-side power monitor.
//!
//! Measures pack voltage on VBUS and current across an external shunt.
//! Current is only reported once the calibration register is written,
//! so [`Ina226::init`] must run before the first [`Ina226::read`]. It
//! checks the manufacturer ID first, so a missing or wrong device is
//! reported before anything is written to it.
//!
//! | Reg  | Name        | LSB                   |
//! |------|-------------|-----------------------|
//! | 0x02 | Bus voltage | 1.25 mV               |
//! | 0x04 | Current     | `max_current / 2^15`  |
//! | 0x05 | Calibration | -                     |

use crate::bus::{self, BusDevice, TwoWire};
use crate::config::PowerMonitorConfig;
use crate::error::{BusError, ConfigError, Error};

pub const REG_BUS_VOLTAGE: u8 = 0x02;
pub const REG_CURRENT: u8 = 0x04;
pub const REG_CALIBRATION: u8 = 0x05;
pub const REG_MANUFACTURER_ID: u8 = 0xFE;

/// "TI" in ASCII.
pub const MANUFACTURER_ID: u16 = 0x5449;

/// Internal scaling constant from the datasheet (eq. 1).
const CAL_SCALE: f32 = 0.005_12;
/// Bit 15 of the calibration register is reserved.
const CAL_MAX: f32 = 32_767.0;

/// One decoded sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerReading {
    pub voltage_mv: u32,
    pub current_ma: i32,
}

#[derive(Debug, Clone)]
pub struct Ina226 {
    device: BusDevice,
    current_lsb_amps: f32,
    calibration: u16,
}

impl Ina226 {
    pub fn new(config: &PowerMonitorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let device = config.device()?;
        let current_lsb_amps = config.max_current_amps / 32_768.0;
        let cal = CAL_SCALE / (current_lsb_amps * config.shunt_ohms);
        if !(1.0..=CAL_MAX).contains(&cal) {
            return Err(ConfigError::ValidationFailed(
                "shunt/max current give an out-of-range INA226 calibration",
            ));
        }
        Ok(Self {
            device,
            current_lsb_amps,
            calibration: cal as u16,
        })
    }

    pub fn device(&self) -> BusDevice {
        self.device
    }

    /// Calibration register value derived from the shunt and max current.
    pub fn calibration(&self) -> u16 {
        self.calibration
    }

    /// Read the manufacturer ID register.
    pub fn manufacturer_id<W: TwoWire>(&self, bus: &mut W) -> Result<u16, BusError> {
        bus::read_u16_be(bus, self.device, REG_MANUFACTURER_ID)
    }

    /// Confirm the device identity, then write the calibration register.
    pub fn init<W: TwoWire>(&self, bus: &mut W) -> Result<(), Error> {
        let id = self.manufacturer_id(bus)?;
        if id != MANUFACTURER_ID {
            log::error!("INA226 at {}: manufacturer id 0x{:04X}", self.device, id);
            return Err(Error::UnexpectedDevice {
                device: self.device,
                id,
            });
        }
        bus::write_register(
            bus,
            self.device,
            REG_CALIBRATION,
            &self.calibration.to_be_bytes(),
        )?;
        log::info!(
            "INA226 at {}: calibration {} ({:.6} A/LSB)",
            self.device,
            self.calibration,
            self.current_lsb_amps
        );
        Ok(())
    }

    /// Sample bus voltage and current.
    pub fn read<W: TwoWire>(&self, bus: &mut W) -> Result<PowerReading, BusError> {
        let raw_v = bus::read_u16_be(bus, self.device, REG_BUS_VOLTAGE)?;
        let raw_i = bus::read_u16_be(bus, self.device, REG_CURRENT)?;
        Ok(PowerReading {
            voltage_mv: self.decode_voltage_mv(raw_v),
            current_ma: self.decode_current_ma(raw_i),
        })
    }

    /// 1.25 mV per LSB.
    pub fn decode_voltage_mv(&self, raw: u16) -> u32 {
        u32::from(raw) * 5 / 4
    }

    /// Two's-complement count of `current_lsb` amps.
    pub fn decode_current_ma(&self, raw: u16) -> i32 {
        let counts = f32::from(raw as i16);
        (counts * self.current_lsb_amps * 1000.0).round() as i32
    }
}
