//! [`TwoWire`] on top of any blocking `embedded-hal` 1.0 I2C master.
//!
//! `embedded-hal` exposes whole transactions (`write`, `read`,
//! `write_read`) while [`TwoWire`] is byte-oriented. The adapter buffers
//! queued bytes and turns a "keep claimed" end of transmission into a
//! pending register write that the next `request_from` sends as a
//! repeated-start `write_read`.
//!
//! Because the register phase is deferred, a NACK on it shows up as a
//! zero-byte `request_from` rather than from `end_transmission`. The
//! adapter remembers it and answers [`TwoWire::last_request_nacked`], so
//! the protocol still classifies it as an addressing failure.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use log::debug;

use super::{MAX_TRANSFER_LEN, TwoWire};

/// Failure closing a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// More bytes were queued than the transmit buffer holds.
    Overflow,
    /// The underlying I2C master reported an error.
    Bus(ErrorKind),
}

impl core::fmt::Display for WireError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Overflow => write!(f, "transmit buffer overflow"),
            Self::Bus(kind) => write!(f, "{kind}"),
        }
    }
}

pub struct EhalWire<I> {
    i2c: I,
    address: u8,
    tx: heapless::Vec<u8, MAX_TRANSFER_LEN>,
    tx_overflow: bool,
    /// A register write is waiting for its repeated-start read.
    pending: bool,
    /// The last `write_read` was not acknowledged.
    nacked: bool,
    rx: heapless::Vec<u8, MAX_TRANSFER_LEN>,
    rx_pos: usize,
}

impl<I: I2c> EhalWire<I> {
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            address: 0,
            tx: heapless::Vec::new(),
            tx_overflow: false,
            pending: false,
            nacked: false,
            rx: heapless::Vec::new(),
            rx_pos: 0,
        }
    }

    /// Give the I2C peripheral back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> TwoWire for EhalWire<I> {
    type Error = WireError;

    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx.clear();
        self.tx_overflow = false;
        self.pending = false;
    }

    fn write(&mut self, byte: u8) {
        if self.tx.push(byte).is_err() {
            self.tx_overflow = true;
        }
    }

    fn end_transmission(&mut self, keep_claimed: bool) -> Result<(), WireError> {
        if self.tx_overflow {
            self.tx.clear();
            return Err(WireError::Overflow);
        }
        if keep_claimed {
            self.pending = true;
            return Ok(());
        }
        let result = self
            .i2c
            .write(self.address, &self.tx)
            .map_err(|e| WireError::Bus(e.kind()));
        self.tx.clear();
        result
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        let count = count.min(MAX_TRANSFER_LEN);
        self.rx.clear();
        self.rx_pos = 0;
        self.nacked = false;
        if self.rx.resize_default(count).is_err() {
            return 0;
        }

        let with_register = self.pending && address == self.address;
        let result = if with_register {
            self.i2c.write_read(address, &self.tx, &mut self.rx)
        } else {
            self.i2c.read(address, &mut self.rx)
        };
        self.pending = false;
        self.tx.clear();

        match result {
            Ok(()) => count,
            Err(e) => {
                let kind = e.kind();
                debug!("I2C 0x{:02X}: {}", address, WireError::Bus(kind));
                self.nacked = with_register && matches!(kind, ErrorKind::NoAcknowledge(_));
                self.rx.clear();
                0
            }
        }
    }

    fn read(&mut self) -> Option<u8> {
        let b = self.rx.get(self.rx_pos).copied()?;
        self.rx_pos += 1;
        Some(b)
    }

    fn last_request_nacked(&self) -> bool {
        self.nacked
    }
}
