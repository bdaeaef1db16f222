//! Register access over the shared two-wire (I2C) bus.
//!
//! Every peripheral in the airframe (power monitor, barometer) is read the
//! same way: address the device, send the one-byte register number, keep
//! the bus claimed, then clock out a fixed number of bytes. The protocol
//! is all-or-nothing: either every requested byte reaches the caller or
//! the caller gets a classified [`BusError`] and nothing else.
//!
//! ```text
//!  START | addr+W | reg |  (no STOP)  RESTART | addr+R | b0 .. bn-1 | STOP
//! ```
//!
//! The bus is single-owner and synchronous. One control loop owns it and
//! calls in here from its own cycle, so there is no locking and no
//! internal retry: a failed read simply means no fresh sample this cycle.

pub mod ehal;

use log::{debug, warn};

use crate::error::BusError;

/// Largest single transfer the bus driver buffers (bytes).
pub const MAX_TRANSFER_LEN: usize = 128;

/// Bytes returned by a successful register read.
pub type RegisterBytes = heapless::Vec<u8, MAX_TRANSFER_LEN>;

// ───────────────────────────────────────────────────────────────
// Bus capability (implemented by the platform, consumed here)
// ───────────────────────────────────────────────────────────────

/// The primitive operations of a blocking two-wire master.
///
/// Shaped after the classic microcontroller "Wire" API: a transmission is
/// opened, bytes are queued, and the transmission is closed with or
/// without releasing the bus. Reads are requested up front and then
/// drained byte by byte.
pub trait TwoWire {
    /// Error reported when closing a transmission fails (NACK, bus fault).
    type Error: core::fmt::Debug;

    /// Open a write transmission to the 7-bit `address`.
    fn begin_transmission(&mut self, address: u8);

    /// Queue one byte on the open transmission.
    fn write(&mut self, byte: u8);

    /// Close the open transmission. With `keep_claimed` the bus is not
    /// released (no STOP), so the next request is a repeated start.
    fn end_transmission(&mut self, keep_claimed: bool) -> Result<(), Self::Error>;

    /// Read up to `count` bytes from `address` into the driver's receive
    /// buffer. Returns how many bytes actually arrived.
    fn request_from(&mut self, address: u8, count: usize) -> usize;

    /// Pop the next received byte, `None` once the buffer is drained.
    fn read(&mut self) -> Option<u8>;

    /// True when the last `request_from` came back short because the
    /// write phase it carried was not acknowledged. Only drivers that
    /// defer the register write into the read transaction can report this.
    fn last_request_nacked(&self) -> bool {
        false
    }
}

// ───────────────────────────────────────────────────────────────
// Request types
// ───────────────────────────────────────────────────────────────

/// A peripheral on the bus, identified by its 7-bit address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusDevice(u8);

impl BusDevice {
    /// Returns `None` for addresses that do not fit in seven bits.
    pub const fn new(address: u8) -> Option<Self> {
        if address <= 0x7F {
            Some(Self(address))
        } else {
            None
        }
    }

    pub const fn address(self) -> u8 {
        self.0
    }
}

impl core::fmt::Display for BusDevice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// One register read. The length is validated once, on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterRequest {
    device: BusDevice,
    register: u8,
    length: usize,
}

impl RegisterRequest {
    /// Fails with [`BusError::InvalidArgument`] unless
    /// `1 <= length <= MAX_TRANSFER_LEN`.
    pub fn new(device: BusDevice, register: u8, length: usize) -> Result<Self, BusError> {
        if length == 0 || length > MAX_TRANSFER_LEN {
            warn!(
                "I2C read 0x{:02X}/{}: {} (length {})",
                register,
                device,
                BusError::InvalidArgument,
                length
            );
            return Err(BusError::InvalidArgument);
        }
        Ok(Self {
            device,
            register,
            length,
        })
    }

    pub fn device(&self) -> BusDevice {
        self.device
    }

    pub fn register(&self) -> u8 {
        self.register
    }

    pub fn len(&self) -> usize {
        self.length
    }

    /// Always `false`; a request can't be built with zero length.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

// ───────────────────────────────────────────────────────────────
// Protocol
// ───────────────────────────────────────────────────────────────

/// Read `request.len()` bytes from a device register.
///
/// Performs exactly one bus transaction and never retries. On a short
/// read the partial bytes are dropped.
pub fn read_register_vec<W: TwoWire>(
    bus: &mut W,
    request: &RegisterRequest,
) -> Result<RegisterBytes, BusError> {
    let device = request.device;
    let register = request.register;
    let addr = device.address();

    bus.begin_transmission(addr);
    bus.write(register);
    if let Err(e) = bus.end_transmission(true) {
        warn!(
            "I2C read 0x{:02X}/{}: {} ({:?})",
            register,
            device,
            BusError::AddressingFailure,
            e
        );
        return Err(BusError::AddressingFailure);
    }

    let received = bus.request_from(addr, request.length);
    if received < request.length {
        let error = if bus.last_request_nacked() {
            BusError::AddressingFailure
        } else {
            BusError::IncompleteRead
        };
        warn!(
            "I2C read 0x{:02X}/{}: {} ({} of {} bytes)",
            register, device, error, received, request.length
        );
        return Err(error);
    }
    if received > request.length {
        debug!(
            "I2C read 0x{:02X}/{}: driver returned {} bytes, keeping {}",
            register, device, received, request.length
        );
    }

    let bytes: RegisterBytes = core::iter::from_fn(|| bus.read())
        .take(request.length)
        .collect();
    if bytes.len() < request.length {
        warn!(
            "I2C read 0x{:02X}/{}: {} (drained after {} bytes)",
            register,
            device,
            BusError::IncompleteRead,
            bytes.len()
        );
        return Err(BusError::IncompleteRead);
    }

    debug!("I2C read 0x{:02X}/{}: {} bytes", register, device, bytes.len());
    Ok(bytes)
}

/// Read `buf.len()` bytes from a device register into `buf`.
///
/// An empty or oversize `buf` is [`BusError::InvalidArgument`] and no
/// bus call is made. `buf` is only written when the whole read succeeds.
pub fn read_register<W: TwoWire>(
    bus: &mut W,
    device: BusDevice,
    register: u8,
    buf: &mut [u8],
) -> Result<(), BusError> {
    let request = RegisterRequest::new(device, register, buf.len())?;
    let bytes = read_register_vec(bus, &request)?;
    buf.copy_from_slice(&bytes);
    Ok(())
}

/// Read a big-endian 16-bit register, the layout most sensor ICs use.
pub fn read_u16_be<W: TwoWire>(
    bus: &mut W,
    device: BusDevice,
    register: u8,
) -> Result<u16, BusError> {
    let mut raw = [0u8; 2];
    read_register(bus, device, register, &mut raw)?;
    Ok(u16::from_be_bytes(raw))
}

/// Write `data` to a device register and release the bus.
///
/// A failed transmission is reported as [`BusError::AddressingFailure`].
pub fn write_register<W: TwoWire>(
    bus: &mut W,
    device: BusDevice,
    register: u8,
    data: &[u8],
) -> Result<(), BusError> {
    if data.len() >= MAX_TRANSFER_LEN {
        warn!(
            "I2C write 0x{:02X}/{}: {} (length {})",
            register,
            device,
            BusError::InvalidArgument,
            data.len()
        );
        return Err(BusError::InvalidArgument);
    }

    bus.begin_transmission(device.address());
    bus.write(register);
    for &b in data {
        bus.write(b);
    }
    bus.end_transmission(false).map_err(|e| {
        warn!(
            "I2C write 0x{:02X}/{}: {} ({:?})",
            register,
            device,
            BusError::AddressingFailure,
            e
        );
        BusError::AddressingFailure
    })
}
