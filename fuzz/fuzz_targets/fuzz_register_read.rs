//! Fuzz target: `read_register` against an arbitrary bus.
//!
//! The first bytes script the bus (NACK flag, reply length, requested
//! length); the rest is the reply payload. The destination buffer must
//! be either fully written with the payload or left untouched.
//!
//! cargo fuzz run fuzz_register_read

#![no_main]

use flightcore::bus::{BusDevice, TwoWire, read_register};
use libfuzzer_sys::fuzz_target;

struct ScriptWire<'a> {
    nack: bool,
    reply: &'a [u8],
    pos: usize,
    limit: usize,
}

impl TwoWire for ScriptWire<'_> {
    type Error = ();

    fn begin_transmission(&mut self, _address: u8) {}
    fn write(&mut self, _byte: u8) {}
    fn end_transmission(&mut self, _keep_claimed: bool) -> Result<(), ()> {
        if self.nack { Err(()) } else { Ok(()) }
    }
    fn request_from(&mut self, _address: u8, count: usize) -> usize {
        self.limit = count.min(self.reply.len());
        self.pos = 0;
        self.limit
    }
    fn read(&mut self) -> Option<u8> {
        if self.pos >= self.limit {
            return None;
        }
        let b = self.reply[self.pos];
        self.pos += 1;
        Some(b)
    }
}

fuzz_target!(|data: &[u8]| {
    let [flags, len, reg, reply @ ..] = data else {
        return;
    };
    let mut bus = ScriptWire {
        nack: flags & 1 != 0,
        reply,
        pos: 0,
        limit: 0,
    };
    let Some(dev) = BusDevice::new(flags >> 1) else {
        return;
    };
    let mut buf = vec![0x5Au8; usize::from(*len)];
    match read_register(&mut bus, dev, *reg, &mut buf) {
        Ok(()) => assert_eq!(&buf[..], &reply[..buf.len()]),
        Err(_) => assert!(buf.iter().all(|&b| b == 0x5A)),
    }
});
