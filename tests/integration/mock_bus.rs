//! Mock two-wire bus and event sink for integration tests.
//!
//! `MockWire` models one device with a register map. Every bus call is
//! recorded so tests can assert on the exact transaction sequence (or its
//! absence).

use flightcore::app::events::FlightEvent;
use flightcore::app::ports::EventSink;
use flightcore::bus::TwoWire;
use std::collections::{HashMap, VecDeque};

// ── Bus call record ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum BusCall {
    Begin(u8),
    Write(u8),
    End { keep_claimed: bool },
    Request { address: u8, count: usize },
    Read,
}

// ── MockWire ──────────────────────────────────────────────────

pub struct MockWire {
    pub calls: Vec<BusCall>,
    /// Address the simulated device answers on.
    pub device: u8,
    /// Register contents returned on reads.
    pub registers: HashMap<u8, Vec<u8>>,
    /// Bytes written to registers (register -> payload).
    pub writes: Vec<(u8, Vec<u8>)>,
    /// NACK every `end_transmission`.
    pub nack: bool,
    /// Deliver at most this many bytes per request.
    pub max_reply: Option<usize>,
    current_register: Option<u8>,
    tx: Vec<u8>,
    rx: VecDeque<u8>,
}

#[allow(dead_code)]
impl MockWire {
    pub fn new(device: u8) -> Self {
        Self {
            calls: Vec::new(),
            device,
            registers: HashMap::new(),
            writes: Vec::new(),
            nack: false,
            max_reply: None,
            current_register: None,
            tx: Vec::new(),
            rx: VecDeque::new(),
        }
    }

    pub fn with_register(mut self, register: u8, bytes: &[u8]) -> Self {
        self.registers.insert(register, bytes.to_vec());
        self
    }

    pub fn set_u16(&mut self, register: u8, value: u16) {
        self.registers.insert(register, value.to_be_bytes().to_vec());
    }

    pub fn request_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BusCall::Request { .. }))
            .count()
    }
}

impl TwoWire for MockWire {
    type Error = &'static str;

    fn begin_transmission(&mut self, address: u8) {
        self.calls.push(BusCall::Begin(address));
        self.tx.clear();
    }

    fn write(&mut self, byte: u8) {
        self.calls.push(BusCall::Write(byte));
        self.tx.push(byte);
    }

    fn end_transmission(&mut self, keep_claimed: bool) -> Result<(), &'static str> {
        self.calls.push(BusCall::End { keep_claimed });
        if self.nack {
            return Err("nack");
        }
        if let Some((&register, payload)) = self.tx.split_first() {
            self.current_register = Some(register);
            if !payload.is_empty() {
                self.writes.push((register, payload.to_vec()));
            }
        }
        Ok(())
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        self.calls.push(BusCall::Request { address, count });
        self.rx.clear();
        if address != self.device {
            return 0;
        }
        let data = self
            .current_register
            .and_then(|r| self.registers.get(&r))
            .cloned()
            .unwrap_or_default();
        let limit = self.max_reply.unwrap_or(usize::MAX);
        self.rx.extend(data.into_iter().take(count.min(limit)));
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.calls.push(BusCall::Read);
        self.rx.pop_front()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<FlightEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &FlightEvent) {
        self.events.push(*event);
    }
}
