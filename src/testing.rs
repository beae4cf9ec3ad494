//! Recording fakes for the hardware traits, shared by the unit tests.

extern crate std;

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, ErrorType, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::calibration::CalibrationStorage;
use crate::{CHANNELS_PER_CHIP, CHANNEL_COUNT, COMMAND_BITS, VALUE_BITS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Sdi,
    Scki,
    Latch,
}

/// Log of every level change on the three bus lines.
#[derive(Debug, Clone, Default)]
pub struct Wire(Rc<RefCell<Vec<(Line, bool)>>>);

impl Wire {
    pub fn pin(&self, line: Line) -> RecordingPin {
        RecordingPin {
            line,
            wire: self.clone(),
        }
    }

    pub fn pins(&self) -> (RecordingPin, RecordingPin, RecordingPin) {
        (self.pin(Line::Sdi), self.pin(Line::Scki), self.pin(Line::Latch))
    }

    pub fn events(&self) -> Vec<(Line, bool)> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Number of rising edges on `line`.
    pub fn rising_edges(&self, line: Line) -> usize {
        let mut level = false;
        let mut edges = 0;
        for &(event_line, high) in self.0.borrow().iter() {
            if event_line == line {
                if high && !level {
                    edges += 1;
                }
                level = high;
            }
        }
        edges
    }

    /// Splits the log into one transmission per latch pulse that had bits
    /// clocked in before it.
    pub fn transmissions(&self) -> Vec<Transmission> {
        let mut transmissions = Vec::new();
        let mut bits = Vec::new();
        let mut sdi = false;
        let mut scki = false;
        let mut latch = false;
        for &(line, high) in self.0.borrow().iter() {
            match line {
                Line::Sdi => sdi = high,
                Line::Scki => {
                    if high && !scki {
                        bits.push(sdi);
                    }
                    scki = high;
                }
                Line::Latch => {
                    if latch && !high && !bits.is_empty() {
                        transmissions.push(Transmission::decode(&bits, sdi));
                        bits.clear();
                    }
                    latch = high;
                }
            }
        }
        transmissions
    }
}

/// One decoded frame as seen by the chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    /// Channel values indexed by physical channel.
    pub channels: [u16; CHANNEL_COUNT],
    /// Physical channels in the order they were shifted.
    pub order: Vec<usize>,
    pub chip2_command: u8,
    pub chip1_command: u8,
    pub bit_count: usize,
    /// Level of SDI when the latch fell.
    pub data_idle_high: bool,
}

impl Transmission {
    fn decode(bits: &[bool], data_idle_high: bool) -> Self {
        let mut cursor = 0;
        let mut take = |width: u32| {
            let word = bits[cursor..cursor + width as usize]
                .iter()
                .fold(0u16, |word, &bit| (word << 1) | u16::from(bit));
            cursor += width as usize;
            word
        };

        let mut channels = [0; CHANNEL_COUNT];
        let mut order = Vec::new();
        for channel in (CHANNELS_PER_CHIP..CHANNEL_COUNT).rev() {
            channels[channel] = take(VALUE_BITS);
            order.push(channel);
        }
        let chip2_command = take(COMMAND_BITS) as u8;
        for channel in (0..CHANNELS_PER_CHIP).rev() {
            channels[channel] = take(VALUE_BITS);
            order.push(channel);
        }
        let chip1_command = take(COMMAND_BITS) as u8;

        Self {
            channels,
            order,
            chip2_command,
            chip1_command,
            bit_count: bits.len(),
            data_idle_high,
        }
    }
}

pub struct RecordingPin {
    line: Line,
    wire: Wire,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.wire.0.borrow_mut().push((self.line, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.wire.0.borrow_mut().push((self.line, true));
        Ok(())
    }
}

/// Pin that refuses every level change.
pub struct FailingPin;

impl ErrorType for FailingPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for FailingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(digital::ErrorKind::Other)
    }
}

/// PWM channel with an 8-bit range that remembers its duty cycle.
#[derive(Clone, Default)]
pub struct RecordingPwm {
    duty: Rc<Cell<Option<u16>>>,
    fail: bool,
}

impl RecordingPwm {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn duty(&self) -> Option<u16> {
        self.duty.get()
    }
}

impl pwm::ErrorType for RecordingPwm {
    type Error = pwm::ErrorKind;
}

impl SetDutyCycle for RecordingPwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.fail {
            return Err(pwm::ErrorKind::Other);
        }
        self.duty.set(Some(duty));
        Ok(())
    }
}

/// Delay that only adds up how long it was asked to wait.
#[derive(Clone, Default)]
pub struct RecordingDelay(Rc<Cell<u64>>);

impl RecordingDelay {
    pub fn total_ns(&self) -> u64 {
        self.0.get()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.set(self.0.get() + u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.set(self.0.get() + u64::from(ms) * 1_000_000);
    }
}

/// Byte store backed by a shared vector.
#[derive(Clone)]
pub struct MemoryStorage {
    bytes: Rc<RefCell<Vec<u8>>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new(size: usize) -> Self {
        Self::filled(size, 0)
    }

    pub fn filled(size: usize, byte: u8) -> Self {
        Self {
            bytes: Rc::new(RefCell::new(std::vec![byte; size])),
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.borrow().clone()
    }
}

impl CalibrationStorage for MemoryStorage {
    type Error = ();

    fn read(&mut self, address: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        if self.fail_reads {
            return Err(());
        }
        let start = address as usize;
        let stored = self.bytes.borrow();
        let source = stored.get(start..start + bytes.len()).ok_or(())?;
        bytes.copy_from_slice(source);
        Ok(())
    }

    fn write(&mut self, address: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(());
        }
        let start = address as usize;
        let mut stored = self.bytes.borrow_mut();
        let target = stored.get_mut(start..start + bytes.len()).ok_or(())?;
        target.copy_from_slice(bytes);
        Ok(())
    }
}
