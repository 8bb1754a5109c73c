//! Recording transport shared by the integration tests.
//!
//! Every SPI write, GPIO change, busy read and delay lands in one ordered event
//! log so tests can check the exact protocol stream, including timing.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, ErrorKind, Operation, SpiDevice};

use hanji_epd::{Il0373, PanelConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Reset(bool),
    Dc(bool),
    Write(Vec<u8>),
    BusyRead(bool),
    DelayMs(u32),
    DelayNs(u32),
}

#[derive(Default)]
struct BusState {
    events: Vec<Event>,
    busy_script: VecDeque<bool>,
    writes: usize,
    fail_write_at: Option<usize>,
    busy_line_broken: bool,
}

/// Handle on the shared event log
#[derive(Clone, Default)]
pub struct Bus {
    state: Rc<RefCell<BusState>>,
}

pub struct RecordingSpi(Bus);
pub struct ScriptedBusy(Bus);
pub struct RecordingDc(Bus);
pub struct RecordingRst(Bus);
pub struct RecordingDelay(Bus);

pub type TestPanel = Il0373<RecordingSpi, ScriptedBusy, RecordingDc, RecordingRst, RecordingDelay>;

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver wired to this bus with the default timing
    pub fn panel(&self) -> TestPanel {
        self.panel_with(PanelConfig::default())
    }

    pub fn panel_with(&self, config: PanelConfig) -> TestPanel {
        Il0373::with_config(
            RecordingSpi(self.clone()),
            ScriptedBusy(self.clone()),
            RecordingDc(self.clone()),
            RecordingRst(self.clone()),
            RecordingDelay(self.clone()),
            config,
        )
    }

    /// Queue busy line levels, `true` = busy. Once drained the line reads idle.
    pub fn script_busy(&self, levels: impl IntoIterator<Item = bool>) {
        self.state.borrow_mut().busy_script.extend(levels);
    }

    /// Keep the busy line asserted for `polls` reads
    pub fn busy_for(&self, polls: usize) {
        self.script_busy(std::iter::repeat(true).take(polls));
    }

    /// Make the SPI write with this zero-based index fail
    pub fn fail_write_at(&self, index: usize) {
        self.state.borrow_mut().fail_write_at = Some(index);
    }

    pub fn clear_failure(&self) {
        self.state.borrow_mut().fail_write_at = None;
    }

    /// Every later read of the busy line fails
    pub fn break_busy_line(&self) {
        self.state.borrow_mut().busy_line_broken = true;
    }

    /// Successful SPI writes so far
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn event_count(&self) -> usize {
        self.state.borrow().events.len()
    }

    pub fn clear_events(&self) {
        self.state.borrow_mut().events.clear();
    }

    pub fn busy_reads(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::BusyRead(_)))
            .count()
    }

    pub fn delays_ms(&self) -> Vec<u32> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                Event::DelayMs(ms) => Some(*ms),
                _ => None,
            })
            .collect()
    }

    /// Group the byte stream into (command, data) pairs using the DC line
    pub fn commands(&self) -> Vec<(u8, Vec<u8>)> {
        let mut commands: Vec<(u8, Vec<u8>)> = Vec::new();
        let mut data_mode = false;
        for event in self.events() {
            match event {
                Event::Dc(level) => data_mode = level,
                Event::Write(bytes) if !data_mode => {
                    for byte in bytes {
                        commands.push((byte, Vec::new()));
                    }
                }
                Event::Write(bytes) => {
                    if let Some((_, data)) = commands.last_mut() {
                        data.extend(bytes);
                    }
                }
                _ => {}
            }
        }
        commands
    }

    pub fn command_bytes(&self) -> Vec<u8> {
        self.commands().iter().map(|(c, _)| *c).collect()
    }

    fn push(&self, event: Event) {
        self.state.borrow_mut().events.push(event);
    }
}

impl spi::ErrorType for RecordingSpi {
    type Error = ErrorKind;
}

impl SpiDevice for RecordingSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut state = self.0.state.borrow_mut();
        for operation in operations.iter_mut() {
            if let Operation::Write(bytes) = operation {
                if state.fail_write_at == Some(state.writes) {
                    return Err(ErrorKind::Other);
                }
                state.writes += 1;
                state.events.push(Event::Write(bytes.to_vec()));
            }
        }
        Ok(())
    }
}

impl digital::ErrorType for ScriptedBusy {
    type Error = digital::ErrorKind;
}

impl InputPin for ScriptedBusy {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.0.state.borrow().busy_line_broken {
            return Err(digital::ErrorKind::Other);
        }
        let level = self.0.state.borrow_mut().busy_script.pop_front().unwrap_or(false);
        self.0.push(Event::BusyRead(level));
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|level| !level)
    }
}

impl digital::ErrorType for RecordingDc {
    type Error = Infallible;
}

impl OutputPin for RecordingDc {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.push(Event::Dc(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.push(Event::Dc(true));
        Ok(())
    }
}

impl digital::ErrorType for RecordingRst {
    type Error = Infallible;
}

impl OutputPin for RecordingRst {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.push(Event::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.push(Event::Reset(true));
        Ok(())
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMs(ms));
    }
}
