//! Scripted serial port and clock doubles for driver testing
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use espat::serial::{Clock, Delay, Read, ReadReady, SerialPort, Write};

/// Scripted serial port double.
///
/// Each queued reply is released by the next `write` call, mirroring the
/// request/response discipline of the real modem: nothing is readable
/// until a command has been sent. A reply may be split into bursts, each
/// delivered by one `read` call, to exercise chunk-by-chunk processing.
#[derive(Clone, Default)]
pub struct MockSerial {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    script: VecDeque<Vec<Vec<u8>>>,
    writes: Vec<Vec<u8>>,
    rx: VecDeque<Vec<u8>>,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one reply, delivered in a single burst.
    pub fn enqueue_reply(&self, reply: &[u8]) {
        self.enqueue_bursts(&[reply]);
    }

    /// Queues one reply split into separately-read bursts.
    pub fn enqueue_bursts(&self, bursts: &[&[u8]]) {
        self.inner
            .borrow_mut()
            .script
            .push_back(bursts.iter().map(|b| b.to_vec()).collect());
    }

    /// Every write issued so far, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.inner.borrow().writes.clone()
    }

    /// Whether any write contained `needle`.
    pub fn wrote(&self, needle: &[u8]) -> bool {
        self.inner
            .borrow()
            .writes
            .iter()
            .any(|w| w.windows(needle.len()).any(|window| window == needle))
    }
}

impl Read for MockSerial {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut inner = self.inner.borrow_mut();
        let Some(mut segment) = inner.rx.pop_front() else {
            return Ok(0);
        };
        let n = segment.len().min(buf.len());
        buf[..n].copy_from_slice(&segment[..n]);
        if n < segment.len() {
            inner.rx.push_front(segment.split_off(n));
        }
        Ok(n)
    }
}

impl Write for MockSerial {
    type Error = ();

    fn write(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        let mut inner = self.inner.borrow_mut();
        inner.writes.push(buf.to_vec());
        if let Some(reply) = inner.script.pop_front() {
            inner.rx = reply.into();
        }
        Ok(())
    }
}

impl ReadReady for MockSerial {
    fn bytes_available(&mut self) -> usize {
        self.inner.borrow().rx.iter().map(Vec::len).sum()
    }
}

impl SerialPort for MockSerial {}

/// Monotonic clock double.
///
/// Every `now_ms` call advances time by one millisecond so that polling
/// loops always terminate; `delay_ms` jumps time forward. Clones share the
/// same timeline, letting a test keep a handle while the driver owns its
/// copy.
#[derive(Clone, Default)]
pub struct MockClock {
    now: Rc<RefCell<u64>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mock time without advancing it.
    pub fn now(&self) -> u64 {
        *self.now.borrow()
    }
}

impl Clock for MockClock {
    fn now_ms(&mut self) -> u64 {
        let mut now = self.now.borrow_mut();
        *now += 1;
        *now
    }
}

impl Delay for MockClock {
    fn delay_ms(&mut self, ms: u32) {
        *self.now.borrow_mut() += u64::from(ms);
    }
}
