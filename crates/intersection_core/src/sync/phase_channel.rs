//! # Phase Channel
//!
//! Single-slot, overwrite-on-send, blocking-on-receive handoff.
//!
//! ## Thread Safety
//!
//! - `send`: any thread, never blocks beyond the internal lock
//! - `receive`: any number of threads; each buffered value goes to exactly
//!   one receiver
//!
//! Ordering among receivers competing for one value is not FIFO.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Thread-safe handoff of the latest value from a producer to blocked consumers.
///
/// After any completed [`send`](Self::send) the buffer holds exactly one
/// element: the value just sent. Values that were never received are
/// discarded.
///
/// ## Usage
///
/// ```rust
/// use intersection_core::PhaseChannel;
/// use std::sync::Arc;
/// use std::thread;
///
/// let channel = Arc::new(PhaseChannel::new());
///
/// let consumer = {
///     let channel = Arc::clone(&channel);
///     thread::spawn(move || channel.receive())
/// };
///
/// channel.send("green");
/// assert_eq!(consumer.join().unwrap(), "green");
/// ```
pub struct PhaseChannel<T> {
    /// Pending values. Never longer than one after a send.
    queue: Mutex<VecDeque<T>>,
    /// Signalled when the queue becomes non-empty.
    not_empty: Condvar,
    /// Values replaced before any receiver took them.
    overwritten: AtomicU64,
}

impl<T> PhaseChannel<T> {
    /// Creates an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(1)),
            not_empty: Condvar::new(),
            overwritten: AtomicU64::new(0),
        }
    }

    /// Publishes `value`, replacing any value still waiting to be received.
    ///
    /// Wakes one blocked receiver, if any.
    pub fn send(&self, value: T) {
        let mut queue = self.queue.lock();
        let dropped = queue.len() as u64;
        queue.clear();
        queue.push_back(value);
        drop(queue);

        if dropped > 0 {
            self.overwritten.fetch_add(dropped, Ordering::Relaxed);
        }
        self.not_empty.notify_one();
    }

    /// Blocks until a value is available, then takes it.
    ///
    /// Blocks forever if nothing is ever sent.
    pub fn receive(&self) -> T {
        let mut queue = self.queue.lock();
        loop {
            if let Some(value) = queue.pop_front() {
                return value;
            }
            self.not_empty.wait(&mut queue);
        }
    }

    /// Like [`receive`](Self::receive), but gives up after `timeout`.
    ///
    /// Returns `None` if the deadline passes with the channel still empty.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now().checked_add(timeout);
        let mut queue = self.queue.lock();
        loop {
            if let Some(value) = queue.pop_front() {
                return Some(value);
            }
            match deadline {
                Some(deadline) => {
                    if self.not_empty.wait_until(&mut queue, deadline).timed_out() {
                        return queue.pop_front();
                    }
                }
                // Deadline not representable: effectively unbounded.
                None => self.not_empty.wait(&mut queue),
            }
        }
    }

    /// Takes the pending value without blocking.
    pub fn try_receive(&self) -> Option<T> {
        self.queue.lock().pop_front()
    }

    /// Returns true if no value is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Returns the number of pending values (0 or 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Returns how many values were discarded by the overwrite policy.
    #[inline]
    #[must_use]
    pub fn overwritten(&self) -> u64 {
        self.overwritten.load(Ordering::Relaxed)
    }
}

impl<T> Default for PhaseChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for PhaseChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseChannel")
            .field("pending", &self.len())
            .field("overwritten", &self.overwritten())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_channel_is_empty() {
        let channel: PhaseChannel<u32> = PhaseChannel::new();
        assert!(channel.is_empty());
        assert_eq!(channel.len(), 0);
        assert_eq!(channel.try_receive(), None);
    }

    #[test]
    fn test_send_then_receive() {
        let channel = PhaseChannel::new();
        channel.send(7);
        assert_eq!(channel.len(), 1);
        assert_eq!(channel.receive(), 7);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_overwrite_keeps_latest() {
        let channel = PhaseChannel::new();
        for i in 0..100 {
            channel.send(i);
            assert_eq!(channel.len(), 1);
        }

        assert_eq!(channel.receive(), 99);
        assert!(channel.is_empty());
        assert_eq!(channel.overwritten(), 99);
    }

    #[test]
    fn test_received_value_not_counted_as_overwritten() {
        let channel = PhaseChannel::new();
        channel.send(1);
        assert_eq!(channel.receive(), 1);
        channel.send(2);
        assert_eq!(channel.overwritten(), 0);
    }

    #[test]
    fn test_values_are_moved_not_cloned() {
        let channel = PhaseChannel::new();
        channel.send(String::from("red"));
        channel.send(String::from("green"));
        let value: String = channel.receive();
        assert_eq!(value, "green");
    }

    #[test]
    fn test_receive_timeout_empty() {
        let channel: PhaseChannel<u8> = PhaseChannel::new();
        let start = Instant::now();
        assert_eq!(channel.receive_timeout(Duration::from_millis(20)), None);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_receive_timeout_gets_value() {
        let channel = Arc::new(PhaseChannel::new());

        let producer = {
            let channel = Arc::clone(&channel);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(10));
                channel.send(42);
            })
        };

        assert_eq!(channel.receive_timeout(Duration::from_secs(5)), Some(42));
        producer.join().unwrap();
    }

    #[test]
    fn test_receive_blocks_until_send() {
        let channel = Arc::new(PhaseChannel::new());

        let consumer = {
            let channel = Arc::clone(&channel);
            thread::spawn(move || (channel.receive(), Instant::now()))
        };

        thread::sleep(Duration::from_millis(30));
        let sent_at = Instant::now();
        channel.send(5_u32);

        let (value, received_at) = consumer.join().unwrap();
        assert_eq!(value, 5);
        assert!(received_at >= sent_at);
    }

    #[test]
    fn test_each_value_delivered_once() {
        let channel = Arc::new(PhaseChannel::new());
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let channel = Arc::clone(&channel);
                thread::spawn(move || channel.receive_timeout(Duration::from_millis(200)))
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        channel.send(1_u8);

        let delivered: Vec<_> = consumers
            .into_iter()
            .filter_map(|c| c.join().unwrap())
            .collect();
        assert_eq!(delivered, vec![1]);
    }
}
