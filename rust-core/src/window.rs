//! Fixed-capacity sample window.
//!
//! A ring buffer of scalar samples with mean and population standard
//! deviation over its current contents. Pushing into a full window evicts
//! the oldest sample, so the window always holds the most recent
//! `capacity` values in arrival order.
//!
//! Push is O(1) (index-modulo ring). Statistics are O(N) two-pass over the
//! contents, which keeps them exact after arbitrarily long streams.

use crate::error::{Result, ShakeError};

/// Circular buffer of the most recent `capacity` samples.
#[derive(Debug, Clone)]
pub struct SampleWindow {
    buffer: Vec<f32>,
    capacity: usize,
    /// Slot the next push writes to.
    head: usize,
    len: usize,
}

impl SampleWindow {
    /// Create an empty window holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(ShakeError::InvalidConfig(
                "sample window capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            buffer: vec![0.0; capacity],
            capacity,
            head: 0,
            len: 0,
        })
    }

    /// Insert a sample, evicting the oldest one when full.
    ///
    /// Non-finite values are rejected with [`ShakeError::InvalidSample`] and
    /// leave the window unchanged.
    pub fn push(&mut self, value: f32) -> Result<()> {
        if !value.is_finite() {
            return Err(ShakeError::InvalidSample(value));
        }
        self.buffer[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
        Ok(())
    }

    /// True once `capacity` samples have been pushed. Stays true until `clear`.
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Arithmetic mean of the current contents.
    pub fn mean(&self) -> Result<f32> {
        if self.is_empty() {
            return Err(ShakeError::EmptyWindow);
        }
        Ok(self.iter().sum::<f32>() / self.len as f32)
    }

    /// Population standard deviation (divides by the sample count).
    pub fn stddev(&self) -> Result<f32> {
        let mean = self.mean()?;
        let variance = self
            .iter()
            .map(|x| (x - mean) * (x - mean))
            .sum::<f32>()
            / self.len as f32;
        Ok(variance.sqrt())
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let idx = (self.head + self.capacity - 1) % self.capacity;
        Some(self.buffer[idx])
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let start = (self.head + self.capacity - self.len) % self.capacity;
        (0..self.len).map(move |i| self.buffer[(start + i) % self.capacity])
    }

    /// Snapshot of the contents, oldest first.
    pub fn to_vec(&self) -> Vec<f32> {
        self.iter().collect()
    }

    /// Drop all samples. The window is not full afterwards.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.head = 0;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, values: &[f32]) -> SampleWindow {
        let mut window = SampleWindow::new(capacity).unwrap();
        for &v in values {
            window.push(v).unwrap();
        }
        window
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            SampleWindow::new(0),
            Err(ShakeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut window = SampleWindow::new(4).unwrap();
        for i in 0..50 {
            window.push(i as f32).unwrap();
            assert!(window.len() <= 4);
        }
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn test_full_after_capacity_pushes_and_stays_full() {
        let mut window = SampleWindow::new(10).unwrap();
        for i in 0..9 {
            window.push(i as f32).unwrap();
            assert!(!window.is_full());
        }
        window.push(9.0).unwrap();
        assert!(window.is_full());

        for i in 0..25 {
            window.push(i as f32).unwrap();
            assert!(window.is_full());
        }
    }

    #[test]
    fn test_fifo_eviction_order() {
        let window = filled(3, &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(window.to_vec(), vec![3.0, 4.0, 5.0]);
        assert_eq!(window.latest(), Some(5.0));
    }

    #[test]
    fn test_partial_window_order() {
        let window = filled(5, &[7.0, 8.0]);
        assert_eq!(window.to_vec(), vec![7.0, 8.0]);
        assert!(!window.is_full());
    }

    #[test]
    fn test_constant_window_statistics() {
        let window = filled(10, &[10.0; 10]);
        assert!((window.mean().unwrap() - 10.0).abs() < 1e-6);
        assert!(window.stddev().unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_single_spike_population_stddev() {
        let window = filled(10, &[0.0, 0.0, 0.0, 0.0, 0.0, 20.0, 0.0, 0.0, 0.0, 0.0]);
        assert!((window.mean().unwrap() - 2.0).abs() < 1e-6);
        assert!((window.stddev().unwrap() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_statistics_follow_eviction() {
        // Spike is evicted after capacity further pushes.
        let mut window = filled(3, &[0.0, 0.0, 30.0]);
        assert!(window.stddev().unwrap() > 10.0);
        for _ in 0..3 {
            window.push(0.0).unwrap();
        }
        assert_eq!(window.stddev().unwrap(), 0.0);
    }

    #[test]
    fn test_empty_window_statistics_fail() {
        let window = SampleWindow::new(3).unwrap();
        assert_eq!(window.mean(), Err(ShakeError::EmptyWindow));
        assert_eq!(window.stddev(), Err(ShakeError::EmptyWindow));
        assert_eq!(window.latest(), None);
    }

    #[test]
    fn test_non_finite_rejected_without_mutation() {
        let mut window = filled(3, &[1.0, 2.0]);
        assert!(matches!(window.push(f32::NAN), Err(ShakeError::InvalidSample(_))));
        assert_eq!(
            window.push(f32::INFINITY),
            Err(ShakeError::InvalidSample(f32::INFINITY))
        );
        assert!(window.push(f32::NEG_INFINITY).is_err());
        assert_eq!(window.to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_capacity_one_has_zero_deviation() {
        let mut window = SampleWindow::new(1).unwrap();
        window.push(3.0).unwrap();
        assert!(window.is_full());
        window.push(100.0).unwrap();
        assert_eq!(window.to_vec(), vec![100.0]);
        assert_eq!(window.stddev().unwrap(), 0.0);
    }

    #[test]
    fn test_clear_resets_fullness() {
        let mut window = filled(2, &[1.0, 2.0]);
        assert!(window.is_full());
        window.clear();
        assert!(window.is_empty());
        assert!(!window.is_full());
        assert_eq!(window.mean(), Err(ShakeError::EmptyWindow));
    }
}
