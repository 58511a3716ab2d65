use std::collections::VecDeque;

use crate::color::{rgb::to_channel, Rgb};

pub const DEFAULT_WINDOW_CAPACITY: usize = 5;

/// Bounded FIFO of the most recent readings of one session, averaged to damp
/// sensor jitter.
#[derive(Debug, Clone)]
pub struct SmoothingWindow {
    capacity: usize,
    samples: VecDeque<Rgb>,
}

impl Default for SmoothingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

impl SmoothingWindow {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = &Rgb> {
        self.samples.iter()
    }

    /// Append a reading, evicting the oldest at capacity, and return the
    /// channel-wise mean of what remains buffered.
    pub fn push(&mut self, rgb: Rgb) -> Rgb {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(rgb);

        // Non-empty after the push.
        self.average().unwrap_or(rgb)
    }

    pub fn average(&self) -> Option<Rgb> {
        if self.samples.is_empty() {
            return None;
        }

        let (red, green, blue) = self.samples.iter().fold((0u32, 0u32, 0u32), |acc, s| {
            (
                acc.0 + u32::from(s.red),
                acc.1 + u32::from(s.green),
                acc.2 + u32::from(s.blue),
            )
        });
        let count = self.samples.len() as f64;

        Some(Rgb {
            red: to_channel(f64::from(red) / count),
            green: to_channel(f64::from(green) / count),
            blue: to_channel(f64::from(blue) / count),
        })
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_push_returns_the_reading() {
        let mut window = SmoothingWindow::new(5);
        assert_eq!(window.push(Rgb::new(7, 8, 9)), Rgb::new(7, 8, 9));
    }

    #[test]
    fn averages_accumulate() {
        let mut window = SmoothingWindow::new(5);
        assert_eq!(window.push(Rgb::new(0, 0, 0)), Rgb::new(0, 0, 0));
        assert_eq!(window.push(Rgb::new(100, 100, 100)), Rgb::new(50, 50, 50));
    }

    #[test]
    fn half_rounds_away_from_zero() {
        let mut window = SmoothingWindow::new(2);
        window.push(Rgb::new(0, 10, 255));
        assert_eq!(window.push(Rgb::new(1, 11, 254)), Rgb::new(1, 11, 255));
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let mut window = SmoothingWindow::new(3);
        window.push(Rgb::new(255, 255, 255));
        window.push(Rgb::new(30, 30, 30));
        window.push(Rgb::new(60, 60, 60));
        let averaged = window.push(Rgb::new(90, 90, 90));

        assert_eq!(window.len(), 3);
        let kept: Vec<Rgb> = window.samples().copied().collect();
        assert_eq!(
            kept,
            vec![Rgb::new(30, 30, 30), Rgb::new(60, 60, 60), Rgb::new(90, 90, 90)]
        );
        assert_eq!(averaged, Rgb::new(60, 60, 60));
    }

    #[test]
    fn reset_empties_the_buffer() {
        let mut window = SmoothingWindow::default();
        window.push(Rgb::new(200, 0, 0));
        window.reset();
        assert!(window.is_empty());
        assert_eq!(window.average(), None);
        assert_eq!(window.push(Rgb::new(0, 0, 200)), Rgb::new(0, 0, 200));
    }

    #[test]
    fn zero_capacity_behaves_as_one() {
        let mut window = SmoothingWindow::new(0);
        assert_eq!(window.capacity(), 1);
        window.push(Rgb::new(10, 10, 10));
        assert_eq!(window.push(Rgb::new(20, 20, 20)), Rgb::new(20, 20, 20));
    }
}
