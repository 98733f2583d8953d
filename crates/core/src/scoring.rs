//! Scoring module - row-clear points and the speed curve
//!
//! Every cleared row is worth a flat 100 points: no level multiplier, no
//! combo or back-to-back bonus. The score in turn drives the descent speed.

use crate::types::{
    BASE_TICK_MS, MIN_TICK_MS, POINTS_PER_ROW, SCORE_PER_SPEED_STEP, SPEED_STEP_MS,
};

/// Points for clearing `rows` rows in one lock
pub fn points_for_rows(rows: usize) -> u32 {
    (rows as u32).saturating_mul(POINTS_PER_ROW)
}

/// Descent interval for a score: `max(300, 1000 - (score / 5) * 25)`
pub fn tick_interval_ms(score: u32) -> u32 {
    let reduction = (score / SCORE_PER_SPEED_STEP).saturating_mul(SPEED_STEP_MS);
    BASE_TICK_MS.saturating_sub(reduction).max(MIN_TICK_MS)
}

/// Running score; only ever grows until reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    score: u32,
    rows: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a batch of cleared rows; returns the points awarded
    pub fn add_cleared_rows(&mut self, rows: usize) -> u32 {
        let points = points_for_rows(rows);
        self.score = self.score.saturating_add(points);
        self.rows = self.rows.saturating_add(rows as u32);
        points
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn tick_interval_ms(&self) -> u32 {
        tick_interval_ms(self.score)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_for_rows() {
        assert_eq!(points_for_rows(0), 0);
        assert_eq!(points_for_rows(1), 100);
        assert_eq!(points_for_rows(4), 400);
    }

    #[test]
    fn test_tick_interval_curve() {
        assert_eq!(tick_interval_ms(0), 1000);
        assert_eq!(tick_interval_ms(4), 1000);
        assert_eq!(tick_interval_ms(5), 975);
        assert_eq!(tick_interval_ms(100), 500);
        assert_eq!(tick_interval_ms(140), 300);
        assert_eq!(tick_interval_ms(200), 300);
        assert_eq!(tick_interval_ms(u32::MAX), 300);
    }

    #[test]
    fn test_tracker_accumulates() {
        let mut t = ScoreTracker::new();
        assert_eq!(t.add_cleared_rows(2), 200);
        assert_eq!(t.add_cleared_rows(0), 0);
        assert_eq!(t.add_cleared_rows(1), 100);
        assert_eq!(t.score(), 300);
        assert_eq!(t.rows(), 3);
        assert_eq!(t.tick_interval_ms(), 300);
        t.reset();
        assert_eq!(t.score(), 0);
    }
}
