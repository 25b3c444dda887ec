//! Hover patrol for flying enemies.
//!
//! Instead of reading a fixed waypoint list, a hovering actor synthesizes two
//! virtual waypoints at `anchor ± radius` and ping-pongs between them, while
//! the target height bobs on a sine wave.

use std::f32::consts::TAU;

use bevy::prelude::*;
use serde::Deserialize;

use super::patrol::{Arrival, PatrolPlan, PatrolStyle};

/// Shape of a hover patrol.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HoverSettings {
    /// Half the horizontal span covered around the anchor.
    pub radius: f32,
    /// Height of the hover line above the anchor.
    pub altitude: f32,
    /// Peak vertical bob around the hover line.
    pub amplitude: f32,
    /// Seconds per full bob.
    pub period: f32,
}

impl Default for HoverSettings {
    fn default() -> Self {
        Self {
            radius: 2.5,
            altitude: 2.0,
            amplitude: 1.0,
            period: std::f32::consts::PI,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverPattern {
    anchor: Vec2,
    settings: HoverSettings,
    elapsed: f32,
    plan: PatrolPlan,
}

impl HoverPattern {
    /// `phase` offsets the bob so neighbours don't move in lockstep.
    pub fn new(anchor: Vec2, settings: HoverSettings, phase: f32) -> Self {
        let line = anchor + Vec2::Y * settings.altitude;
        let radius = settings.radius.abs();
        let waypoints = vec![line + Vec2::X * radius, line - Vec2::X * radius];
        Self {
            anchor,
            settings,
            elapsed: phase.max(0.0),
            plan: PatrolPlan::new(waypoints, PatrolStyle::PingPong),
        }
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn plan(&self) -> &PatrolPlan {
        &self.plan
    }

    pub fn tick(&mut self, delta: f32) {
        if delta > 0.0 {
            self.elapsed += delta;
        }
    }

    /// Current vertical offset from the hover line.
    pub fn bob_offset(&self) -> f32 {
        if self.settings.period <= 0.0 {
            return 0.0;
        }
        self.settings.amplitude * (TAU * self.elapsed / self.settings.period).sin()
    }

    /// Point to fly toward this tick.
    pub fn advance(&mut self, position: Vec2, obstacle_ahead: bool) -> Vec2 {
        let fallback = self.anchor + Vec2::Y * self.settings.altitude;
        let waypoint = self
            .plan
            .advance(position, obstacle_ahead, Arrival::Horizontal)
            .unwrap_or(fallback);
        waypoint + Vec2::Y * self.bob_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> HoverSettings {
        HoverSettings {
            radius: 2.0,
            altitude: 1.0,
            amplitude: 0.5,
            period: 4.0,
        }
    }

    #[test]
    fn test_virtual_waypoints_straddle_anchor() {
        let hover = HoverPattern::new(Vec2::new(10.0, 5.0), settings(), 0.0);
        assert_eq!(
            hover.plan().waypoints(),
            &[Vec2::new(12.0, 6.0), Vec2::new(8.0, 6.0)]
        );
    }

    #[test]
    fn test_bob_follows_sine() {
        let mut hover = HoverPattern::new(Vec2::ZERO, settings(), 0.0);
        assert!(hover.bob_offset().abs() < 1e-6);
        hover.tick(1.0);
        assert!((hover.bob_offset() - 0.5).abs() < 1e-5);
        hover.tick(2.0);
        assert!((hover.bob_offset() + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_ping_pongs_between_ends() {
        let mut hover = HoverPattern::new(Vec2::ZERO, settings(), 0.0);
        let first = hover.advance(Vec2::new(-5.0, 1.0), false);
        assert_eq!(first.x, 2.0);

        let second = hover.advance(Vec2::new(2.0, 1.3), false);
        assert_eq!(second.x, -2.0);

        let third = hover.advance(Vec2::new(-2.0, 0.7), false);
        assert_eq!(third.x, 2.0);
    }

    #[test]
    fn test_zero_period_disables_bob() {
        let mut hover = HoverPattern::new(
            Vec2::ZERO,
            HoverSettings {
                period: 0.0,
                ..settings()
            },
            0.0,
        );
        hover.tick(1.3);
        assert_eq!(hover.bob_offset(), 0.0);
    }
}
