//! Waypoint patrol - Loop and PingPong traversal with ledge reversal.

use bevy::prelude::*;
use serde::Deserialize;

/// Distance at which a waypoint counts as reached.
pub const WAYPOINT_EPSILON: f32 = 0.1;

/// How the patrol index moves once a waypoint is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PatrolStyle {
    /// Wrap from the last waypoint back to the first.
    #[default]
    Loop,
    /// Walk to the end, then back to the start.
    PingPong,
}

/// Which distance decides arrival at a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// Only the horizontal gap; for walkers and bobbing flyers.
    Horizontal,
    /// Full 2D distance.
    Planar,
}

impl Arrival {
    fn reached(&self, position: Vec2, waypoint: Vec2) -> bool {
        let gap = match self {
            Arrival::Horizontal => (waypoint.x - position.x).abs(),
            Arrival::Planar => position.distance(waypoint),
        };
        gap < WAYPOINT_EPSILON
    }
}

/// An ordered waypoint list and the actor's progress along it.
///
/// `current_index` is always a valid index while the list is non-empty. An
/// empty plan never yields a target, so its actor holds position.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolPlan {
    waypoints: Vec<Vec2>,
    style: PatrolStyle,
    current_index: usize,
    moving_forward: bool,
}

impl PatrolPlan {
    pub fn new(waypoints: Vec<Vec2>, style: PatrolStyle) -> Self {
        Self {
            waypoints,
            style,
            current_index: 0,
            moving_forward: true,
        }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn style(&self) -> PatrolStyle {
        self.style
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_moving_forward(&self) -> bool {
        self.moving_forward
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The waypoint currently being walked to.
    pub fn current_target(&self) -> Option<Vec2> {
        self.waypoints.get(self.current_index).copied()
    }

    /// Update progress and return the waypoint to head for.
    ///
    /// A detected ledge reverses travel immediately, ahead of any waypoint
    /// progress. Returns `None` for an empty plan.
    pub fn advance(&mut self, position: Vec2, ledge_detected: bool, arrival: Arrival) -> Option<Vec2> {
        let target = self.current_target()?;

        if ledge_detected {
            self.reverse();
        } else if arrival.reached(position, target) {
            self.step();
        }

        self.current_target()
    }

    /// Flip travel direction and retarget the previous waypoint.
    ///
    /// On a ping-pong path with no waypoint behind the current one (heading
    /// for the first while moving forward, or the last while moving back),
    /// the flip reflects off that end: the target becomes its neighbour and
    /// travel continues away from the ledge, so the direction flag ends up
    /// unchanged.
    pub fn reverse(&mut self) {
        if self.waypoints.is_empty() {
            return;
        }
        self.moving_forward = !self.moving_forward;
        self.step();
    }

    fn step(&mut self) {
        let len = self.waypoints.len();
        if len == 0 {
            return;
        }

        match self.style {
            PatrolStyle::Loop => {
                self.current_index = if self.moving_forward {
                    (self.current_index + 1) % len
                } else {
                    (self.current_index + len - 1) % len
                };
            }
            PatrolStyle::PingPong => {
                if self.moving_forward {
                    if self.current_index + 1 >= len {
                        // Reflect one step in from the end
                        self.current_index = len.saturating_sub(2);
                        self.moving_forward = false;
                    } else {
                        self.current_index += 1;
                    }
                } else if self.current_index == 0 {
                    self.current_index = 1;
                    self.moving_forward = true;
                } else {
                    self.current_index -= 1;
                }
                // One- and two-point paths reflect past the ends
                self.current_index = self.current_index.min(len - 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(count: usize) -> Vec<Vec2> {
        (0..count).map(|i| Vec2::new(i as f32 * 4.0, 0.0)).collect()
    }

    /// Walk the plan by teleporting onto each target and record the indices.
    fn visit(plan: &mut PatrolPlan, steps: usize) -> Vec<usize> {
        let mut visited = vec![plan.current_index()];
        for _ in 0..steps {
            let here = plan.current_target().unwrap();
            plan.advance(here, false, Arrival::Planar);
            visited.push(plan.current_index());
        }
        visited
    }

    #[test]
    fn test_empty_plan_holds_forever() {
        let mut plan = PatrolPlan::new(Vec::new(), PatrolStyle::PingPong);
        for _ in 0..100 {
            assert_eq!(plan.advance(Vec2::ZERO, false, Arrival::Planar), None);
            assert_eq!(plan.advance(Vec2::ZERO, true, Arrival::Planar), None);
        }
        assert_eq!(plan.current_index(), 0);
    }

    #[test]
    fn test_loop_wraps() {
        let mut plan = PatrolPlan::new(line(3), PatrolStyle::Loop);
        assert_eq!(visit(&mut plan, 6), vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_ping_pong_reflects() {
        let mut plan = PatrolPlan::new(line(3), PatrolStyle::PingPong);
        assert_eq!(visit(&mut plan, 8), vec![0, 1, 2, 1, 0, 1, 2, 1, 0]);
    }

    #[test]
    fn test_ping_pong_short_paths_stay_in_bounds() {
        let mut single = PatrolPlan::new(line(1), PatrolStyle::PingPong);
        assert!(visit(&mut single, 6).iter().all(|&index| index == 0));

        let mut pair = PatrolPlan::new(line(2), PatrolStyle::PingPong);
        assert_eq!(visit(&mut pair, 5), vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_no_step_until_reached() {
        let mut plan = PatrolPlan::new(line(3), PatrolStyle::Loop);
        let target = plan.advance(Vec2::new(-2.0, 0.0), false, Arrival::Planar);
        assert_eq!(target, Some(Vec2::ZERO));
        assert_eq!(plan.current_index(), 0);
    }

    #[test]
    fn test_horizontal_arrival_ignores_height() {
        let mut plan = PatrolPlan::new(line(2), PatrolStyle::Loop);
        plan.advance(Vec2::new(0.05, 3.0), false, Arrival::Horizontal);
        assert_eq!(plan.current_index(), 1);
    }

    #[test]
    fn test_ledge_reverses_immediately() {
        let mut plan = PatrolPlan::new(line(3), PatrolStyle::PingPong);
        let here = plan.current_target().unwrap();
        plan.advance(here, false, Arrival::Planar);
        assert_eq!(plan.current_index(), 1);

        // Heading for index 1 from far away, ledge ahead
        let target = plan.advance(Vec2::new(-10.0, 0.0), true, Arrival::Planar);
        assert!(!plan.is_moving_forward());
        assert_eq!(plan.current_index(), 0);
        assert_eq!(target, Some(Vec2::ZERO));
    }

    #[test]
    fn test_ledge_on_first_leg_heads_away_from_it() {
        let mut plan = PatrolPlan::new(line(3), PatrolStyle::PingPong);

        // Walking toward index 0 from its far side with a drop ahead
        let target = plan.advance(Vec2::new(-10.0, 0.0), true, Arrival::Planar);
        assert_eq!(plan.current_index(), 1);
        assert_eq!(target, Some(Vec2::new(4.0, 0.0)));
        assert!(plan.is_moving_forward());

        // The walk carries on to the far end instead of back to the ledge
        plan.advance(Vec2::new(4.0, 0.0), false, Arrival::Planar);
        assert_eq!(plan.current_index(), 2);
    }

    #[test]
    fn test_ledge_reverses_loop() {
        let mut plan = PatrolPlan::new(line(3), PatrolStyle::Loop);
        plan.advance(Vec2::new(-10.0, 0.0), true, Arrival::Planar);
        assert_eq!(plan.current_index(), 2);
        assert!(!plan.is_moving_forward());
    }
}
