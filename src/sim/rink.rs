//! Rink geometry
//!
//! The rink is centered on the origin. `x` runs along the long axis (goals sit
//! on the short walls at `x = ±half_width`), `y` along the short axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which team a paddle or goal belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Defends the left goal (x < 0)
    Home,
    /// Defends the right goal (x > 0)
    Away,
}

impl Side {
    /// Sign of x on this side's half (its own goal lies that way)
    #[inline]
    pub fn goal_sign(self) -> f32 {
        match self {
            Side::Home => -1.0,
            Side::Away => 1.0,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Where the puck center must be to count as inside the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GoalLine {
    /// Center has fully cleared the wall plane (`|x| > half_width`)
    WallPlane,
    /// Center is past the point where the puck would touch the wall, so a
    /// puck in the mouth never rests beyond the playable area
    #[default]
    Boundary,
}

/// Static rink configuration, shared read-only by all systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RinkGeometry {
    pub half_width: f32,
    pub half_height: f32,
    pub goal_mouth_half_width: f32,
    /// Depth of the net behind the goal line (presentation only)
    pub goal_depth: f32,
    pub puck_radius: f32,
    pub paddle_radius: f32,
    pub wall_buffer: f32,
    /// Paddle distance kept from the boards
    pub paddle_margin: f32,
    /// Paddle distance kept from the center line
    pub center_margin: f32,
    pub goal_line: GoalLine,
}

impl Default for RinkGeometry {
    fn default() -> Self {
        Self {
            half_width: RINK_WIDTH / 2.0,
            half_height: RINK_HEIGHT / 2.0,
            goal_mouth_half_width: GOAL_MOUTH_HALF_WIDTH,
            goal_depth: GOAL_DEPTH,
            puck_radius: PUCK_RADIUS,
            paddle_radius: PADDLE_RADIUS,
            wall_buffer: WALL_BUFFER,
            paddle_margin: PADDLE_MARGIN,
            center_margin: CENTER_MARGIN,
            goal_line: GoalLine::Boundary,
        }
    }
}

impl RinkGeometry {
    /// Every derived range is non-empty, so clamping against it cannot panic
    pub fn is_consistent(&self) -> bool {
        let values = [
            self.half_width,
            self.half_height,
            self.goal_mouth_half_width,
            self.goal_depth,
            self.puck_radius,
            self.paddle_radius,
            self.wall_buffer,
            self.paddle_margin,
            self.center_margin,
        ];
        values.iter().all(|v| v.is_finite() && *v >= 0.0)
            && self.puck_radius > 0.0
            && self.paddle_radius > 0.0
            && self.puck_limit_x() > 0.0
            && self.puck_limit_y() > 0.0
            && self.paddle_margin <= self.half_height
            && self.center_margin <= self.half_width - self.paddle_margin
    }

    /// Center distance at which puck and paddle touch
    #[inline]
    pub fn collision_distance(&self) -> f32 {
        self.puck_radius + self.paddle_radius
    }

    /// Furthest the puck center may travel along x before hitting a solid wall
    #[inline]
    pub fn puck_limit_x(&self) -> f32 {
        self.half_width - self.puck_radius - self.wall_buffer
    }

    /// Furthest the puck center may travel along y
    #[inline]
    pub fn puck_limit_y(&self) -> f32 {
        self.half_height - self.puck_radius - self.wall_buffer
    }

    /// |x| the puck center must strictly exceed to be in a goal
    pub fn goal_line_x(&self) -> f32 {
        match self.goal_line {
            GoalLine::WallPlane => self.half_width,
            GoalLine::Boundary => self.puck_limit_x(),
        }
    }

    /// Whether a short-axis coordinate lies inside the goal mouth
    #[inline]
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        y.abs() < self.goal_mouth_half_width
    }

    /// Long-axis range a paddle of `side` is confined to
    pub fn paddle_x_range(&self, side: Side) -> (f32, f32) {
        let outer = self.half_width - self.paddle_margin;
        match side {
            Side::Home => (-outer, -self.center_margin),
            Side::Away => (self.center_margin, outer),
        }
    }

    /// Short-axis range any paddle is confined to
    pub fn paddle_y_range(&self) -> (f32, f32) {
        let limit = self.half_height - self.paddle_margin;
        (-limit, limit)
    }

    /// Which half a long-axis coordinate lies on (center belongs to neither)
    pub fn half_of(&self, x: f32) -> Option<Side> {
        if x < 0.0 {
            Some(Side::Home)
        } else if x > 0.0 {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Clamp a point to the puck's reachable area
    pub fn clamp_to_ice(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(-self.puck_limit_x(), self.puck_limit_x()),
            p.y.clamp(-self.puck_limit_y(), self.puck_limit_y()),
        )
    }
}
