#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for the Finch differential-drive simulator."]
#![doc = ""]
#![doc = "This crate provides the robot pose, forward and inverse kinematics, and a"]
#![doc = "closed-form arc integrator that samples a trajectory at a fixed time step."]

use core::f64::consts::PI;
use core::fmt;
use libm::{ceil, cos, fabs, sin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::KinematicsError;

/// Distance between the Finch's wheel contact points (cm).
pub const FINCH_WHEELBASE_CM: f64 = 10.0;

/// Sampling step (s) used when turning a motion into trajectory points.
pub const SAMPLE_STEP_S: f64 = 0.02;

/// Angular speeds (rad/s) below this are integrated as straight lines.
pub const STRAIGHT_LINE_EPSILON: f64 = 1e-9;

// Linear speeds at or below this produce a zero turning radius.
const STATIONARY_EPSILON: f64 = 1e-12;

/// Upper bound on the substeps of one integration, about 23 hours of motion at
/// [`SAMPLE_STEP_S`].
pub const MAX_SUBSTEPS: usize = 1 << 22;

/// A point on the traced path, in centimeters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// World-frame x position (cm).
    pub x: f64,
    /// World-frame y position (cm), increasing "up".
    pub y: f64,
}

impl Point {
    /// Construct a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// A 2‑D pose `(x, y, θ)` in centimeters and radians (θ measured counter‑clockwise
/// from the x‑axis in the world frame).
///
/// The heading is unbounded: integration accumulates it without wrapping, so a
/// full left pivot leaves `theta` at `2π` rather than `0`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// World‑frame x position (cm).
    pub x: f64,
    /// World‑frame y position (cm).
    pub y: f64,
    /// Heading (rad), `0` facing +X.
    pub theta: f64,
}

impl Pose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `x`: World-frame x position in centimeters.
    /// * `y`: World-frame y position in centimeters.
    /// * `theta`: Heading in radians.
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Pose { x, y, theta }
    }

    /// The position part of the pose.
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Normalize an angle to be within `[-PI, PI)`.
    ///
    /// Angles at `PI` will be normalized to `-PI`. Integration never calls this;
    /// it is meant for comparing headings modulo a full turn.
    pub fn normalize_angle(angle: f64) -> f64 {
        let a = angle % (2.0 * PI);
        if a >= PI {
            a - 2.0 * PI
        } else if a < -PI {
            a + 2.0 * PI
        } else {
            a
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.2} cm, y: {:.2} cm, θ: {:.2} rad)", self.x, self.y, self.theta)
    }
}

/// Left and right wheel linear speeds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSpeeds {
    /// Left wheel speed (cm/s).
    pub left: f64,
    /// Right wheel speed (cm/s).
    pub right: f64,
}

impl WheelSpeeds {
    /// Construct wheel speeds.
    ///
    /// # Arguments
    ///
    /// * `left`: Left wheel linear speed (cm/s).
    /// * `right`: Right wheel linear speed (cm/s).
    pub const fn new(left: f64, right: f64) -> Self {
        WheelSpeeds { left, right }
    }
}

impl fmt::Display for WheelSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(L: {:.2} cm/s, R: {:.2} cm/s)", self.left, self.right)
    }
}

/// Linear and angular chassis velocities.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChassisSpeeds {
    /// Linear speed of the chassis center (cm/s).
    pub v: f64,
    /// Angular speed of the chassis (rad/s).
    pub omega: f64,
}

impl ChassisSpeeds {
    /// Construct chassis speeds.
    ///
    /// # Arguments
    ///
    /// * `v`: Linear speed of the chassis center (cm/s).
    /// * `omega`: Angular speed of the chassis (rad/s).
    pub const fn new(v: f64, omega: f64) -> Self {
        ChassisSpeeds { v, omega }
    }
}

impl fmt::Display for ChassisSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(v: {:.2} cm/s, ω: {:.2} rad/s)", self.v, self.omega)
    }
}

/// Differential‑drive kinematics helper.
///
/// Wheel speeds are linear (cm/s at the contact patch), so the only physical
/// parameter is the wheelbase.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialDrive {
    /// Wheelbase (cm).
    wheelbase: f64,
}

impl DifferentialDrive {
    /// Construct a new differential‑drive kinematics helper.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidWheelbase)` if `wheelbase` is not positive.
    pub const fn new(wheelbase: f64) -> Result<Self, KinematicsError> {
        if !(wheelbase > 0.0) {
            return Err(KinematicsError::InvalidWheelbase("must be positive"));
        }
        Ok(DifferentialDrive { wheelbase })
    }

    /// The Finch's fixed geometry.
    pub const fn finch() -> Self {
        DifferentialDrive {
            wheelbase: FINCH_WHEELBASE_CM,
        }
    }

    /// Returns the wheelbase.
    pub fn wheelbase(&self) -> f64 {
        self.wheelbase
    }

    /// Calculates the chassis speeds produced by the given wheel speeds.
    pub fn forward_kinematics(&self, wheel_speeds: WheelSpeeds) -> ChassisSpeeds {
        let v = (wheel_speeds.left + wheel_speeds.right) / 2.0;
        let omega = (wheel_speeds.right - wheel_speeds.left) / self.wheelbase;
        ChassisSpeeds::new(v, omega)
    }

    /// Calculates the wheel speeds required to achieve the given chassis speeds.
    pub fn inverse_kinematics(&self, chassis_speeds: ChassisSpeeds) -> WheelSpeeds {
        let half_track = self.wheelbase / 2.0;
        WheelSpeeds::new(
            chassis_speeds.v - chassis_speeds.omega * half_track,
            chassis_speeds.v + chassis_speeds.omega * half_track,
        )
    }

    /// Advances `pose` by one substep of length `h` at constant chassis speeds.
    ///
    /// Uses the exact arc solution, so a constant twist lands on the true circle
    /// no matter how coarse the step is. Below [`STRAIGHT_LINE_EPSILON`] the
    /// motion is treated as a straight line and the heading is left untouched.
    pub fn arc_step(&self, pose: Pose, chassis_speeds: ChassisSpeeds, h: f64) -> Pose {
        let ChassisSpeeds { v, omega } = chassis_speeds;
        if fabs(omega) < STRAIGHT_LINE_EPSILON {
            return Pose {
                x: pose.x + v * h * cos(pose.theta),
                y: pose.y + v * h * sin(pose.theta),
                theta: pose.theta,
            };
        }

        let theta = pose.theta + omega * h;
        let radius = if fabs(v) > STATIONARY_EPSILON { v / omega } else { 0.0 };
        Pose {
            x: pose.x + radius * (sin(theta) - sin(pose.theta)),
            y: pose.y - radius * (cos(theta) - cos(pose.theta)),
            theta,
        }
    }

    /// Integrates constant wheel speeds over `duration` seconds.
    ///
    /// The duration is split into `max(1, ceil(duration / sample_step))` equal
    /// substeps and the returned iterator yields the pose after each of them.
    /// A zero duration yields nothing.
    ///
    /// # Errors
    ///
    /// Returns `Err(KinematicsError::InvalidTimeDelta)` if `duration` is negative or not finite.
    /// Returns `Err(KinematicsError::TooManySubsteps)` if `duration` would need more than
    /// [`MAX_SUBSTEPS`] substeps.
    /// Returns `Err(KinematicsError::InvalidSampleStep)` if `sample_step` is not positive.
    pub fn integrate(
        &self,
        start: Pose,
        wheel_speeds: WheelSpeeds,
        duration: f64,
        sample_step: f64,
    ) -> Result<Integration, KinematicsError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(KinematicsError::InvalidTimeDelta("must be finite and non-negative"));
        }
        if !(sample_step > 0.0) {
            return Err(KinematicsError::InvalidSampleStep("must be positive"));
        }

        let steps = if duration == 0.0 {
            0
        } else {
            let n = ceil(duration / sample_step);
            if n > MAX_SUBSTEPS as f64 {
                return Err(KinematicsError::TooManySubsteps(MAX_SUBSTEPS));
            }
            if n < 1.0 { 1 } else { n as usize }
        };
        let h = if steps == 0 { 0.0 } else { duration / steps as f64 };

        Ok(Integration {
            drive: *self,
            chassis_speeds: self.forward_kinematics(wheel_speeds),
            pose: start,
            h,
            remaining: steps,
        })
    }
}

impl Default for DifferentialDrive {
    fn default() -> Self {
        DifferentialDrive::finch()
    }
}

impl fmt::Display for DifferentialDrive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DifferentialDrive (wheelbase: {:.2} cm)", self.wheelbase)
    }
}

/// Substep iterator returned by [`DifferentialDrive::integrate`].
#[derive(Debug, Clone)]
pub struct Integration {
    drive: DifferentialDrive,
    chassis_speeds: ChassisSpeeds,
    pose: Pose,
    h: f64,
    remaining: usize,
}

impl Integration {
    /// Length of each substep (s).
    pub fn step(&self) -> f64 {
        self.h
    }

    /// Chassis speeds held constant over the whole integration.
    pub fn chassis_speeds(&self) -> ChassisSpeeds {
        self.chassis_speeds
    }
}

impl Iterator for Integration {
    type Item = Pose;

    fn next(&mut self) -> Option<Pose> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.pose = self.drive.arc_step(self.pose, self.chassis_speeds, self.h);
        Some(self.pose)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Integration {}
