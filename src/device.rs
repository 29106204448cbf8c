//! The Finch programming interface shared with the physical robot.
//!
//! Only motion has simulated behaviour. Lights, sound and sensors exist so that
//! programs written for the real Finch run unchanged; the simulator answers
//! them with neutral readings.

use crate::command::{Command, Move, Turn};

/// Operations a Finch program may issue.
pub trait FinchDevice {
    /// Drives straight for `distance_cm` at `speed_cm_s`.
    fn set_move(&mut self, direction: Move, distance_cm: f64, speed_cm_s: f64);

    /// Pivots in place by `degrees` at `deg_per_s`.
    fn set_turn(&mut self, direction: Turn, degrees: f64, deg_per_s: f64);

    /// Drives each wheel at its own speed for `duration` seconds.
    /// Without a duration nothing happens.
    fn wheels(&mut self, left_cm_s: f64, right_cm_s: f64, duration: Option<f64>);

    /// Sets the beak LED colour.
    fn set_beak(&mut self, r: u8, g: u8, b: u8);

    /// Sets one tail LED (or all of them) to a colour.
    fn set_tail(&mut self, position: u8, r: u8, g: u8, b: u8);

    /// Sets every LED to one colour.
    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.set_beak(r, g, b);
        self.set_tail(0, r, g, b);
    }

    /// Plays a tone on the buzzer.
    fn play_tone(&mut self, freq_hz: u32, duration_s: f64);

    /// Stops motors, lights and sound.
    fn stop_all(&mut self);

    /// Distance to the nearest obstacle (cm).
    fn get_distance(&self) -> f64;

    /// Left and right line sensor readings.
    fn get_line(&self) -> (u8, u8);

    /// Left and right light sensor readings.
    fn get_light(&self) -> (f64, f64);

    /// Board temperature (°C).
    fn get_temperature(&self) -> f64;

    /// Roll, pitch and yaw (deg).
    fn get_orientation(&self) -> (f64, f64, f64);

    /// Acceleration along x, y, z (m/s²).
    fn get_acceleration(&self) -> (f64, f64, f64);

    /// Executes a parsed script command.
    fn run(&mut self, command: &Command) {
        match *command {
            Command::Move {
                direction,
                distance,
                speed,
            } => self.set_move(direction, distance, speed),
            Command::Turn {
                direction,
                degrees,
                rate,
            } => self.set_turn(direction, degrees, rate),
            Command::Wheels {
                left,
                right,
                duration,
            } => self.wheels(left, right, duration),
            Command::Stop => self.stop_all(),
        }
    }
}
