#![warn(missing_docs)]
//! Finch drawing simulator.
//!
//! Issue move and turn commands to a simulated two-wheeled Finch; the traced
//! path is written as SVG (and PNG when a raster backend is available) once
//! the robot is closed or dropped.
//!
//! ```no_run
//! use finch_sim::{Finch, FinchDevice, Move, Turn};
//!
//! let mut finch = Finch::new();
//! finch.set_move(Move::Forward, 20.0, 10.0);
//! finch.set_turn(Turn::Left, 90.0, 30.0);
//! finch.close();
//! ```

pub mod command;
pub mod config;
pub mod device;
pub mod display;
pub mod error;
pub mod robot;

pub use command::{Command, Move, Turn, WheelCommand, parse_script, plan_move, plan_turn};
pub use config::SimConfig;
pub use device::FinchDevice;
pub use display::{DisplaySurface, MimeBundle, MimeData, MimeType};
pub use error::{DisplayError, ParseCommandError, ScriptError, UnknownMimeType};
pub use robot::Finch;

pub use finch_kinematics::{DifferentialDrive, FINCH_WHEELBASE_CM, Point, Pose, WheelSpeeds};
pub use finch_render::{OutputPaths, RenderError, Rasterizer, Renderer, ViewBox};
