//! The simulated Finch: integrates motion commands into a pose and a traced
//! path, and draws the path once when it is closed or dropped.

use finch_kinematics::{DifferentialDrive, Point, Pose, SAMPLE_STEP_S, WheelSpeeds};
use finch_render::{OutputPaths, Renderer};
use tracing::{debug, info, warn};

use crate::command::{Move, Turn, WheelCommand, plan_move, plan_turn};
use crate::config::SimConfig;
use crate::device::FinchDevice;
use crate::display::{DisplaySurface, MimeBundle, MimeType, wanted};

/// A simulated Finch with its pen always down.
///
/// The path starts at the origin and only ever grows. Rendering happens at most
/// once per robot, on [`Finch::close`] or when the value is dropped, whichever
/// comes first; failures are logged and never reach the caller.
#[derive(Debug)]
pub struct Finch {
    drive: DifferentialDrive,
    pose: Pose,
    path: Vec<Point>,
    outputs: OutputPaths,
    renderer: Renderer,
    closed: bool,
}

impl Finch {
    /// A robot configured from the environment.
    ///
    /// Configuration errors are logged and the defaults are used instead.
    pub fn new() -> Self {
        let config = SimConfig::from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Invalid simulator configuration, using defaults");
            SimConfig::default()
        });
        Self::from_config(&config)
    }

    /// A robot writing to the destinations in `config`.
    pub fn from_config(config: &SimConfig) -> Self {
        Finch {
            drive: DifferentialDrive::finch(),
            pose: Pose::default(),
            path: vec![Point::default()],
            outputs: config.outputs(),
            renderer: Renderer::new(),
            closed: false,
        }
    }

    /// Replaces the renderer, e.g. to install another raster backend.
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Current pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Every sampled point so far, starting with the origin.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Where the drawings go.
    pub fn outputs(&self) -> &OutputPaths {
        &self.outputs
    }

    /// Whether the one-shot render has already been triggered.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn advance(&mut self, speeds: WheelSpeeds, duration: f64) {
        if !(duration > 0.0 && duration.is_finite()) {
            return;
        }
        let steps = match self.drive.integrate(self.pose, speeds, duration, SAMPLE_STEP_S) {
            Ok(steps) => steps,
            Err(e) => {
                warn!(error = %e, "Ignoring motion");
                return;
            }
        };
        debug!(
            wheels = %speeds,
            chassis = %steps.chassis_speeds(),
            duration,
            substeps = steps.len(),
            "Integrating motion"
        );

        let mut pose = self.pose;
        for next in steps {
            self.path.push(next.position());
            pose = next;
        }
        self.pose = pose;
        debug!(pose = %self.pose, points = self.path.len(), "Motion complete");
    }

    fn execute(&mut self, plan: Option<WheelCommand>) {
        if let Some(WheelCommand { speeds, duration }) = plan {
            self.advance(speeds, duration);
        }
    }

    /// Draws the path now. Later calls, and the drop, do nothing.
    pub fn close(&mut self) {
        self.render_once();
    }

    fn render_once(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if self.path.len() < 2 {
            debug!("Robot never moved, nothing to draw");
            return;
        }
        match self.renderer.write_files(&self.path, &self.outputs) {
            Ok(report) => info!(
                svg = report.svg_written,
                png = report.png_written,
                "Rendered Finch drawing"
            ),
            Err(e) => warn!(error = %e, "Could not save Finch drawing"),
        }
    }

    /// The drawing as SVG text.
    pub fn to_vector_text(&self) -> String {
        self.renderer.vector_text(&self.path).unwrap_or_else(|e| {
            warn!(error = %e, "Could not build SVG");
            String::new()
        })
    }

    /// The drawing as PNG bytes, or `None` without a raster backend.
    pub fn to_raster_bytes(&self) -> Option<Vec<u8>> {
        self.renderer.raster_bytes(&self.path).unwrap_or_else(|e| {
            warn!(error = %e, "Could not rasterize drawing");
            None
        })
    }

    /// Every available representation passing the `include`/`exclude` filters.
    pub fn mime_bundle(
        &self,
        include: Option<&[MimeType]>,
        exclude: Option<&[MimeType]>,
    ) -> MimeBundle {
        let svg = wanted(MimeType::Svg, include, exclude).then(|| self.to_vector_text());
        let png = if wanted(MimeType::Png, include, exclude) {
            self.to_raster_bytes()
        } else {
            None
        };
        MimeBundle::new(svg, png)
    }

    /// Pushes the drawing to `surface`. Failures are logged and ignored.
    pub fn show(&self, surface: &mut dyn DisplaySurface) {
        let accepted = surface.accepts().to_vec();
        let bundle = self.mime_bundle(Some(accepted.as_slice()), None);
        if bundle.is_empty() {
            debug!("Nothing the display surface can show");
            return;
        }
        if let Err(e) = surface.display(bundle) {
            warn!(error = %e, "Display surface rejected the drawing");
        }
    }
}

impl Default for Finch {
    fn default() -> Self {
        Finch::new()
    }
}

impl Drop for Finch {
    fn drop(&mut self) {
        self.render_once();
    }
}

impl FinchDevice for Finch {
    fn set_move(&mut self, direction: Move, distance_cm: f64, speed_cm_s: f64) {
        self.execute(plan_move(direction, distance_cm, speed_cm_s));
    }

    fn set_turn(&mut self, direction: Turn, degrees: f64, deg_per_s: f64) {
        self.execute(plan_turn(&self.drive, direction, degrees, deg_per_s));
    }

    fn wheels(&mut self, left_cm_s: f64, right_cm_s: f64, duration: Option<f64>) {
        if let Some(duration) = duration {
            self.advance(WheelSpeeds::new(left_cm_s, right_cm_s), duration);
        }
    }

    fn set_beak(&mut self, _r: u8, _g: u8, _b: u8) {}

    fn set_tail(&mut self, _position: u8, _r: u8, _g: u8, _b: u8) {}

    fn play_tone(&mut self, _freq_hz: u32, _duration_s: f64) {}

    fn stop_all(&mut self) {}

    fn get_distance(&self) -> f64 {
        0.0
    }

    fn get_line(&self) -> (u8, u8) {
        (0, 0)
    }

    fn get_light(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    fn get_temperature(&self) -> f64 {
        20.0
    }

    fn get_orientation(&self) -> (f64, f64, f64) {
        (0.0, 0.0, 0.0)
    }

    fn get_acceleration(&self) -> (f64, f64, f64) {
        (0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-6;

    fn quiet() -> Finch {
        Finch::from_config(&SimConfig::default()).with_renderer(Renderer::vector_only())
    }

    fn disarm(mut finch: Finch) {
        // keep tests from writing into the working directory
        finch.closed = true;
    }

    #[test]
    fn test_starts_at_origin() {
        let finch = quiet();
        assert_eq!(finch.pose(), Pose::default());
        assert_eq!(finch.path(), &[Point::default()]);
        assert!(!finch.is_closed());
        disarm(finch);
    }

    #[test]
    fn test_move_samples_every_substep() {
        let mut finch = quiet();
        finch.set_move(Move::Forward, 1.0, 10.0); // 0.1 s
        let n = finch.path().len() - 1;
        assert!((5..=6).contains(&n), "{n} substeps");
        for pair in finch.path().windows(2) {
            assert!(pair[1].x > pair[0].x);
            assert_eq!(pair[1].y, 0.0);
        }
        assert!((finch.pose().x - 1.0).abs() < EPSILON);
        disarm(finch);
    }

    #[test]
    fn test_wheels_without_duration_is_noop() {
        let mut finch = quiet();
        finch.wheels(10.0, 5.0, None);
        finch.wheels(10.0, 5.0, Some(0.0));
        finch.wheels(10.0, 5.0, Some(-2.0));
        finch.wheels(10.0, 5.0, Some(f64::NAN));
        assert_eq!(finch.path().len(), 1);
        assert_eq!(finch.pose(), Pose::default());
        disarm(finch);
    }

    #[test]
    fn test_unbounded_motion_is_ignored() {
        let mut finch = quiet();
        finch.wheels(10.0, 10.0, Some(1e12));
        assert_eq!(finch.path().len(), 1);
        assert_eq!(finch.pose(), Pose::default());
        disarm(finch);
    }

    #[test]
    fn test_wheels_trace_an_arc() {
        let mut finch = quiet();
        // v = 10 cm/s, ω = 1 rad/s for a quarter turn
        finch.wheels(5.0, 15.0, Some(PI / 2.0));
        let pose = finch.pose();
        assert!((pose.x - 10.0).abs() < EPSILON);
        assert!((pose.y - 10.0).abs() < EPSILON);
        assert!((pose.theta - PI / 2.0).abs() < EPSILON);
        assert!(finch.path().len() > 50);
        disarm(finch);
    }

    #[test]
    fn test_sensor_stubs_are_neutral() {
        let mut finch = quiet();
        finch.set_led(255, 0, 0);
        finch.set_tail(2, 0, 255, 0);
        finch.play_tone(440, 0.5);
        finch.stop_all();
        assert_eq!(finch.get_distance(), 0.0);
        assert_eq!(finch.get_line(), (0, 0));
        assert_eq!(finch.get_light(), (0.0, 0.0));
        assert_eq!(finch.get_temperature(), 20.0);
        assert_eq!(finch.get_orientation(), (0.0, 0.0, 0.0));
        assert_eq!(finch.get_acceleration(), (0.0, 0.0, 0.0));
        assert_eq!(finch.path().len(), 1);
        disarm(finch);
    }
}
