use core::f64::consts::FRAC_PI_2;

use finch_kinematics::*;

fn main() {
    let drive = DifferentialDrive::finch();
    let forward = WheelSpeeds::new(10.0, 10.0); // 10 cm/s straight ahead
    let pivot = drive.inverse_kinematics(ChassisSpeeds::new(0.0, FRAC_PI_2)); // 90°/s in place

    let mut current_pose = Pose::default();

    println!("Initializing simulation...");
    println!("  {}", drive);
    println!("  Forward wheels: {}", forward);
    println!("  Pivot wheels:   {}", pivot);
    println!("  Sample step:    {} s", SAMPLE_STEP_S);
    println!();

    for side in 0..4 {
        for (label, wheels) in [("edge", forward), ("corner", pivot)] {
            match drive.integrate(current_pose, wheels, 1.0, SAMPLE_STEP_S) {
                Ok(steps) => {
                    let n = steps.len();
                    if let Some(end) = steps.last() {
                        current_pose = end;
                    }
                    println!("Side {} {:<6} ({:>2} substeps): {}", side + 1, label, n, current_pose);
                }
                Err(e) => {
                    eprintln!("Error while integrating side {}: {}", side + 1, e);
                    return;
                }
            }
        }
    }

    println!();
    println!("Simulation complete.");
    println!("Final Pose: {:?}", current_pose);
    println!(
        "Heading modulo a full turn: {:.3} rad",
        Pose::normalize_angle(current_pose.theta)
    );
}
