//! Load a spline from JSON and print samples along it.
//!
//! The input is a serialized `CatmullSpline`, for example:
//!
//! ```json
//! {
//!     "vertices": [
//!         { "p": { "x": 0.0, "y": 0.0, "z": 0.0 } },
//!         { "p": { "x": 4.0, "y": 3.0, "z": 0.0 } },
//!         { "p": { "x": 8.0, "y": 0.0, "z": 1.0 }, "t": 12.0 }
//!     ],
//!     "closed": false
//! }
//! ```
//!
//! Each output line is `u  position  velocity  acceleration`.

use catmull_spline::CatmullSpline;

const N_SAMPLES: usize = 20;

fn main() {
    env_logger::init();
    let path = std::env::args().nth(1).expect("needs filename");
    let data = std::fs::read_to_string(path).unwrap();
    let mut spline: CatmullSpline = serde_json::from_str(&data).unwrap();
    if let Err(e) = spline.rebuild() {
        eprintln!("invalid spline: {}", e);
        std::process::exit(1);
    }
    let range = spline.max_t() - spline.min_t();
    for i in 0..=N_SAMPLES {
        let u = spline.clamp_parameter(spline.min_t() + range * (i as f64 / N_SAMPLES as f64));
        match (spline.position(u), spline.velocity(u), spline.acceleration(u)) {
            (Ok(p), Ok(v), Ok(a)) => println!(
                "{:8.3}  ({:.3}, {:.3}, {:.3})  ({:.3}, {:.3}, {:.3})  ({:.3}, {:.3}, {:.3})",
                u, p.x, p.y, p.z, v.x, v.y, v.z, a.x, a.y, a.z
            ),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => eprintln!("{}: {}", u, e),
        }
    }
}
