//! A simple test program that creates a random closed spline.
//!
//! This builds a loop through a sequence of random 3D points and outputs
//! an SVG of its projection onto the x/y plane.

use rand::distributions::{Distribution, Uniform};

use catmull_spline::{CatmullSpline, Vector3};

fn main() {
    env_logger::init();
    let mut rng = rand::thread_rng();
    const N: usize = 10;
    let pts = (0..N)
        .map(|_| {
            let x = Uniform::from(0.0..500.0).sample(&mut rng);
            let y = Uniform::from(0.0..500.0).sample(&mut rng);
            let z = Uniform::from(0.0..50.0).sample(&mut rng);
            Vector3::new(x, y, z)
        })
        .collect::<Vec<_>>();
    let mut spline = CatmullSpline::new();
    for pt in &pts {
        spline.add_control_vertex(*pt);
    }
    if let Err(e) = spline.construct_loop() {
        eprintln!("could not build spline: {}", e);
        std::process::exit(1);
    }
    eprintln!("domain: [{}, {})", spline.min_t(), spline.max_t());
    let path = match spline.render_xy() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("could not render spline: {}", e);
            std::process::exit(1);
        }
    };
    println!(
        r##"<!DOCTYPE html>
<html>
    <body>
    <svg height="500" width="500">
      <path d="{}" fill="none" stroke="#000" />"##,
        path.to_svg()
    );
    for pt in &pts {
        println!(
            r#"      <circle cx="{}" cy="{}" r="3" fill="blue" />"#,
            pt.x, pt.y
        )
    }
    println!(
        r#"    </svg>
    </body>
</html>"#
    );
}
