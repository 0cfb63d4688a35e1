//! Small 3D math helpers shared by the interaction systems.
//!
//! Rotations follow a right-handed, Y-up convention: a positive yaw turns +X
//! toward −Z, a positive pitch turns +Y toward +Z.

use raylib::math::Vector3;

/// Rotate `v` around the Y axis by `angle` radians.
pub fn rotate_y(v: Vector3, angle: f32) -> Vector3 {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(v.x * cos + v.z * sin, v.y, -v.x * sin + v.z * cos)
}

/// Rotate `v` around the X axis by `angle` radians.
pub fn rotate_x(v: Vector3, angle: f32) -> Vector3 {
    let (sin, cos) = angle.sin_cos();
    Vector3::new(v.x, v.y * cos - v.z * sin, v.y * sin + v.z * cos)
}

/// Length of the XZ projection of `v`.
pub fn planar_length(v: Vector3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Wrap an angle into the half-open interval (−π, π].
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    angle %= TAU;
    if angle > PI {
        angle -= TAU;
    } else if angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Distance along a normalized ray to the first intersection with a sphere.
///
/// Returns `None` when the ray misses or the sphere lies entirely behind the
/// origin. A ray starting inside the sphere reports the exit distance.
pub fn ray_sphere(origin: Vector3, dir: Vector3, center: Vector3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}
