use crate::graphics::Rgb;

/// A point or direction in 3D space
pub type Vec3 = [f64; 3];

/// Row-major 3x3 matrix
pub type Mat3 = [[f64; 3]; 3];

pub const IDENTITY: Mat3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &Mat3, vector: &Vec3) -> Vec3 {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Rotation about the Y axis, angle in degrees
pub fn rotation_y(degrees: f64) -> Mat3 {
    let (s, c) = degrees.to_radians().sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

/// Rotation about the Z axis, angle in degrees
pub fn rotation_z(degrees: f64) -> Mat3 {
    let (s, c) = degrees.to_radians().sin_cos();
    [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
}

pub fn add(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(v: &Vec3, s: f64) -> Vec3 {
    [v[0] * s, v[1] * s, v[2] * s]
}

pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(u: &Vec3, v: &Vec3) -> Vec3 {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

pub fn length(v: &Vec3) -> f64 {
    dot(v, v).sqrt()
}

/// Normalizes a vector, leaving degenerate (zero-length) vectors at zero
pub fn normalize(v: &Vec3) -> Vec3 {
    let len = length(v);
    if len <= f64::EPSILON {
        [0.0; 3]
    } else {
        scale(v, 1.0 / len)
    }
}

/// Linear interpolation between two points
pub fn lerp(a: &Vec3, b: &Vec3, t: f64) -> Vec3 {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Calculates the normal vector of a triangle
pub fn calculate_normal(a: &Vec3, b: &Vec3, c: &Vec3) -> Vec3 {
    normalize(&cross(&sub(b, a), &sub(c, a)))
}

/// Wraps `value` into `[0, period)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly `period`, so
/// that case folds back to zero.
pub fn wrap(value: f64, period: f64) -> f64 {
    let wrapped = value.rem_euclid(period);
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// A directional light, pointing from the scene towards the light
#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub direction: Vec3,
    pub diffuse: f64,
}

/// Calculates the light intensity of a surface with the given normal.
///
/// Lighting is two-sided: the normal is flipped to face the viewer first.
pub fn calculate_light_intensity(
    normal: &Vec3,
    to_viewer: &Vec3,
    lights: &[Light],
    ambient: f64,
) -> f64 {
    let normal = if dot(normal, to_viewer) < 0.0 {
        scale(normal, -1.0)
    } else {
        *normal
    };
    lights.iter().fold(ambient, |acc, light| {
        let light_dir = normalize(&light.direction);
        acc + light.diffuse * dot(&normal, &light_dir).max(0.0)
    })
}

/// Applies lighting to a color
pub fn apply_lighting(color: Rgb, intensity: f64) -> Rgb {
    let r = (color.r as f64 * intensity).min(255.0) as u8;
    let g = (color.g as f64 * intensity).min(255.0) as u8;
    let b = (color.b as f64 * intensity).min(255.0) as u8;
    Rgb::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-9, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn rotation_y_quarter_turn_maps_x_to_minus_z() {
        let v = multiply_matrix_vector(&rotation_y(90.0), &[1.0, 0.0, 0.0]);
        assert_vec_eq(v, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn rotation_z_quarter_turn_maps_x_to_y() {
        let v = multiply_matrix_vector(&rotation_z(90.0), &[1.0, 0.0, 0.0]);
        assert_vec_eq(v, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn matrix_product_composes_rotations() {
        let combined = multiply_matrices(&rotation_z(30.0), &rotation_z(60.0));
        let v = multiply_matrix_vector(&combined, &[1.0, 0.0, 0.0]);
        assert_vec_eq(v, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn normal_of_counter_clockwise_triangle_points_up() {
        let n = calculate_normal(&[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0], &[1.0, 0.0, 0.0]);
        assert_vec_eq(n, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn degenerate_normal_is_zero() {
        let n = calculate_normal(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]);
        assert_vec_eq(n, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn wrap_stays_in_half_open_range() {
        assert_eq!(wrap(-1e-18, 360.0), 0.0);
        assert!((wrap(-30.0, 360.0) - 330.0).abs() < 1e-9);
        assert!((wrap(725.0, 360.0) - 5.0).abs() < 1e-9);
        assert_eq!(wrap(360.0, 360.0), 0.0);
    }

    #[test]
    fn lighting_is_two_sided() {
        let lights = [Light {
            direction: [0.0, 1.0, 0.0],
            diffuse: 0.5,
        }];
        let up = calculate_light_intensity(&[0.0, 1.0, 0.0], &[0.0, 1.0, 0.0], &lights, 0.3);
        let flipped = calculate_light_intensity(&[0.0, -1.0, 0.0], &[0.0, 1.0, 0.0], &lights, 0.3);
        assert!((up - 0.8).abs() < 1e-9);
        assert!((flipped - 0.8).abs() < 1e-9);
    }

    #[test]
    fn apply_lighting_saturates() {
        let lit = apply_lighting(Rgb::new(200, 100, 0), 2.0);
        assert_eq!(lit, Rgb::new(255, 200, 0));
    }
}
