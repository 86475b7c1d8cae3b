use crate::aerofoil::Naca4;
use crate::graphics::Rgb;
use crate::math::{
    add, cross, multiply_matrices, multiply_matrix_vector, normalize, rotation_z, scale, sub, Mat3,
    Vec3, IDENTITY,
};
use std::f64::consts::TAU;

/// A colored triangle in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub vertices: [Vec3; 3],
    pub color: Rgb,
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub faces: Vec<Face>,
}

/// Rotation followed by translation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub rotation: Mat3,
    pub translation: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        rotation: IDENTITY,
        translation: [0.0; 3],
    };

    pub fn translation(offset: Vec3) -> Self {
        Transform {
            rotation: IDENTITY,
            translation: offset,
        }
    }

    pub fn rotation(rotation: Mat3) -> Self {
        Transform {
            rotation,
            translation: [0.0; 3],
        }
    }

    /// Rotation about an arbitrary pivot point
    pub fn rotation_about(rotation: Mat3, pivot: Vec3) -> Self {
        let rotated_pivot = multiply_matrix_vector(&rotation, &pivot);
        Transform {
            rotation,
            translation: sub(&pivot, &rotated_pivot),
        }
    }

    /// Applies `self` first, then `outer`
    pub fn then(&self, outer: &Transform) -> Transform {
        Transform {
            rotation: multiply_matrices(&outer.rotation, &self.rotation),
            translation: outer.apply(&self.translation),
        }
    }

    pub fn apply(&self, point: &Vec3) -> Vec3 {
        add(&multiply_matrix_vector(&self.rotation, point), &self.translation)
    }
}

/// How the ends of a loft are finished
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoftEnds {
    /// Leave both end rings open
    Open,
    /// Close both end rings with a polygon
    Capped,
    /// Connect the last ring back to the first (tori)
    Joined,
}

impl Mesh {
    pub fn new() -> Self {
        Mesh::default()
    }

    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: Rgb) {
        self.faces.push(Face {
            vertices: [a, b, c],
            color,
        });
    }

    /// Quad split into triangles (a, b, c) and (a, c, d)
    pub fn push_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3, color: Rgb) {
        self.push_triangle(a, b, c, color);
        self.push_triangle(a, c, d, color);
    }

    /// Convex polygon as a triangle fan
    pub fn push_polygon(&mut self, points: &[Vec3], color: Rgb) {
        for i in 1..points.len().saturating_sub(1) {
            self.push_triangle(points[0], points[i], points[i + 1], color);
        }
    }

    pub fn append(&mut self, mut other: Mesh) {
        self.faces.append(&mut other.faces);
    }

    pub fn transform(&mut self, transform: &Transform) {
        for face in &mut self.faces {
            for vertex in &mut face.vertices {
                *vertex = transform.apply(vertex);
            }
        }
    }

    pub fn transformed(mut self, transform: &Transform) -> Mesh {
        self.transform(transform);
        self
    }

    /// Copy reflected across the car's centre plane (z = 0)
    pub fn mirrored_z(&self) -> Mesh {
        let faces = self
            .faces
            .iter()
            .map(|face| {
                let [a, b, c] = face.vertices;
                let flip = |v: Vec3| [v[0], v[1], -v[2]];
                Face {
                    vertices: [flip(a), flip(c), flip(b)],
                    color: face.color,
                }
            })
            .collect();
        Mesh { faces }
    }

    /// Axis-aligned bounds as (min, max), if the mesh has any faces
    #[cfg(test)]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut vertices = self.faces.iter().flat_map(|face| face.vertices.iter());
        let first = *vertices.next()?;
        Some(vertices.fold((first, first), |(mut min, mut max), v| {
            for i in 0..3 {
                min[i] = min[i].min(v[i]);
                max[i] = max[i].max(v[i]);
            }
            (min, max)
        }))
    }
}

/// Axis-aligned box, optionally pitched about the Z axis through its centre
pub fn cuboid(center: Vec3, size: Vec3, tilt_deg: f64, color: Rgb) -> Mesh {
    let [hx, hy, hz] = scale(&size, 0.5);
    let vertices = [
        [-hx, -hy, -hz], // 0
        [hx, -hy, -hz],  // 1
        [hx, hy, -hz],   // 2
        [-hx, hy, -hz],  // 3
        [-hx, -hy, hz],  // 4
        [hx, -hy, hz],   // 5
        [hx, hy, hz],    // 6
        [-hx, hy, hz],   // 7
    ];
    let faces = [
        (0, 1, 2, 3),
        (5, 4, 7, 6),
        (4, 0, 3, 7),
        (1, 5, 6, 2),
        (4, 5, 1, 0),
        (3, 2, 6, 7),
    ];
    let placement = Transform::rotation(rotation_z(tilt_deg)).then(&Transform::translation(center));
    let mut mesh = Mesh::new();
    for &(a, b, c, d) in &faces {
        mesh.push_quad(vertices[a], vertices[b], vertices[c], vertices[d], color);
    }
    mesh.transformed(&placement)
}

/// Skins a sequence of closed rings with quads. All rings must have the same length.
pub fn loft(rings: &[Vec<Vec3>], ends: LoftEnds, color: Rgb) -> Mesh {
    let mut mesh = Mesh::new();
    if rings.len() < 2 {
        return mesh;
    }
    let ring_len = rings[0].len();
    debug_assert!(rings.iter().all(|ring| ring.len() == ring_len));

    for pair in rings.windows(2) {
        skin(&mut mesh, &pair[0], &pair[1], color);
    }
    match ends {
        LoftEnds::Open => {}
        LoftEnds::Joined => skin(&mut mesh, &rings[rings.len() - 1], &rings[0], color),
        LoftEnds::Capped => {
            mesh.push_polygon(&rings[0], color);
            mesh.push_polygon(&rings[rings.len() - 1], color);
        }
    }
    mesh
}

fn skin(mesh: &mut Mesh, a: &[Vec3], b: &[Vec3], color: Rgb) {
    for i in 0..a.len() {
        let j = (i + 1) % a.len();
        mesh.push_quad(a[i], a[j], b[j], b[i], color);
    }
}

/// Points on a circle in the XY plane at depth `z`
pub fn circle(radius: f64, z: f64, segments: usize) -> Vec<Vec3> {
    (0..segments)
        .map(|i| {
            let (s, c) = (TAU * i as f64 / segments as f64).sin_cos();
            [radius * c, radius * s, z]
        })
        .collect()
}

/// Open tube around the Z axis, centred on the origin
pub fn cylinder(radius: f64, width: f64, segments: usize, color: Rgb) -> Mesh {
    let rings = [
        circle(radius, -width * 0.5, segments),
        circle(radius, width * 0.5, segments),
    ];
    loft(&rings, LoftEnds::Open, color)
}

/// Flat ring in the XY plane at depth `z`
pub fn annulus(inner: f64, outer: f64, z: f64, segments: usize, color: Rgb) -> Mesh {
    let inner_ring = circle(inner, z, segments);
    let outer_ring = circle(outer, z, segments);
    let mut mesh = Mesh::new();
    for i in 0..segments {
        let j = (i + 1) % segments;
        mesh.push_quad(inner_ring[i], outer_ring[i], outer_ring[j], inner_ring[j], color);
    }
    mesh
}

/// Filled disk in the XY plane at depth `z`
pub fn disk(radius: f64, z: f64, segments: usize, color: Rgb) -> Mesh {
    let mut mesh = Mesh::new();
    mesh.push_polygon(&circle(radius, z, segments), color);
    mesh
}

/// Axis a ring primitive is wrapped around
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Elliptical torus. `radii` are the semi-axes of the centre line in the
/// plane perpendicular to `axis`; `tube` is the tube radius.
pub fn torus(
    center: Vec3,
    radii: [f64; 2],
    tube: f64,
    axis: Axis,
    segments: usize,
    tube_segments: usize,
    color: Rgb,
) -> Mesh {
    let rings: Vec<Vec<Vec3>> = (0..segments)
        .map(|i| {
            let (s, c) = (TAU * i as f64 / segments as f64).sin_cos();
            // Centre line point and its outward direction in the ring plane
            let (u, v) = (radii[0] * c, radii[1] * s);
            let outward = normalize(&[c * radii[1], 0.0, s * radii[0]]);
            (0..tube_segments)
                .map(|k| {
                    let (ts, tc) = (TAU * k as f64 / tube_segments as f64).sin_cos();
                    let local = [
                        u + outward[0] * tube * tc,
                        tube * ts,
                        v + outward[2] * tube * tc,
                    ];
                    let oriented = match axis {
                        Axis::Y => local,
                        Axis::X => [local[1], local[0], local[2]],
                    };
                    add(&center, &oriented)
                })
                .collect()
        })
        .collect();
    loft(&rings, LoftEnds::Joined, color)
}

/// Square-section bar between two points
pub fn bar(start: Vec3, end: Vec3, thickness: f64, color: Rgb) -> Mesh {
    let direction = normalize(&sub(&end, &start));
    if direction == [0.0; 3] {
        return Mesh::new();
    }
    let helper = if direction[1].abs() > 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    };
    let side = scale(&normalize(&cross(&direction, &helper)), thickness * 0.5);
    let up = scale(&normalize(&cross(&side, &direction)), thickness * 0.5);
    let ring = |center: &Vec3| {
        vec![
            add(&add(center, &side), &up),
            sub(&add(center, &side), &up),
            sub(&sub(center, &side), &up),
            add(&sub(center, &side), &up),
        ]
    };
    loft(&[ring(&start), ring(&end)], LoftEnds::Capped, color)
}

/// Wing element swept across the span.
///
/// The section lies in the XY plane with its leading edge at `leading_edge`
/// and chord running towards -X. `incidence_deg` raises the trailing edge.
/// The leading edge bows by `arch * (1 - t²)` where `t` runs 0 at mid-span
/// to 1 at the tips, and the chord grows by `tip_chord_gain` towards the tips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AerofoilSweep {
    pub leading_edge: Vec3,
    pub chord: f64,
    pub half_span: f64,
    pub incidence_deg: f64,
    pub arch: f64,
    pub tip_chord_gain: f64,
    pub profile: Naca4,
}

pub fn aerofoil(sweep: &AerofoilSweep, chord_samples: usize, span_sections: usize, color: Rgb) -> Mesh {
    let stations = sweep.profile.stations(chord_samples);
    let incidence = rotation_z(-sweep.incidence_deg);
    // Closed section loop: upper surface leading to trailing, lower surface back
    let section: Vec<[f64; 2]> = stations
        .iter()
        .map(|s| s.upper)
        .chain(stations.iter().rev().skip(1).take(stations.len() - 2).map(|s| s.lower))
        .collect();

    let span_sections = span_sections.max(1);
    let rings: Vec<Vec<Vec3>> = (0..=span_sections)
        .map(|i| {
            let t = i as f64 / span_sections as f64;
            let z = sweep.half_span * (2.0 * t - 1.0);
            let from_centre = (2.0 * t - 1.0).abs();
            let chord = sweep.chord * (1.0 + from_centre * sweep.tip_chord_gain);
            let lift = sweep.arch * (1.0 - from_centre * from_centre);
            section
                .iter()
                .map(|&[x, y]| {
                    let local = multiply_matrix_vector(&incidence, &[-x * chord, y * chord, 0.0]);
                    add(
                        &sweep.leading_edge,
                        &[local[0], local[1] + lift, local[2] + z],
                    )
                })
                .collect()
        })
        .collect();
    loft(&rings, LoftEnds::Capped, color)
}
