use crate::graphics::{clip_near, draw_line, draw_triangle, Canvas, Rgb};
use crate::math::{
    apply_lighting, calculate_light_intensity, calculate_normal, cross, dot, normalize, scale,
    sub, Light, Vec3,
};
use crate::mesh::Mesh;
use crate::model::{build_car, Livery};
use crate::state::AnimationState;
use crate::track::build_track;
use crate::vertex::Vertex;

pub const FIELD_OF_VIEW_DEG: f64 = 45.0;
pub const NEAR_PLANE: f64 = 0.1;
pub const AMBIENT: f64 = 0.35;

pub const SKY: Rgb = Rgb::new(102, 153, 230);

pub const LIGHTS: [Light; 2] = [
    Light {
        direction: [5.0, 10.0, 5.0],
        diffuse: 0.9,
    },
    Light {
        direction: [-5.0, 8.0, -5.0],
        diffuse: 0.6,
    },
];

/// Camera basis looking from `eye` at the origin with +Y up
#[derive(Clone, Copy, Debug)]
pub struct View {
    eye: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl View {
    pub fn looking_at_origin(eye: Vec3) -> Self {
        let forward = normalize(&scale(&eye, -1.0));
        let mut right = normalize(&cross(&forward, &[0.0, 1.0, 0.0]));
        if right == [0.0; 3] {
            right = [1.0, 0.0, 0.0];
        }
        let up = cross(&right, &forward);
        View {
            eye,
            right,
            up,
            forward,
        }
    }

    /// World to camera space; the camera looks down -Z
    pub fn to_camera(&self, point: &Vec3) -> Vec3 {
        let relative = sub(point, &self.eye);
        [
            dot(&relative, &self.right),
            dot(&relative, &self.up),
            -dot(&relative, &self.forward),
        ]
    }
}

/// Perspective projection onto a canvas of the given pixel size
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    width: f64,
    height: f64,
    focal: f64,
}

impl Projection {
    pub fn new(width: usize, height: usize) -> Self {
        let height = height as f64;
        Projection {
            width: width as f64,
            height,
            focal: height * 0.5 / (FIELD_OF_VIEW_DEG.to_radians() * 0.5).tan(),
        }
    }

    /// Projects a camera-space point in front of the near plane
    pub fn project(&self, point: &Vec3) -> Vertex {
        let inv_depth = 1.0 / -point[2];
        Vertex {
            screen_position: [
                self.width * 0.5 + point[0] * inv_depth * self.focal,
                self.height * 0.5 - point[1] * inv_depth * self.focal,
            ],
            inv_depth,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Triangles submitted, after near-plane clipping
    pub triangles: usize,
}

/// Draws a mesh, flat shaded or as a wireframe
pub fn draw_mesh(
    mesh: &Mesh,
    view: &View,
    projection: &Projection,
    canvas: &mut Canvas,
    wireframe: bool,
) -> usize {
    let lights = camera_lights(view);
    let mut triangles = 0;
    for face in &mesh.faces {
        let camera_space: Vec<Vec3> = face.vertices.iter().map(|v| view.to_camera(v)).collect();
        let clipped = clip_near(&camera_space, NEAR_PLANE);
        if clipped.len() < 3 {
            continue;
        }

        let normal = calculate_normal(&clipped[0], &clipped[1], &clipped[2]);
        // In camera space the eye is the origin
        let intensity = calculate_light_intensity(
            &normal,
            &scale(&clipped[0], -1.0),
            &lights,
            AMBIENT,
        );
        let color = apply_lighting(face.color, intensity);

        let projected: Vec<Vertex> = clipped.iter().map(|p| projection.project(p)).collect();
        if wireframe {
            for (i, a) in projected.iter().enumerate() {
                let b = &projected[(i + 1) % projected.len()];
                draw_line(
                    a.screen_position[0],
                    a.screen_position[1],
                    b.screen_position[0],
                    b.screen_position[1],
                    canvas,
                    color,
                );
            }
            triangles += projected.len() - 2;
        } else {
            for i in 1..projected.len() - 1 {
                draw_triangle(&projected[0], &projected[i], &projected[i + 1], canvas, color);
                triangles += 1;
            }
        }
    }
    triangles
}

/// Light directions rotated into camera space
fn camera_lights(view: &View) -> [Light; 2] {
    LIGHTS.map(|light| Light {
        direction: [
            dot(&light.direction, &view.right),
            dot(&light.direction, &view.up),
            -dot(&light.direction, &view.forward),
        ],
        diffuse: light.diffuse,
    })
}

/// Renders the full scene for one frame
pub fn render(
    state: &AnimationState,
    livery: &Livery,
    canvas: &mut Canvas,
    wireframe: bool,
) -> RenderStats {
    canvas.clear(SKY);
    let view = View::looking_at_origin(state.camera.eye());
    let projection = Projection::new(canvas.width(), canvas.height());

    let mut triangles = draw_mesh(
        &build_track(state.track_offset),
        &view,
        &projection,
        canvas,
        wireframe,
    );
    triangles += draw_mesh(&build_car(state, livery), &view, &projection, canvas, wireframe);
    RenderStats { triangles }
}
