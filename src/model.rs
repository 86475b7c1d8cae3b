use crate::aerofoil::Naca4;
use crate::graphics::Rgb;
use crate::math::{rotation_y, rotation_z, Vec3};
use crate::mesh::{
    aerofoil, annulus, bar, cuboid, cylinder, disk, loft, torus, AerofoilSweep, Axis, LoftEnds,
    Mesh, Transform,
};
use crate::state::AnimationState;
use clap::ValueEnum;
use Paint::{Accent, Body, Carbon, Glass, Metal, Trim};
use Symmetry::{Mirrored, Single};

/// Rear flap rotation at full DRS opening
pub const DRS_MAX_FLAP_DEG: f64 = 25.0;

const WING_CHORD_SAMPLES: usize = 8;
const WING_SPAN_SECTIONS: usize = 12;
const RING_SEGMENTS: usize = 32;
const RING_TUBE_SEGMENTS: usize = 4;
const WHEEL_SEGMENTS: usize = 24;
const WHEEL_SPOKES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Team {
    Mercedes,
    Ferrari,
    Mclaren,
    RedBull,
}

impl Team {
    pub fn livery(self) -> &'static Livery {
        match self {
            Team::Mercedes => &MERCEDES,
            Team::Ferrari => &FERRARI,
            Team::Mclaren => &MCLAREN,
            Team::RedBull => &RED_BULL,
        }
    }
}

/// Paint slots a part can use
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Body,
    Carbon,
    Accent,
    Trim,
    Metal,
    Glass,
}

/// Team colors and the viewport title
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Livery {
    pub title: &'static str,
    pub body: Rgb,
    pub carbon: Rgb,
    pub accent: Rgb,
    pub trim: Rgb,
    pub metal: Rgb,
    pub glass: Rgb,
    pub tire: Rgb,
    pub rim: Rgb,
}

impl Livery {
    pub fn color(&self, paint: Paint) -> Rgb {
        match paint {
            Paint::Body => self.body,
            Paint::Carbon => self.carbon,
            Paint::Accent => self.accent,
            Paint::Trim => self.trim,
            Paint::Metal => self.metal,
            Paint::Glass => self.glass,
        }
    }
}

const TRIM: Rgb = Rgb::new(5, 5, 5);
const METAL: Rgb = Rgb::new(38, 38, 41);
const GLASS: Rgb = Rgb::new(128, 128, 140);
const TIRE: Rgb = Rgb::new(15, 15, 15);
const RIM: Rgb = Rgb::new(153, 153, 153);

pub static MERCEDES: Livery = Livery {
    title: "F1 Mercedes W16",
    body: Rgb::new(20, 20, 20),
    carbon: Rgb::new(15, 15, 15),
    accent: Rgb::new(0, 217, 204),
    trim: TRIM,
    metal: METAL,
    glass: GLASS,
    tire: TIRE,
    rim: RIM,
};

pub static FERRARI: Livery = Livery {
    title: "F1 Ferrari SF-25",
    body: Rgb::new(200, 0, 13),
    carbon: Rgb::new(20, 20, 20),
    accent: Rgb::new(245, 245, 245),
    trim: TRIM,
    metal: METAL,
    glass: GLASS,
    tire: TIRE,
    rim: RIM,
};

pub static MCLAREN: Livery = Livery {
    title: "F1 McLaren MCL39",
    body: Rgb::new(255, 128, 0),
    carbon: Rgb::new(20, 20, 20),
    accent: Rgb::new(20, 160, 230),
    trim: TRIM,
    metal: METAL,
    glass: GLASS,
    tire: TIRE,
    rim: RIM,
};

pub static RED_BULL: Livery = Livery {
    title: "F1 Red Bull RB21",
    body: Rgb::new(18, 30, 75),
    carbon: Rgb::new(15, 15, 20),
    accent: Rgb::new(220, 20, 40),
    trim: TRIM,
    metal: METAL,
    glass: GLASS,
    tire: TIRE,
    rim: Rgb::new(200, 170, 40),
};

/// Cross-section of a lofted part at station `x`: a trapezoid centred on
/// `z_center`, `half_top` wide at `y_top` and `half_bottom` wide at `y_bottom`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Section {
    pub x: f64,
    pub z_center: f64,
    pub half_top: f64,
    pub half_bottom: f64,
    pub y_top: f64,
    pub y_bottom: f64,
}

const fn section(x: f64, half_top: f64, half_bottom: f64, y_top: f64, y_bottom: f64) -> Section {
    Section {
        x,
        z_center: 0.0,
        half_top,
        half_bottom,
        y_top,
        y_bottom,
    }
}

/// Section hung off the side of the monocoque
const fn side_section(x: f64, z_center: f64, half_width: f64, y_top: f64) -> Section {
    Section {
        x,
        z_center,
        half_top: half_width,
        half_bottom: half_width,
        y_top,
        y_bottom: -0.20,
    }
}

impl Section {
    fn ring(&self) -> Vec<Vec3> {
        vec![
            [self.x, self.y_top, self.z_center - self.half_top],
            [self.x, self.y_top, self.z_center + self.half_top],
            [self.x, self.y_bottom, self.z_center + self.half_bottom],
            [self.x, self.y_bottom, self.z_center - self.half_bottom],
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Cuboid {
        center: Vec3,
        size: Vec3,
        tilt_deg: f64,
    },
    Loft(&'static [Section]),
    Panel([Vec3; 4]),
    Wing(AerofoilSweep),
    Ring {
        center: Vec3,
        radii: [f64; 2],
        tube: f64,
        axis: Axis,
    },
    Bar {
        start: Vec3,
        end: Vec3,
        thickness: f64,
    },
}

impl Primitive {
    fn mesh(&self, color: Rgb) -> Mesh {
        match *self {
            Primitive::Cuboid {
                center,
                size,
                tilt_deg,
            } => cuboid(center, size, tilt_deg, color),
            Primitive::Loft(sections) => {
                let rings: Vec<Vec<Vec3>> = sections.iter().map(Section::ring).collect();
                loft(&rings, LoftEnds::Capped, color)
            }
            Primitive::Panel([a, b, c, d]) => {
                let mut mesh = Mesh::new();
                mesh.push_quad(a, b, c, d, color);
                mesh
            }
            Primitive::Wing(sweep) => {
                aerofoil(&sweep, WING_CHORD_SAMPLES, WING_SPAN_SECTIONS, color)
            }
            Primitive::Ring {
                center,
                radii,
                tube,
                axis,
            } => torus(
                center,
                radii,
                tube,
                axis,
                RING_SEGMENTS,
                RING_TUBE_SEGMENTS,
                color,
            ),
            Primitive::Bar {
                start,
                end,
                thickness,
            } => bar(start, end, thickness, color),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symmetry {
    /// Emitted once as written
    Single,
    /// Emitted as written and reflected across the centre plane
    Mirrored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Articulation {
    /// Rides on the suspension
    Sprung,
    /// Sprung, and rotated about `pivot` by the DRS opening
    DrsFlap { pivot: Vec3 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Part {
    pub name: &'static str,
    pub paint: Paint,
    pub symmetry: Symmetry,
    pub articulation: Articulation,
    pub primitives: &'static [Primitive],
}

impl Part {
    /// Geometry of the part in its rest pose
    pub fn mesh(&self, livery: &Livery) -> Mesh {
        let color = livery.color(self.paint);
        let mut mesh = Mesh::new();
        for primitive in self.primitives {
            mesh.append(primitive.mesh(color));
        }
        if self.symmetry == Symmetry::Mirrored {
            let mirrored = mesh.mirrored_z();
            mesh.append(mirrored);
        }
        tracing::trace!(part = self.name, faces = mesh.faces.len(), "part built");
        mesh
    }
}

/// One axle's wheels; the hub is given for the +Z side and mirrored
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelSpec {
    pub hub: Vec3,
    pub radius: f64,
    pub width: f64,
    pub rim_radius: f64,
    pub steered: bool,
}

pub const WHEELS: [WheelSpec; 2] = [
    WheelSpec {
        hub: [1.9, -0.08, 0.70],
        radius: 0.33,
        width: 0.28,
        rim_radius: 0.23,
        steered: true,
    },
    WheelSpec {
        hub: [-1.5, -0.05, 0.65],
        radius: 0.33,
        width: 0.34,
        rim_radius: 0.23,
        steered: false,
    },
];

const fn wing(
    leading_edge: Vec3,
    chord: f64,
    half_span: f64,
    incidence_deg: f64,
    arch: f64,
    tip_chord_gain: f64,
    profile: Naca4,
) -> Primitive {
    Primitive::Wing(AerofoilSweep {
        leading_edge,
        chord,
        half_span,
        incidence_deg,
        arch,
        tip_chord_gain,
        profile,
    })
}

const fn bar_between(start: Vec3, end: Vec3, thickness: f64) -> Primitive {
    Primitive::Bar {
        start,
        end,
        thickness,
    }
}

const fn block(center: Vec3, size: Vec3) -> Primitive {
    Primitive::Cuboid {
        center,
        size,
        tilt_deg: 0.0,
    }
}

const fn strake(z: f64) -> Primitive {
    Primitive::Cuboid {
        center: [-1.6, -0.15, z],
        size: [0.35, 0.02, 0.08],
        tilt_deg: 25.0,
    }
}

const fn sprung(
    name: &'static str,
    paint: Paint,
    symmetry: Symmetry,
    primitives: &'static [Primitive],
) -> Part {
    Part {
        name,
        paint,
        symmetry,
        articulation: Articulation::Sprung,
        primitives,
    }
}

/// Body parts in car coordinates: +X forward, +Y up, Z across
pub static PARTS: &[Part] = &[
    sprung(
        "monocoque",
        Body,
        Single,
        &[Primitive::Loft(&[
            section(1.5, 0.28, 0.252, 0.12, -0.22),
            section(0.8, 0.32, 0.288, 0.12, -0.22),
            section(0.2, 0.30, 0.27, 0.12, -0.22),
            section(-0.3, 0.25, 0.225, 0.12, -0.22),
            section(-0.8, 0.22, 0.198, 0.12, -0.22),
            section(-1.4, 0.18, 0.162, 0.12, -0.22),
            section(-1.8, 0.12, 0.108, 0.12, -0.22),
        ])],
    ),
    sprung(
        "engine cover",
        Body,
        Single,
        &[Primitive::Loft(&[
            section(0.2, 0.28, 0.28, 0.15, 0.12),
            section(0.0, 0.26, 0.26, 0.28, 0.12),
            section(-0.15, 0.22, 0.22, 0.42, 0.12),
            section(-0.3, 0.18, 0.18, 0.52, 0.12),
            section(-0.5, 0.16, 0.16, 0.48, 0.10),
            section(-0.7, 0.15, 0.15, 0.40, 0.10),
            section(-0.9, 0.14, 0.14, 0.32, 0.10),
            section(-1.1, 0.13, 0.13, 0.24, 0.10),
            section(-1.3, 0.12, 0.12, 0.18, 0.10),
            section(-1.5, 0.11, 0.11, 0.14, 0.08),
            section(-1.7, 0.10, 0.10, 0.10, 0.05),
            section(-1.9, 0.08, 0.08, 0.06, 0.0),
        ])],
    ),
    sprung(
        "nose",
        Body,
        Single,
        &[Primitive::Loft(&[
            section(1.5, 0.22, 0.20, 0.08, -0.20),
            section(1.8, 0.18, 0.17, 0.04, -0.20),
            section(2.1, 0.15, 0.14, 0.00, -0.19),
            section(2.4, 0.12, 0.11, -0.04, -0.18),
            section(2.7, 0.09, 0.08, -0.06, -0.17),
            section(3.0, 0.06, 0.05, -0.08, -0.16),
            section(3.2, 0.04, 0.03, -0.10, -0.15),
            section(3.4, 0.02, 0.015, -0.12, -0.14),
        ])],
    ),
    sprung(
        "sidepods",
        Body,
        Mirrored,
        &[Primitive::Loft(&[
            side_section(0.8, 0.495, 0.275, 0.18),
            side_section(0.5, 0.52, 0.30, 0.18),
            side_section(0.0, 0.495, 0.275, 0.153),
            side_section(-0.4, 0.445, 0.225, 0.153),
            side_section(-0.8, 0.37, 0.15, 0.153),
            side_section(-1.2, 0.31, 0.09, 0.153),
        ])],
    ),
    sprung(
        "cockpit opening",
        Trim,
        Single,
        &[Primitive::Panel([
            [0.95, 0.121, -0.18],
            [0.95, 0.121, 0.18],
            [0.2, 0.121, 0.2],
            [0.2, 0.121, -0.2],
        ])],
    ),
    sprung(
        "halo",
        Carbon,
        Single,
        &[
            bar_between([1.05, 0.02, 0.0], [0.70, 0.38, 0.0], 0.05),
            Primitive::Ring {
                center: [0.35, 0.39, 0.0],
                radii: [0.38, 0.28],
                tube: 0.018,
                axis: Axis::Y,
            },
        ],
    ),
    sprung(
        "halo rear legs",
        Carbon,
        Mirrored,
        &[bar_between([0.05, 0.12, 0.22], [-0.011, 0.39, 0.266], 0.028)],
    ),
    sprung(
        "floor",
        Carbon,
        Single,
        &[Primitive::Panel([
            [2.0, -0.22, -0.55],
            [2.0, -0.22, 0.55],
            [-1.5, -0.22, 0.55],
            [-1.5, -0.22, -0.55],
        ])],
    ),
    sprung(
        "floor edges",
        Trim,
        Mirrored,
        &[Primitive::Panel([
            [1.8, -0.22, 0.55],
            [1.8, -0.22, 0.75],
            [-0.5, -0.22, 0.75],
            [-0.5, -0.22, 0.55],
        ])],
    ),
    sprung(
        "diffuser",
        Carbon,
        Single,
        &[
            strake(-0.36),
            strake(-0.24),
            strake(-0.12),
            strake(0.0),
            strake(0.12),
            strake(0.24),
            strake(0.36),
        ],
    ),
    sprung(
        "airbox",
        Body,
        Single,
        &[Primitive::Loft(&[
            section(0.05, 0.08, 0.12, 0.55, 0.30),
            section(-0.25, 0.06, 0.12, 0.48, 0.30),
        ])],
    ),
    sprung(
        "air intake rim",
        Carbon,
        Single,
        &[Primitive::Ring {
            center: [0.06, 0.46, 0.0],
            radii: [0.07, 0.06],
            tube: 0.015,
            axis: Axis::X,
        }],
    ),
    sprung(
        "air intake",
        Trim,
        Single,
        &[block([0.06, 0.46, 0.0], [0.02, 0.12, 0.10])],
    ),
    sprung(
        "front wing",
        Carbon,
        Single,
        &[
            wing([3.55, -0.16, 0.0], 0.60, 0.95, 5.0, -0.06, 0.15, Naca4::new(0.04, 0.4, 0.042)),
            wing([3.48, -0.115, 0.0], 0.46, 0.95, 12.0, -0.06, 0.15, Naca4::new(0.04, 0.4, 0.043)),
            wing([3.42, -0.075, 0.0], 0.34, 0.95, 20.0, -0.06, 0.15, Naca4::new(0.04, 0.4, 0.053)),
            wing([3.35, -0.04, 0.0], 0.23, 0.95, 28.0, -0.06, 0.15, Naca4::new(0.04, 0.4, 0.065)),
        ],
    ),
    sprung(
        "front wing endplates",
        Carbon,
        Mirrored,
        &[Primitive::Panel([
            [3.5, 0.04, 0.95],
            [3.5, -0.16, 0.95],
            [2.75, -0.16, 0.95],
            [2.75, 0.10, 0.95],
        ])],
    ),
    sprung(
        "front wing endplate stripes",
        Accent,
        Mirrored,
        &[block([3.15, 0.06, 0.94], [0.70, 0.02, 0.025])],
    ),
    sprung(
        "front wing pylons",
        Body,
        Single,
        &[
            block([3.05, -0.14, 0.06], [0.08, 0.06, 0.03]),
            block([3.05, -0.14, -0.06], [0.08, 0.06, 0.03]),
            block([3.1, -0.14, 0.0], [0.12, 0.06, 0.04]),
        ],
    ),
    sprung(
        "front wing accent",
        Accent,
        Single,
        &[block([3.15, -0.155, 0.0], [0.50, 0.008, 0.30])],
    ),
    sprung(
        "rear wing main plane",
        Carbon,
        Single,
        &[wing([-1.795, 0.52, 0.0], 0.35, 0.48, -13.0, -0.02, 0.0, Naca4::new(0.05, 0.4, 0.07))],
    ),
    Part {
        name: "rear wing flap",
        paint: Body,
        symmetry: Single,
        articulation: Articulation::DrsFlap {
            pivot: [-2.075, 0.46, 0.0],
        },
        primitives: &[wing([-2.06, 0.50, 0.0], 0.16, 0.48, 35.0, -0.02, 0.0, Naca4::new(0.06, 0.4, 0.11))],
    },
    sprung(
        "rear wing endplates",
        Carbon,
        Mirrored,
        &[Primitive::Panel([
            [-1.75, 0.62, 0.49],
            [-1.75, 0.10, 0.49],
            [-2.25, 0.10, 0.49],
            [-2.25, 0.66, 0.49],
        ])],
    ),
    sprung(
        "rear wing pylon",
        Carbon,
        Single,
        &[bar_between([-1.75, 0.12, 0.0], [-1.98, 0.46, 0.0], 0.05)],
    ),
    sprung(
        "front suspension",
        Metal,
        Mirrored,
        &[
            bar_between([1.5, 0.05, 0.32], [1.9, 0.0, 0.70], 0.025),
            bar_between([1.0, 0.03, 0.32], [1.9, 0.0, 0.70], 0.025),
            bar_between([1.5, -0.18, 0.32], [1.9, -0.18, 0.70], 0.028),
            bar_between([1.0, -0.18, 0.32], [1.9, -0.18, 0.70], 0.028),
            bar_between([1.8, -0.13, 0.68], [1.3, 0.08, 0.34], 0.018),
            bar_between([1.4, -0.05, 0.30], [1.9, -0.08, 0.68], 0.015),
            block([1.9, -0.08, 0.70], [0.05, 0.22, 0.04]),
        ],
    ),
    sprung(
        "rear suspension",
        Metal,
        Mirrored,
        &[
            bar_between([-1.0, 0.02, 0.22], [-1.5, 0.03, 0.65], 0.025),
            bar_between([-1.6, 0.0, 0.18], [-1.5, 0.03, 0.65], 0.025),
            bar_between([-1.0, -0.15, 0.22], [-1.5, -0.15, 0.65], 0.028),
            bar_between([-1.6, -0.15, 0.18], [-1.5, -0.15, 0.65], 0.028),
            bar_between([-1.42, 0.01, 0.63], [-1.2, -0.12, 0.24], 0.018),
            bar_between([-1.4, -0.08, 0.20], [-1.5, -0.07, 0.63], 0.015),
            bar_between([-1.3, -0.05, 0.18], [-1.5, -0.05, 0.62], 0.035),
            block([-1.5, -0.05, 0.65], [0.05, 0.22, 0.05]),
        ],
    ),
    sprung(
        "nose accent",
        Accent,
        Single,
        &[block([2.5, -0.02, 0.0], [0.6, 0.02, 0.12])],
    ),
    sprung(
        "sidepod stripes",
        Accent,
        Mirrored,
        &[block([0.2, 0.185, 0.5], [1.2, 0.012, 0.03])],
    ),
    sprung(
        "mirror stalks",
        Metal,
        Mirrored,
        &[bar_between([0.9, 0.22, 0.42], [0.86, 0.26, 0.52], 0.024)],
    ),
    sprung(
        "mirror housings",
        Body,
        Mirrored,
        &[block([0.85, 0.27, 0.56], [0.03, 0.045, 0.08])],
    ),
    sprung(
        "mirror glass",
        Glass,
        Mirrored,
        &[block([0.833, 0.27, 0.56], [0.005, 0.035, 0.07])],
    ),
];

/// A single wheel centred on the origin, axle along Z
pub fn wheel_mesh(wheel: &WheelSpec, livery: &Livery) -> Mesh {
    let half_width = wheel.width * 0.5;
    let mut mesh = cylinder(wheel.radius, wheel.width, WHEEL_SEGMENTS, livery.tire);
    for side in [-1.0, 1.0] {
        let z = side * half_width;
        mesh.append(annulus(wheel.rim_radius, wheel.radius, z, WHEEL_SEGMENTS, livery.tire));
        mesh.append(disk(wheel.rim_radius, z * 1.01, WHEEL_SEGMENTS, livery.rim));
        // Spokes make the spin visible
        for k in 0..WHEEL_SPOKES {
            let angle = 360.0 * k as f64 / WHEEL_SPOKES as f64;
            let (s, c) = angle.to_radians().sin_cos();
            let reach = wheel.rim_radius * 0.5;
            mesh.append(cuboid(
                [reach * c, reach * s, z * 1.03],
                [wheel.rim_radius * 0.9, 0.03, 0.006],
                angle,
                livery.accent,
            ));
        }
    }
    mesh
}

/// Placement of one wheel: spin, then steer, then move to the hub
pub fn wheel_transform(wheel: &WheelSpec, side: f64, state: &AnimationState) -> Transform {
    let spin = Transform::rotation(rotation_z(state.wheel_rotation_deg));
    let steer = if wheel.steered {
        Transform::rotation(rotation_y(state.steer_angle_deg))
    } else {
        Transform::IDENTITY
    };
    let hub = [wheel.hub[0], wheel.hub[1], wheel.hub[2] * side];
    spin.then(&steer).then(&Transform::translation(hub))
}

/// The whole car posed for the given animation state
pub fn build_car(state: &AnimationState, livery: &Livery) -> Mesh {
    let heave = Transform::translation([0.0, state.suspension_bounce, 0.0]);
    let mut car = Mesh::new();

    for part in PARTS {
        let mut mesh = part.mesh(livery);
        if let Articulation::DrsFlap { pivot } = part.articulation {
            mesh.transform(&Transform::rotation_about(
                rotation_z(-state.drs_flap_deg()),
                pivot,
            ));
        }
        mesh.transform(&heave);
        car.append(mesh);
    }

    for wheel in &WHEELS {
        let mesh = wheel_mesh(wheel, livery);
        for side in [1.0, -1.0] {
            car.append(mesh.clone().transformed(&wheel_transform(wheel, side, state)));
        }
    }
    car
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str) -> &'static Part {
        PARTS
            .iter()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("no part named {name}"))
    }

    #[test]
    fn part_names_are_unique() {
        let mut names: Vec<_> = PARTS.iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PARTS.len());
    }

    #[test]
    fn every_part_emits_geometry() {
        for part in PARTS {
            assert!(!part.mesh(&MERCEDES).faces.is_empty(), "{} is empty", part.name);
        }
    }

    #[test]
    fn mirrored_parts_are_symmetric() {
        let (min, max) = part("sidepods").mesh(&MERCEDES).bounds().unwrap();
        assert!((min[2] + max[2]).abs() < 1e-9);
        assert!(max[2] > 0.8);
    }

    #[test]
    fn car_spans_nose_to_rear_wing() {
        let car = build_car(&AnimationState::default(), &MERCEDES);
        let (min, max) = car.bounds().unwrap();
        assert!(max[0] > 3.4 && max[0] < 3.7);
        assert!(min[0] < -2.1);
        assert!((min[2] + max[2]).abs() < 1e-9);
    }

    #[test]
    fn livery_paints_the_body() {
        let mesh = part("monocoque").mesh(&FERRARI);
        assert!(mesh.faces.iter().all(|f| f.color == FERRARI.body));
        assert_eq!(Team::RedBull.livery().title, "F1 Red Bull RB21");
    }

    #[test]
    fn drs_opening_lifts_flap_trailing_edge() {
        let closed = AnimationState::default();
        let mut open = AnimationState::default();
        open.drs_open_fraction = 1.0;

        let flap_top = |state: &AnimationState| {
            let car = build_car(state, &MERCEDES);
            let flap_color = MERCEDES.body;
            car.faces
                .iter()
                .filter(|f| f.color == flap_color)
                .flat_map(|f| f.vertices.iter())
                .filter(|v| v[0] < -2.0)
                .map(|v| v[1])
                .fold(f64::MIN, f64::max)
        };
        assert!(flap_top(&open) > flap_top(&closed) + 0.01);
    }

    #[test]
    fn wheel_spin_keeps_hub_in_place() {
        let wheel = &WHEELS[1];
        let mut state = AnimationState::default();
        state.wheel_rotation_deg = 123.0;
        let t = wheel_transform(wheel, -1.0, &state);
        let hub = t.apply(&[0.0; 3]);
        assert!((hub[0] - wheel.hub[0]).abs() < 1e-12);
        assert!((hub[2] + wheel.hub[2]).abs() < 1e-12);
    }

    #[test]
    fn steering_turns_only_front_wheels() {
        let mut state = AnimationState::default();
        state.steer_angle_deg = 2.0;
        let axle_end = |wheel: &WheelSpec| {
            let t = wheel_transform(wheel, 1.0, &state);
            t.apply(&[0.0, 0.0, 1.0])[0] - t.apply(&[0.0; 3])[0]
        };
        assert!(axle_end(&WHEELS[0]).abs() > 0.01);
        assert!(axle_end(&WHEELS[1]).abs() < 1e-12);
    }

    #[test]
    fn bounce_lifts_body_but_not_wheels() {
        let mut state = AnimationState::default();
        let rest = part("monocoque").mesh(&MERCEDES).bounds().unwrap();
        state.suspension_bounce = 0.01;
        let car = build_car(&state, &MERCEDES);
        let body_top = car
            .faces
            .iter()
            .filter(|f| f.color == MERCEDES.body)
            .flat_map(|f| f.vertices.iter())
            .filter(|v| v[0] > 1.0 && v[0] < 1.6 && v[2].abs() < 0.3)
            .map(|v| v[1])
            .fold(f64::MIN, f64::max);
        assert!((body_top - (rest.1[1] + 0.01)).abs() < 1e-9);
        let hub = wheel_transform(&WHEELS[0], 1.0, &state).apply(&[0.0; 3]);
        assert_eq!(hub[1], WHEELS[0].hub[1]);
    }
}
