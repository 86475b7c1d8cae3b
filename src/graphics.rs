use crate::math::{edge_function, lerp, Vec3};
use crate::vertex::Vertex;

/// 24-bit color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(color: Rgb) -> Self {
        crossterm::style::Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }
}

/// Pixel buffer with a depth buffer
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    /// Inverse depth per pixel; zero means nothing drawn yet
    depth: Vec<f64>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
            depth: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resizes the buffers, discarding their contents
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            *self = Canvas::new(width, height);
        }
    }

    /// Fills the canvas with a background color and resets the depth buffer
    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
        self.depth.fill(0.0);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    fn put(&mut self, x: isize, y: isize, color: Rgb) {
        if x >= 0 && x < self.width as isize && y >= 0 && y < self.height as isize {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }
}

/// Draws a flat-shaded triangle with a depth test.
///
/// Both windings are filled; the nearer fragment (larger inverse depth) wins.
pub fn draw_triangle(v0: &Vertex, v1: &Vertex, v2: &Vertex, canvas: &mut Canvas, color: Rgb) {
    if canvas.width == 0 || canvas.height == 0 {
        return;
    }

    // Precompute area of the triangle
    let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
    if area.abs() < f64::EPSILON {
        return;
    }

    // Compute bounding box of the triangle
    let min_x = v0.screen_position[0]
        .min(v1.screen_position[0])
        .min(v2.screen_position[0])
        .floor()
        .max(0.0);
    let max_x = v0.screen_position[0]
        .max(v1.screen_position[0])
        .max(v2.screen_position[0])
        .ceil()
        .min(canvas.width as f64 - 1.0);
    let min_y = v0.screen_position[1]
        .min(v1.screen_position[1])
        .min(v2.screen_position[1])
        .floor()
        .max(0.0);
    let max_y = v0.screen_position[1]
        .max(v1.screen_position[1])
        .max(v2.screen_position[1])
        .ceil()
        .min(canvas.height as f64 - 1.0);
    if min_x > max_x || min_y > max_y {
        return;
    }

    for y in min_y as usize..=max_y as usize {
        for x in min_x as usize..=max_x as usize {
            let p = [x as f64 + 0.5, y as f64 + 0.5];

            // Normalized barycentric coordinates; the sign of `area` cancels out
            let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
            let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
            let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let inv_depth = v0.inv_depth * w0 + v1.inv_depth * w1 + v2.inv_depth * w2;
            let offset = y * canvas.width + x;
            if inv_depth > canvas.depth[offset] {
                canvas.depth[offset] = inv_depth;
                canvas.pixels[offset] = color;
            }
        }
    }
}

/// Draws a line between two points in the pixel buffer using Bresenham's algorithm
pub fn draw_line(x0: f64, y0: f64, x1: f64, y1: f64, canvas: &mut Canvas, color: Rgb) {
    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return;
    }
    let (mut x0, mut y0, x1, y1) = (
        x0.round() as isize,
        y0.round() as isize,
        x1.round() as isize,
        y1.round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        canvas.put(x0, y0, color);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Clips a camera-space polygon against the near plane `z = -near`.
///
/// The camera looks down -Z, so the visible half-space is `z <= -near`.
/// Returns the clipped polygon, which is empty when fully behind the plane.
pub fn clip_near(polygon: &[Vec3], near: f64) -> Vec<Vec3> {
    let inside = |v: &Vec3| v[2] <= -near;
    let mut output = Vec::with_capacity(polygon.len() + 2);
    for (i, current) in polygon.iter().enumerate() {
        let next = &polygon[(i + 1) % polygon.len()];
        match (inside(current), inside(next)) {
            (true, true) => output.push(*next),
            (true, false) => output.push(intersect_near(current, next, near)),
            (false, true) => {
                output.push(intersect_near(current, next, near));
                output.push(*next);
            }
            (false, false) => {}
        }
    }
    output
}

fn intersect_near(a: &Vec3, b: &Vec3, near: f64) -> Vec3 {
    let t = (-near - a[2]) / (b[2] - a[2]);
    let mut point = lerp(a, b, t);
    point[2] = -near;
    point
}
