/// A projected vertex, ready for rasterization
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub screen_position: [f64; 2],
    /// Reciprocal of the distance along the view axis; interpolates linearly in screen space
    pub inv_depth: f64,
}
