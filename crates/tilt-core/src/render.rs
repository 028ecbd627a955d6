use crate::scene::BallView;

/// Per-instance data for the disc shader in `shaders/ball.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BallInstance {
    pub center_ndc: [f32; 2],
    pub half_extent_ndc: [f32; 2], // disc radius per axis, so the disc stays round
    pub color: [f32; 4],
}

impl BallInstance {
    /// Place the marker centered at the view's percent position on a
    /// `width` x `height` pixel surface.
    pub fn from_view(view: &BallView, width: u32, height: u32, diameter_px: f32) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        let x = (view.x_percent / 100.0) as f32;
        let y = (view.y_percent / 100.0) as f32;
        Self {
            // percent grows down, NDC y grows up
            center_ndc: [x * 2.0 - 1.0, 1.0 - y * 2.0],
            half_extent_ndc: [diameter_px / w, diameter_px / h],
            color: view.color.to_linear_rgba(),
        }
    }
}
