use nalgebra::Point3;

use crate::tracer::ray::Ray;

// 고정된 위치에서 z = 0 평면의 [-1, 1] x [-1, 1] 영역을 바라보는 카메라
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, -2.0),
        }
    }
}

impl Camera {
    pub fn new(position: Point3<f32>) -> Self {
        Self { position }
    }

    /// 픽셀 (x, y)를 지나는 광선. 방향은 정규화하지 않음
    pub fn ray_for_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let dx = 2.0 / width as f32;
        let dy = 2.0 / height as f32;

        // 화면 위쪽이 +y
        let near_plane = Point3::new(-1.0 + dx * x as f32, 1.0 - dy * y as f32, 0.0);

        Ray::new(self.position, near_plane - self.position)
    }
}
