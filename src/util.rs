use std::ops::Range;

use nalgebra::Point3;
use rand::Rng;

// 축마다 범위를 따로 받아 임의의 점 하나를 뽑음
pub fn random_point<R: Rng>(
    rng: &mut R,
    x: Range<f32>,
    y: Range<f32>,
    z: Range<f32>,
) -> Point3<f32> {
    Point3::new(rng.gen_range(x), rng.gen_range(y), rng.gen_range(z))
}
