use nalgebra::Vector3;

/// 위치, 방향, 색상 모두 이 타입을 씀
pub type Vec3 = Vector3<f32>;

pub const WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

// a + (b - a) * t, t는 [0, 1] 밖이어도 그대로 외삽함
pub fn lerp(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

pub fn saturate(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

// 길이가 0인 벡터를 정규화하면 NaN이 퍼지니까, 그 경우엔 영벡터를 돌려줌
pub fn normalize_or_zero(v: &Vec3) -> Vec3 {
    v.try_normalize(0.0).unwrap_or_else(Vec3::zeros)
}
