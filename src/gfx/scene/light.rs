//! Scene lights
//!
//! Lights are plain data carrying a capability tag rather than a type
//! hierarchy: every light has a kind, a color, and an intensity; directional
//! and point lights additionally use the `vector` field (direction or
//! position respectively).

/// What kind of contribution a light makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
}

/// A single light in the scene.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub kind: LightKind,
    /// Direction for directional lights, position for point lights,
    /// ignored for ambient.
    pub vector: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Light {
    pub fn ambient(color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            vector: [0.0; 3],
            color,
            intensity,
        }
    }

    /// `direction` points from the light towards the scene.
    pub fn directional(direction: [f32; 3], color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            vector: direction,
            color,
            intensity,
        }
    }

    pub fn point(position: [f32; 3], color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: LightKind::Point,
            vector: position,
            color,
            intensity,
        }
    }
}

/// Maximum number of non-ambient lights uploaded to the shader.
pub const MAX_LIGHTS: usize = 8;

/// GPU layout for one non-ambient light.
///
/// `position_kind.w` carries the kind tag (0 = directional, 1 = point) so the
/// struct packs into two 16-byte rows, matching the WGSL `Light` struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    pub position_kind: [f32; 4],
    pub color_intensity: [f32; 4],
}

/// Packs scene lights for the global uniform buffer.
///
/// Ambient lights are accumulated into a single RGB term; directional and
/// point lights fill the fixed-size array. Lights beyond [`MAX_LIGHTS`] are
/// dropped with a warning.
pub fn pack_lights(lights: &[Light]) -> ([f32; 4], u32, [GpuLight; MAX_LIGHTS]) {
    let mut ambient = [0.0f32; 4];
    let mut packed = [GpuLight::default(); MAX_LIGHTS];
    let mut count = 0usize;

    for light in lights {
        match light.kind {
            LightKind::Ambient => {
                ambient[0] += light.color[0] * light.intensity;
                ambient[1] += light.color[1] * light.intensity;
                ambient[2] += light.color[2] * light.intensity;
            }
            LightKind::Directional | LightKind::Point => {
                if count == MAX_LIGHTS {
                    log::warn!("more than {} lights in scene; extra lights ignored", MAX_LIGHTS);
                    continue;
                }
                let kind_tag = if light.kind == LightKind::Point { 1.0 } else { 0.0 };
                packed[count] = GpuLight {
                    position_kind: [light.vector[0], light.vector[1], light.vector[2], kind_tag],
                    color_intensity: [
                        light.color[0],
                        light.color[1],
                        light.color[2],
                        light.intensity,
                    ],
                };
                count += 1;
            }
        }
    }

    (ambient, count as u32, packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_lights_accumulate() {
        let lights = [
            Light::ambient([1.0, 0.5, 0.0], 0.2),
            Light::ambient([0.0, 0.5, 1.0], 0.4),
        ];
        let (ambient, count, _) = pack_lights(&lights);
        assert_eq!(count, 0);
        assert!((ambient[0] - 0.2).abs() < 1e-6);
        assert!((ambient[1] - 0.3).abs() < 1e-6);
        assert!((ambient[2] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_kind_tags() {
        let lights = [
            Light::directional([0.0, -1.0, 0.0], [1.0; 3], 1.0),
            Light::point([2.0, 3.0, 4.0], [1.0; 3], 5.0),
        ];
        let (_, count, packed) = pack_lights(&lights);
        assert_eq!(count, 2);
        assert_eq!(packed[0].position_kind[3], 0.0);
        assert_eq!(packed[1].position_kind[3], 1.0);
        assert_eq!(packed[1].position_kind[..3], [2.0, 3.0, 4.0]);
        assert_eq!(packed[1].color_intensity[3], 5.0);
    }

    #[test]
    fn test_light_overflow_is_dropped() {
        let lights = vec![Light::point([0.0; 3], [1.0; 3], 1.0); MAX_LIGHTS + 3];
        let (_, count, _) = pack_lights(&lights);
        assert_eq!(count as usize, MAX_LIGHTS);
    }
}
