use crate::error::EngineError;

/// How the struck edge of a hit cell is determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntersectionMethod {
    /// Corner-angle classification and exact edge intercept.
    Exact,
    /// Quadrant of the sample point around the cell centre. Cheaper, wrong near corners.
    Fast,
}

/// Render settings that stay fixed between ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Framebuffer width in pixels.
    pub pixwidth: usize,
    /// Framebuffer height in pixels.
    pub pixheight: usize,
    /// Horizontal field of view at start-up, radians.
    pub initial_fov: f32,
    /// Rays give up here, and brightness reaches 0.
    pub black_distance: f32,
    /// Ray march increment in world units.
    pub step_size: f32,
    /// Sprite texels with alpha at or below this are transparent.
    pub alpha_threshold: u8,
    pub intersection: IntersectionMethod,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixwidth: 320,
            pixheight: 200,
            initial_fov: 80f32.to_radians(),
            black_distance: 4.0,
            step_size: 0.02,
            alpha_threshold: 200,
            intersection: IntersectionMethod::Exact,
        }
    }
}

impl RenderConfig {
    pub fn new(pixwidth: usize, pixheight: usize) -> Self {
        Self {
            pixwidth,
            pixheight,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.pixwidth == 0 || self.pixheight == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "framebuffer is {}x{}",
                self.pixwidth, self.pixheight
            )));
        }
        if !(self.black_distance > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "black distance {} must be positive",
                self.black_distance
            )));
        }
        if !(self.step_size > 0.0) || self.step_size > self.black_distance {
            return Err(EngineError::InvalidConfig(format!(
                "step size {} must be in (0, black distance]",
                self.step_size
            )));
        }
        if !(self.initial_fov > 0.0 && self.initial_fov < std::f32::consts::PI) {
            return Err(EngineError::InvalidConfig(format!(
                "fov {} rad must be in (0, pi)",
                self.initial_fov
            )));
        }
        Ok(())
    }

    /// Linear distance fog: 1 at the eye, 0 from `black_distance` on.
    #[inline]
    pub fn brightness(&self, distance: f32) -> f32 {
        (1.0 - distance / self.black_distance).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_is_monotone_and_bounded() {
        let cfg = RenderConfig::default();
        let mut prev = f32::INFINITY;
        for i in 0..200 {
            let d = i as f32 * 0.05;
            let b = cfg.brightness(d);
            assert!((0.0..=1.0).contains(&b));
            assert!(b <= prev);
            if d >= cfg.black_distance {
                assert_eq!(b, 0.0);
            }
            prev = b;
        }
        assert_eq!(cfg.brightness(0.0), 1.0);
        assert_eq!(cfg.brightness(2.0), 0.5);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(RenderConfig::default().validate().is_ok());
        assert!(RenderConfig::new(0, 10).validate().is_err());
        let mut cfg = RenderConfig::default();
        cfg.step_size = 0.0;
        assert!(cfg.validate().is_err());
        let mut cfg = RenderConfig::default();
        cfg.black_distance = f32::NAN;
        assert!(cfg.validate().is_err());
        let mut cfg = RenderConfig::default();
        cfg.initial_fov = 4.0;
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidConfig(_))));
    }
}
