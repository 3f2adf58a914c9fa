//! Pointer attraction for the featured project's call-to-action.

pub const STRENGTH: f64 = 0.3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MagneticOffset {
    pub x: f64,
    pub y: f64,
}

impl MagneticOffset {
    pub const REST: Self = Self { x: 0.0, y: 0.0 };

    /// Offset for a pointer at `(pointer_x, pointer_y)` over a button whose
    /// bounding box starts at `(left, top)`.
    pub fn follow(pointer_x: f64, pointer_y: f64, left: f64, top: f64, width: f64, height: f64) -> Self {
        let centre_x = left + width / 2.0;
        let centre_y = top + height / 2.0;
        Self {
            x: (pointer_x - centre_x) * STRENGTH,
            y: (pointer_y - centre_y) * STRENGTH,
        }
    }

    pub fn to_css(self) -> String {
        format!("transform: translate({:.2}px, {:.2}px);", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_toward_the_pointer_at_thirty_percent() {
        let offset = MagneticOffset::follow(160.0, 40.0, 100.0, 20.0, 100.0, 40.0);
        assert!((offset.x - 3.0).abs() < 1e-9);
        assert!((offset.y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn centred_pointer_and_rest_are_still() {
        assert_eq!(MagneticOffset::follow(50.0, 50.0, 0.0, 0.0, 100.0, 100.0), MagneticOffset::REST);
        assert_eq!(MagneticOffset::REST.to_css(), "transform: translate(0.00px, 0.00px);");
    }
}
