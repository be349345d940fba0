//! Circle body — коллайдер движущегося агента

use bevy::prelude::*;

/// Круглое тело агента в 2D сцене
///
/// Центр круга = `position.xy + offset`. `position.z` — глубина (sorting),
/// движение её никогда не меняет.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CircleBody {
    pub position: Vec3,
    pub radius: f32,
    /// Локальный offset коллайдера относительно pivot спрайта
    pub offset: Vec2,
}

impl CircleBody {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius,
            offset: Vec2::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Центр круга в world space
    pub fn center(&self) -> Vec2 {
        self.position.truncate() + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_includes_offset() {
        let body = CircleBody::new(Vec3::new(1.0, 2.0, 5.0), 0.5).with_offset(Vec2::new(0.0, -0.25));
        assert_eq!(body.center(), Vec2::new(1.0, 1.75));
    }
}
