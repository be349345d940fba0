//! Tests for Intent / Dash state machine.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::intent::*;

    /// 0.2² — исторический порог `|v| > 0.2`, выраженный через квадрат длины
    const MIN_MAGNITUDE: f32 = 0.04;

    #[test]
    fn test_intent_default() {
        let intent = Intent::default();
        assert_eq!(intent.state(), MovementState::Idle);
        assert_eq!(intent.last_non_zero_vector, DEFAULT_FACING);
        assert_eq!(intent.desired_vector, Vec2::ZERO);
        assert!(!intent.dash.active);
    }

    #[test]
    fn test_zero_facing_falls_back_to_default() {
        assert_eq!(Intent::new(Vec2::ZERO).last_non_zero_vector, DEFAULT_FACING);
        assert_eq!(Intent::new(Vec2::new(1.0, 0.0)).last_non_zero_vector, Vec2::X);
    }

    #[test]
    fn test_move_above_threshold_enters_moving() {
        let mut intent = Intent::default();
        intent.on_move(Vec2::new(0.6, 0.8), MIN_MAGNITUDE);

        assert_eq!(intent.state(), MovementState::Moving);
        assert_eq!(intent.desired_vector, Vec2::new(0.6, 0.8));
        assert_eq!(intent.last_non_zero_vector, Vec2::new(0.6, 0.8));
    }

    #[test]
    fn test_threshold_compares_squared_magnitude() {
        // |v| = 0.25 > 0.2, |v|² = 0.0625 > 0.04 → движение
        let mut intent = Intent::default();
        intent.on_move(Vec2::new(0.25, 0.0), MIN_MAGNITUDE);
        assert!(intent.is_moving);

        // |v| = 0.15, |v|² = 0.0225 ≤ 0.04 → стоим
        intent.on_move(Vec2::new(0.15, 0.0), MIN_MAGNITUDE);
        assert!(!intent.is_moving);

        // Порог трактуется как квадрат: при пороге 0.2 вектор длины 0.3
        // (|v|² = 0.09) уже не проходит, хотя |v| > 0.2
        intent.on_move(Vec2::new(0.3, 0.0), 0.2);
        assert!(!intent.is_moving);
    }

    #[test]
    fn test_last_direction_survives_neutral_input() {
        let mut intent = Intent::default();
        intent.on_move(Vec2::new(-1.0, 0.0), MIN_MAGNITUDE);
        intent.on_move(Vec2::ZERO, MIN_MAGNITUDE);
        intent.on_move(Vec2::new(0.05, 0.05), MIN_MAGNITUDE); // deadzone

        assert_eq!(intent.state(), MovementState::Idle);
        assert_eq!(intent.desired_vector, Vec2::ZERO);
        assert_eq!(intent.last_non_zero_vector, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_non_finite_input_is_neutral() {
        let mut intent = Intent::default();
        intent.on_move(Vec2::new(1.0, 0.0), MIN_MAGNITUDE);
        intent.on_move(Vec2::new(f32::NAN, 1.0), MIN_MAGNITUDE);

        assert!(!intent.is_moving);
        assert_eq!(intent.last_non_zero_vector, Vec2::X);
    }

    #[test]
    fn test_dash_uses_normalized_last_direction() {
        let mut intent = Intent::default();
        intent.on_move(Vec2::new(3.0, 4.0), MIN_MAGNITUDE);
        intent.on_move(Vec2::ZERO, MIN_MAGNITUDE);

        assert!(intent.on_dash(0.25));
        assert_eq!(intent.state(), MovementState::Dashing);
        assert!((intent.dash.direction - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert_eq!(intent.dash.remaining_time, 0.25);
    }

    #[test]
    fn test_dash_after_stop_without_any_movement_uses_default_facing() {
        let mut intent = Intent::default();
        assert!(intent.on_dash(0.1));
        assert_eq!(intent.dash.direction, DEFAULT_FACING);
    }

    #[test]
    fn test_dash_not_retriggerable_mid_dash() {
        let mut intent = Intent::default();
        intent.on_move(Vec2::X, MIN_MAGNITUDE);
        assert!(intent.on_dash(0.3));
        intent.advance_dash(0.1);

        let before = intent.dash;
        intent.on_move(Vec2::Y, MIN_MAGNITUDE);
        assert!(!intent.on_dash(0.3));

        assert_eq!(intent.dash.remaining_time, before.remaining_time);
        assert_eq!(intent.dash.direction, before.direction);
    }

    #[test]
    fn test_dash_ends_into_moving_or_idle() {
        let mut moving = Intent::default();
        moving.on_move(Vec2::X, MIN_MAGNITUDE);
        moving.on_dash(0.5);
        assert!(!moving.advance_dash(0.25));
        assert!(moving.advance_dash(0.25));
        assert_eq!(moving.state(), MovementState::Moving);

        let mut idle = Intent::default();
        idle.on_move(Vec2::X, MIN_MAGNITUDE);
        idle.on_dash(0.1);
        idle.on_move(Vec2::ZERO, MIN_MAGNITUDE);
        assert!(idle.advance_dash(0.2));
        assert_eq!(idle.state(), MovementState::Idle);
        assert!(!idle.dash.active);
    }

    #[test]
    fn test_dash_can_retrigger_after_end() {
        let mut intent = Intent::default();
        intent.on_dash(0.1);
        intent.advance_dash(0.1);
        assert!(intent.on_dash(0.1));
    }

    #[test]
    fn test_tick_motion_prefers_dash() {
        let mut intent = Intent::default();
        intent.on_move(Vec2::X, MIN_MAGNITUDE);
        assert_eq!(intent.tick_motion(1.0, 5.0), (Vec2::X, 1.0));

        intent.on_move(Vec2::ZERO, MIN_MAGNITUDE);
        intent.on_dash(0.1);
        intent.on_move(Vec2::Y, MIN_MAGNITUDE);
        assert_eq!(intent.tick_motion(1.0, 5.0), (Vec2::X, 5.0));
    }

    #[test]
    fn test_interact_is_one_shot() {
        let mut intent = Intent::default();
        assert!(!intent.take_interact());

        intent.on_interact();
        intent.on_interact();
        assert!(intent.take_interact());
        assert!(!intent.take_interact());
    }
}
