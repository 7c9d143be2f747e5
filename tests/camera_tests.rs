use glam::Vec3;
use watchtower_viewer::camera::{CameraState, PITCH_LIMIT};
use watchtower_viewer::core::{InputEvent, Key};
use watchtower_viewer::viewer::Viewer;

#[cfg(test)]
mod orientation_tests {
    use super::*;

    #[test]
    fn test_pitch_stays_clamped_for_any_magnitude() {
        let mut viewer = Viewer::default();
        viewer.handle_event(InputEvent::mouse_move(0.0, 0.0));

        for (i, y) in [-1.0e6_f32, 5.0e5, -3.0, 1.0e7, 0.0, -9.9e6].iter().enumerate() {
            viewer.handle_event(InputEvent::mouse_move(i as f32 * 100.0, *y));
            let pitch = viewer.camera().pitch();
            assert!(
                (-PITCH_LIMIT..=PITCH_LIMIT).contains(&pitch),
                "Pitch escaped clamp: {}",
                pitch
            );
        }
    }

    #[test]
    fn test_front_is_unit_after_rotation() {
        let mut camera = CameraState::default();
        for (yaw, pitch) in [(13.0, 7.5), (-400.0, 80.0), (0.1, -200.0), (1234.5, 0.0)] {
            camera.rotate(yaw, pitch);
            assert!(
                (camera.front().length() - 1.0).abs() < 1e-5,
                "Front not unit length: {:?}",
                camera.front()
            );
        }
    }

    #[test]
    fn test_first_mouse_event_does_not_rotate() {
        let mut viewer = Viewer::default();
        let before = *viewer.camera();

        viewer.handle_event(InputEvent::mouse_move(9000.0, -4000.0));

        assert_eq!(viewer.camera().yaw(), before.yaw());
        assert_eq!(viewer.camera().pitch(), before.pitch());
        assert_eq!(viewer.camera().front(), before.front());
    }

    #[test]
    fn test_mouse_y_is_inverted() {
        let mut viewer = Viewer::default();
        viewer.handle_event(InputEvent::mouse_move(100.0, 100.0));
        // Cursor moves down the screen: look down
        viewer.handle_event(InputEvent::mouse_move(100.0, 140.0));
        assert!(viewer.camera().pitch() < 0.0);
    }

    #[test]
    fn test_yaw_wraps_visually() {
        let mut full_turn = CameraState::default();
        let mut two_turns = CameraState::default();
        full_turn.rotate(360.0, 0.0);
        two_turns.rotate(720.0, 0.0);

        assert!(
            full_turn.front().abs_diff_eq(two_turns.front(), 1e-5),
            "720 deg: {:?}, 360 deg: {:?}",
            two_turns.front(),
            full_turn.front()
        );
        assert_eq!(two_turns.yaw(), CameraState::default().yaw() + 720.0);
    }
}

#[cfg(test)]
mod movement_tests {
    use super::*;

    #[test]
    fn test_forward_distance_is_frame_rate_independent() {
        for fps in [30.0_f32, 60.0, 144.0] {
            let mut viewer = Viewer::default();
            let start = viewer.camera().position;
            let front = viewer.camera().front();

            viewer.handle_event(InputEvent::press(Key::Forward));
            let frames = fps as usize * 2;
            for _ in 0..frames {
                viewer.update(1.0 / fps);
            }

            let expected = start + front * 5.0 * 2.0;
            assert!(
                viewer.camera().position.abs_diff_eq(expected, 1e-3),
                "At {} fps got {:?}, expected {:?}",
                fps,
                viewer.camera().position,
                expected
            );
        }
    }

    #[test]
    fn test_no_keys_no_motion() {
        let mut viewer = Viewer::default();
        let start = viewer.camera().position;
        for _ in 0..100 {
            viewer.update(0.033);
        }
        assert_eq!(viewer.camera().position, start);
    }

    #[test]
    fn test_released_key_stops_motion() {
        let mut viewer = Viewer::default();
        viewer.handle_event(InputEvent::press(Key::Backward));
        viewer.update(0.5);
        let moved = viewer.camera().position;
        assert!(moved.abs_diff_eq(Vec3::new(0.0, 3.0, 5.5), 1e-5));

        viewer.handle_event(InputEvent::release(Key::Backward));
        viewer.update(0.5);
        assert_eq!(viewer.camera().position, moved);
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let mut viewer = Viewer::default();
        let start = viewer.camera().position;
        viewer.handle_event(InputEvent::press(Key::Forward));
        viewer.handle_event(InputEvent::press(Key::StrafeLeft));
        viewer.update(1.0);

        let distance = (viewer.camera().position - start).length();
        assert!(
            (distance - 5.0 * 2.0_f32.sqrt()).abs() < 1e-4,
            "Diagonal distance {}",
            distance
        );
    }

    #[test]
    fn test_movement_follows_look_direction() {
        let mut viewer = Viewer::default();
        viewer.handle_event(InputEvent::mouse_move(0.0, 0.0));
        // 1800px at 0.05 deg/px = 90 deg of yaw: now facing +X
        viewer.handle_event(InputEvent::mouse_move(1800.0, 0.0));
        viewer.handle_event(InputEvent::press(Key::Forward));
        viewer.update(1.0);

        assert!(viewer
            .camera()
            .position
            .abs_diff_eq(Vec3::new(5.0, 3.0, 3.0), 1e-4));
    }
}
