// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end tween lifecycles through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use ordoplay_tween::{
    global, BuiltinCurve, Color, PropertyTarget, Quat, TweenError, TweenRequest, Tweener,
    TweenerConfig, Value, Vec2, Vec3,
};

#[derive(Debug, Default)]
struct Node {
    opacity: f32,
    offset: Vec2,
    rotation: Quat,
    color: Color,
    writes: u32,
}

impl PropertyTarget for Node {
    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "opacity" => Some(Value::Float(self.opacity)),
            "offset" => Some(Value::Vec2(self.offset)),
            "rotation" => Some(Value::Rotation(self.rotation)),
            "color" => Some(Value::Color(self.color)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: Value) {
        self.writes += 1;
        match (name, value) {
            ("opacity", Value::Float(v)) => self.opacity = v,
            ("offset", Value::Vec2(v)) => self.offset = v,
            ("rotation", Value::Rotation(v)) => self.rotation = v,
            ("color", Value::Color(v)) => self.color = v,
            _ => panic!("unexpected write to {name}"),
        }
    }
}

fn node() -> Rc<RefCell<Node>> {
    Rc::new(RefCell::new(Node::default()))
}

#[test]
fn test_every_builtin_reaches_goal_exactly() {
    let engine = Tweener::new();
    for builtin in BuiltinCurve::ALL {
        let target = node();
        engine
            .interpolate_float(
                &target,
                "opacity",
                TweenRequest::to(0.37, 0.9).starting_at(0.11).curve(builtin),
            )
            .unwrap();

        for _ in 0..7 {
            engine.tick(0.15);
        }
        assert_eq!(target.borrow().opacity, 0.37, "{}", builtin.name());
        assert!(engine.is_empty(), "{}", builtin.name());
    }
}

#[test]
fn test_pause_is_equivalent_to_skipping_ticks() {
    let engine = Tweener::new();
    let paused = node();
    let reference = node();

    let request = TweenRequest::to(Vec2::new(10.0, -4.0), 2.0)
        .starting_at(Vec2::new(0.0, 0.0))
        .curve(BuiltinCurve::EaseInOut);
    let id = engine
        .interpolate_vec2(&paused, "offset", request.clone())
        .unwrap();

    engine.tick(0.3);
    engine.pause(id).unwrap();
    for _ in 0..5 {
        engine.tick(0.3);
    }
    engine.resume(id).unwrap();
    engine.tick(0.3);

    let other = Tweener::new();
    other
        .interpolate_vec2(&reference, "offset", request)
        .unwrap();
    other.tick(0.3);
    other.tick(0.3);

    assert_eq!(paused.borrow().offset, reference.borrow().offset);
}

#[test]
fn test_completion_writes_once_and_stops() {
    let engine = Tweener::with_config(TweenerConfig {
        snap_on_create: false,
        ..Default::default()
    });
    let target = node();
    engine
        .interpolate_color(&target, "color", TweenRequest::to(Color::WHITE, 0.5))
        .unwrap();

    engine.tick(0.25);
    engine.tick(0.25);
    assert_eq!(target.borrow().writes, 2);
    assert_eq!(target.borrow().color, Color::WHITE);

    engine.tick(0.25);
    assert_eq!(target.borrow().writes, 2);
}

#[test]
fn test_rotation_blends_through_euler_angles() {
    let engine = Tweener::new();
    let target = node();
    let goal = Quat::from_euler(Vec3::new(0.0, 90.0, 0.0));
    engine
        .interpolate_rotation(
            &target,
            "rotation",
            TweenRequest::to(goal, 1.0).starting_at(Quat::IDENTITY),
        )
        .unwrap();

    engine.tick(0.5);
    let halfway = target.borrow().rotation;
    let expected = Quat::from_euler(Vec3::new(0.0, 45.0, 0.0));
    assert!(halfway.approx_eq_rotation(&expected, 1e-4));

    engine.tick(0.5);
    assert_eq!(target.borrow().rotation, goal);
}

#[test]
fn test_speed_mode_and_cancel() {
    let engine = Tweener::new();
    let target = node();
    let id = engine
        .interpolate_float(
            &target,
            "opacity",
            TweenRequest::to(10.0, 5.0).starting_at(0.0).at_speed(),
        )
        .unwrap();

    engine.tick(1.0);
    assert_eq!(target.borrow().opacity, 5.0);

    engine.cancel(id).unwrap();
    engine.tick(1.0);
    assert_eq!(target.borrow().opacity, 5.0);
    assert!(matches!(engine.cancel(id), Err(TweenError::UnknownId(_))));
}

#[test]
fn test_errors_leave_no_task_behind() {
    let engine = Tweener::new();
    let target = node();

    let missing = engine.interpolate_float(&target, "missing", TweenRequest::to(1.0, 1.0));
    assert!(matches!(missing, Err(TweenError::PropertyNotFound { .. })));

    let mismatch = engine.interpolate_vec3(&target, "offset", TweenRequest::to(Vec3::default(), 1.0));
    assert!(matches!(mismatch, Err(TweenError::TypeMismatch { .. })));

    assert!(engine.is_empty());
    assert_eq!(target.borrow().writes, 0);
}

#[test]
fn test_config_file_curves() {
    let path = std::env::temp_dir().join(format!("ordoplay_tween_{}.ron", std::process::id()));
    std::fs::write(
        &path,
        r#"(
            first_id: 1000,
            curves: {
                "hold": [
                    (time: 0.0, value: 0.0, in_tangent: 0.0, out_tangent: 0.0),
                    (time: 0.5, value: 0.0, in_tangent: 0.0, out_tangent: 0.0),
                    (time: 1.0, value: 1.0, in_tangent: 0.0, out_tangent: 0.0),
                ],
            },
        )"#,
    )
    .unwrap();
    let config = TweenerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let engine = Tweener::with_config(config);
    let target = node();
    let id = engine
        .interpolate_float(
            &target,
            "opacity",
            TweenRequest::to(1.0, 1.0).starting_at(0.0).curve("hold"),
        )
        .unwrap();
    assert_eq!(id.raw(), 1000);

    engine.tick(0.4);
    assert_eq!(target.borrow().opacity, 0.0);
    engine.tick(0.6);
    assert_eq!(target.borrow().opacity, 1.0);
}

#[test]
fn test_global_engine() {
    let target = node();
    let before = global::engine();
    assert!(matches!(before, Err(TweenError::Uninitialized)));

    global::init(TweenerConfig::default());
    let id = global::engine()
        .unwrap()
        .interpolate_float(&target, "opacity", TweenRequest::to(1.0, 1.0).starting_at(0.0))
        .unwrap();
    global::tick(0.5).unwrap();
    assert_eq!(target.borrow().opacity, 0.5);
    assert!(global::engine().unwrap().exists(id));

    assert_eq!(global::shutdown(), 1);
    assert!(matches!(global::tick(0.5), Err(TweenError::Uninitialized)));
}
