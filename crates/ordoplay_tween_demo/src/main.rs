// SPDX-License-Identifier: MIT OR Apache-2.0
//! `OrdoPlay` tween demo - drives the tween engine from a fixed-rate loop.
//!
//! Animates every property of a sprite (alpha, position, scale, rotation and
//! tint), pauses and resumes one animation, cancels another, and logs the
//! sprite state once per simulated second. Set `RUST_LOG` to adjust output.

use std::cell::RefCell;
use std::rc::Rc;

use ordoplay_tween::{
    global, BuiltinCurve, Color, Curve, Keyframe, PropertyTarget, Quat, RateMode, TweenRequest,
    TweenerConfig, Value, Vec2, Vec3,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Simulated frame rate
const FRAME_RATE: f32 = 60.0;

/// Simulated run length in seconds
const RUN_SECONDS: f32 = 4.0;

/// A host object with animatable properties
#[derive(Debug)]
struct Sprite {
    alpha: f32,
    position: Vec2,
    scale: Vec3,
    rotation: Quat,
    tint: Color,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            position: Vec2::new(0.0, 0.0),
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotation: Quat::IDENTITY,
            tint: Color::WHITE,
        }
    }
}

impl PropertyTarget for Sprite {
    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "alpha" => Some(Value::Float(self.alpha)),
            "position" => Some(Value::Vec2(self.position)),
            "scale" => Some(Value::Vec3(self.scale)),
            "rotation" => Some(Value::Rotation(self.rotation)),
            "tint" => Some(Value::Color(self.tint)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: Value) {
        match (name, value) {
            ("alpha", Value::Float(v)) => self.alpha = v,
            ("position", Value::Vec2(v)) => self.position = v,
            ("scale", Value::Vec3(v)) => self.scale = v,
            ("rotation", Value::Rotation(v)) => self.rotation = v,
            ("tint", Value::Color(v)) => self.tint = v,
            _ => tracing::warn!("Sprite ignored write to '{}'", name),
        }
    }
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("ordoplay_tween=debug".parse().unwrap())
        .add_directive("ordoplay_tween_demo=info".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OrdoPlay tween demo v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        tracing::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> ordoplay_tween::Result<()> {
    // A gentle S-curve with a late settle, registered by name
    let settle = Curve::new(vec![
        Keyframe::new(0.0, 0.0, 0.0, 0.0),
        Keyframe::new(0.7, 0.9, 1.0, 1.0),
        Keyframe::new(1.0, 1.0, 0.0, 0.0),
    ])?;
    let engine = global::init(TweenerConfig::default().with_curve("settle", settle));

    let sprite = Rc::new(RefCell::new(Sprite::default()));

    engine.interpolate_float(
        &sprite,
        "alpha",
        TweenRequest::to(1.0, 1.0).curve(BuiltinCurve::EaseIn),
    )?;
    let slide = engine.interpolate_vec2(
        &sprite,
        "position",
        TweenRequest::to(Vec2::new(300.0, 400.0), 250.0)
            .curve("settle")
            .mode(RateMode::Speed),
    )?;
    engine.interpolate_vec3(
        &sprite,
        "scale",
        TweenRequest::to(Vec3::new(2.0, 2.0, 2.0), 1.5).curve(BuiltinCurve::Overshoot),
    )?;
    let spin = engine.interpolate_rotation(
        &sprite,
        "rotation",
        TweenRequest::to(Quat::from_euler(Vec3::new(0.0, 90.0, 45.0)), 3.0)
            .curve(BuiltinCurve::EaseInOut),
    )?;
    engine.interpolate_color(
        &sprite,
        "tint",
        TweenRequest::to(Color::rgba(1.0, 0.2, 0.1, 1.0), 2.0).curve("bouncing"),
    )?;

    tracing::info!("{} tweens running", engine.len());

    let dt = 1.0 / FRAME_RATE;
    let frames = (RUN_SECONDS * FRAME_RATE) as u32;
    for frame in 1..=frames {
        match frame {
            30 => engine.pause(slide)?,
            90 => engine.resume(slide)?,
            120 if engine.exists(spin) => engine.cancel(spin)?,
            _ => {}
        }

        global::tick(dt)?;

        if frame % FRAME_RATE as u32 == 0 {
            let sprite = sprite.borrow();
            tracing::info!(
                "t={:.1}s alpha={:.2} position=({:.1}, {:.1}) scale={:.2} rotation={:?} tint=({:.2}, {:.2}, {:.2}) active={} paused={}",
                frame as f32 * dt,
                sprite.alpha,
                sprite.position.x,
                sprite.position.y,
                sprite.scale.x,
                sprite.rotation.to_euler(),
                sprite.tint.r,
                sprite.tint.g,
                sprite.tint.b,
                engine.active_count(),
                engine.paused_count(),
            );
        }
    }

    let cancelled = global::shutdown();
    tracing::info!(
        "Demo finished; {} tweens still running were cancelled",
        cancelled
    );
    Ok(())
}
