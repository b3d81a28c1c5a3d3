// Host-side tests for the parameter set and panel descriptors.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod tree_core {
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod params {
        include!("../src/core/params.rs");
    }
}

use tree_core::color::{InvalidColor, Rgb};
use tree_core::params::*;

#[test]
fn defaults() {
    let p = Params::default();
    assert_eq!(p.particle_count, 3500);
    assert_eq!(p.rotation_speed, 0.1);
    assert_eq!(p.twinkle_speed, 3.0);
    assert_eq!(p.global_size, 1.0);
    assert_eq!(p.tree_color.to_hex(), "#00ff41");
    assert_eq!(p.ornament_color.to_hex(), "#ff0033");
    assert_eq!(p.light_color.to_hex(), "#ffd700");
    assert_eq!(p.bloom_strength, 2.0);
    assert_eq!(p.bloom_radius, 0.5);
    assert_eq!(p.bloom_threshold, 0.7);
    assert_eq!(p.snow_speed, 1.0);
    assert_eq!(p.snow_density, 1000);
    assert!(!p.enable_gesture_control);
    assert_eq!(p.gesture_status, "OFFLINE");
}

#[test]
fn every_key_has_exactly_one_descriptor() {
    let keys = [
        ParamKey::EnableGestureControl,
        ParamKey::GestureStatus,
        ParamKey::ParticleCount,
        ParamKey::GlobalSize,
        ParamKey::TreeColor,
        ParamKey::OrnamentColor,
        ParamKey::LightColor,
        ParamKey::RotationSpeed,
        ParamKey::TwinkleSpeed,
        ParamKey::SnowSpeed,
        ParamKey::SnowDensity,
        ParamKey::BloomStrength,
        ParamKey::BloomRadius,
        ParamKey::BloomThreshold,
    ];
    assert_eq!(PARAM_SPECS.len(), keys.len());
    for key in keys {
        assert_eq!(PARAM_SPECS.iter().filter(|s| s.key == key).count(), 1);
        assert_eq!(spec_for(key).key, key);
    }
    let listened: Vec<_> = PARAM_SPECS.iter().filter(|s| s.listen).map(|s| s.key).collect();
    assert_eq!(listened, vec![ParamKey::GestureStatus, ParamKey::GlobalSize]);
}

#[test]
fn counts_clamp_to_slider_range_and_round() {
    let mut p = Params::default();
    assert_eq!(
        p.set(ParamKey::ParticleCount, ParamValue::Number(20_000.0)),
        Ok(SceneChange::TreeDrawRange(15_000))
    );
    assert_eq!(
        p.set(ParamKey::ParticleCount, ParamValue::Number(12.0)),
        Ok(SceneChange::TreeDrawRange(100))
    );
    assert_eq!(
        p.set(ParamKey::SnowDensity, ParamValue::Number(1234.6)),
        Ok(SceneChange::SnowDrawRange(1235))
    );
    assert_eq!(p.snow_density, 1235);
}

#[test]
fn each_setting_reports_its_side_effect() {
    let mut p = Params::default();
    let red = Rgb::from_hex("#ff0000").unwrap();
    let cases = [
        (ParamKey::GlobalSize, ParamValue::Number(2.5), SceneChange::SizeScale(2.5)),
        (ParamKey::TreeColor, ParamValue::Color(red), SceneChange::Recolor),
        (ParamKey::OrnamentColor, ParamValue::Color(red), SceneChange::Recolor),
        (ParamKey::LightColor, ParamValue::Color(red), SceneChange::RecolorWithStar),
        (ParamKey::RotationSpeed, ParamValue::Number(0.5), SceneChange::None),
        (ParamKey::TwinkleSpeed, ParamValue::Number(6.0), SceneChange::Twinkle(6.0)),
        (ParamKey::SnowSpeed, ParamValue::Number(2.0), SceneChange::None),
        (ParamKey::BloomStrength, ParamValue::Number(1.0), SceneChange::Bloom),
        (ParamKey::BloomRadius, ParamValue::Number(0.2), SceneChange::Bloom),
        (ParamKey::BloomThreshold, ParamValue::Number(0.3), SceneChange::Bloom),
        (ParamKey::EnableGestureControl, ParamValue::Flag(true), SceneChange::GestureControl(true)),
    ];
    for (key, value, change) in cases {
        assert_eq!(p.set(key, value.clone()), Ok(change), "{key:?}");
        assert_eq!(p.get(key), value, "{key:?}");
    }
}

#[test]
fn invalid_values_are_rejected_without_side_effects() {
    let mut p = Params::default();
    let before = p.clone();
    assert_eq!(
        p.set(ParamKey::GlobalSize, ParamValue::Number(f32::NAN)),
        Err(ParamError::NotFinite(ParamKey::GlobalSize))
    );
    assert_eq!(
        p.set(ParamKey::GestureStatus, ParamValue::Text("hacked".into())),
        Err(ParamError::ReadOnly(ParamKey::GestureStatus))
    );
    assert_eq!(
        p.set(ParamKey::TreeColor, ParamValue::Number(1.0)),
        Err(ParamError::WrongType {
            key: ParamKey::TreeColor,
            expected: "color"
        })
    );
    assert_eq!(
        p.set(ParamKey::BloomRadius, ParamValue::Flag(true)),
        Err(ParamError::WrongType {
            key: ParamKey::BloomRadius,
            expected: "number"
        })
    );
    assert_eq!(p, before);
}

#[test]
fn mirrored_size_may_leave_the_slider_range() {
    let mut p = Params::default();
    p.mirror_global_size(0.02);
    assert_eq!(p.global_size, 0.02);
    p.mirror_global_size(7.0);
    assert_eq!(p.global_size, 5.0);
    p.mirror_global_size(-1.0);
    assert_eq!(p.global_size, 0.0);
}

#[test]
fn status_text_updates() {
    let mut p = Params::default();
    p.set_gesture_status("SCANNING...");
    assert_eq!(p.get(ParamKey::GestureStatus), ParamValue::Text("SCANNING...".into()));
}

#[test]
fn raw_input_parsing() {
    let slider = spec_for(ParamKey::GlobalSize).control;
    assert_eq!(
        slider.parse_input(ParamKey::GlobalSize, " 2.5 "),
        Ok(ParamValue::Number(2.5))
    );
    assert!(matches!(
        slider.parse_input(ParamKey::GlobalSize, "big"),
        Err(ParamError::Parse { .. })
    ));

    let color = spec_for(ParamKey::TreeColor).control;
    assert_eq!(
        color.parse_input(ParamKey::TreeColor, "#FFD700"),
        Ok(ParamValue::Color(Rgb::from_srgb8(0xff, 0xd7, 0x00)))
    );
    assert_eq!(
        color.parse_input(ParamKey::TreeColor, "#fff"),
        Err(ParamError::Color(InvalidColor("#fff".into())))
    );

    let toggle = spec_for(ParamKey::EnableGestureControl).control;
    assert_eq!(
        toggle.parse_input(ParamKey::EnableGestureControl, "true"),
        Ok(ParamValue::Flag(true))
    );
    assert_eq!(
        toggle.parse_input(ParamKey::EnableGestureControl, "false"),
        Ok(ParamValue::Flag(false))
    );

    let status = spec_for(ParamKey::GestureStatus).control;
    assert!(status.parse_input(ParamKey::GestureStatus, "x").is_err());
}

#[test]
fn display_formats() {
    let count = spec_for(ParamKey::ParticleCount).control;
    let size = spec_for(ParamKey::GlobalSize).control;
    assert_eq!(display_value(&ParamValue::Number(3500.0), &count), "3500");
    assert_eq!(display_value(&ParamValue::Number(1.0), &size), "1.00");
    assert_eq!(
        display_value(&ParamValue::Color(Rgb::from_hex("00ff41").unwrap()), &Control::Color),
        "#00ff41"
    );
}

#[test]
fn hex_colors_are_linearized() {
    let white = Rgb::from_hex("#ffffff").unwrap();
    assert!((white.r - 1.0).abs() < 1e-6);
    let mid = Rgb::from_hex("#808080").unwrap();
    assert!((mid.g - 0.2158).abs() < 1e-3);
    assert_eq!("#ff0033".parse::<Rgb>().unwrap().to_string(), "#ff0033");
    assert!(Rgb::from_hex("#gg0000").is_err());
    assert!(Rgb::from_hex("#12345").is_err());
}
