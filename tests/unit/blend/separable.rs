use super::*;

fn all_pairs() -> impl Iterator<Item = (i32, i32)> {
    (0..=255).flat_map(|s| (0..=255).map(move |d| (s, d)))
}

#[test]
fn multiply_by_white_is_identity() {
    for src in 0..=255 {
        assert_eq!(multiply(src, 255), src);
        assert_eq!(multiply(src, 0), 0);
    }
}

#[test]
fn screen_over_black_is_identity() {
    for src in 0..=255 {
        assert_eq!(screen(src, 0), src);
    }
}

#[test]
fn normal_darken_lighten() {
    assert_eq!(normal(12, 200), 12);
    assert_eq!(darken(12, 200), 12);
    assert_eq!(lighten(12, 200), 200);
}

#[test]
fn color_burn_guards_and_midpoint() {
    assert_eq!(color_burn(0, 255), 255);
    assert_eq!(color_burn(0, 100), 0);
    assert_eq!(color_burn(128, 128), 2);
    assert_eq!(color_burn(255, 100), 100);
}

#[test]
fn color_dodge_guards_and_midpoint() {
    assert_eq!(color_dodge(255, 0), 0);
    assert_eq!(color_dodge(255, 10), 255);
    assert_eq!(color_dodge(128, 100), 200);
    assert_eq!(color_dodge(0, 100), 100);
}

#[test]
fn divide_guards() {
    assert_eq!(divide(0, 0), 0);
    assert_eq!(divide(0, 10), 255);
    assert_eq!(divide(128, 64), 127);
    assert_eq!(divide(10, 200), 255);
}

#[test]
fn linear_family_is_unclamped_where_documented() {
    assert_eq!(linear_dodge(200, 100), 300);
    assert_eq!(linear_light(0, 0), -255);
    assert_eq!(linear_light(255, 255), 509);
    assert_eq!(linear_burn(100, 100), 0);
    assert_eq!(linear_burn(200, 100), 45);
}

#[test]
fn overlay_and_hard_light_extremes() {
    assert_eq!(overlay(200, 0), 0);
    assert_eq!(overlay(128, 255), 255);
    assert_eq!(overlay(0, 255), 254);
    for d in 0..=255 {
        assert_eq!(hard_light(0, d), 0);
        assert_eq!(hard_light(255, d), 255);
    }
}

#[test]
fn soft_light_fixed_points() {
    assert_eq!(soft_light(0, 0), 0);
    assert_eq!(soft_light(100, 255), 255);
    assert_eq!(soft_light(255, 255), 255);
    assert_eq!(soft_light(128, 255), 255);
}

#[test]
fn vivid_light_and_hard_mix_edges() {
    assert_eq!(vivid_light(0, 77), 0);
    assert_eq!(vivid_light(255, 77), 255);
    assert_eq!(hard_mix(0, 200), 0);
    assert_eq!(hard_mix(255, 0), 0);
    assert_eq!(hard_mix(255, 1), 255);
    for (s, d) in all_pairs() {
        let v = hard_mix(s, d);
        assert!(v == 0 || v == 255);
    }
}

#[test]
fn pin_light_picks_by_half() {
    assert_eq!(pin_light(10, 100), 20);
    assert_eq!(pin_light(200, 100), 144);
    assert_eq!(pin_light(200, 250), 250);
}

#[test]
fn difference_exclusion_subtract() {
    assert_eq!(difference(10, 200), 190);
    assert_eq!(difference(200, 10), 190);
    assert_eq!(exclusion(0, 77), 77);
    assert_eq!(exclusion(255, 255), 0);
    assert_eq!(subtract(200, 10), 0);
    assert_eq!(subtract(10, 200), 190);
}

#[test]
fn clamped_formulas_stay_in_byte_range() {
    let clamped = [
        Separable::Darken,
        Separable::Multiply,
        Separable::ColorBurn,
        Separable::LinearBurn,
        Separable::Lighten,
        Separable::ColorDodge,
        Separable::VividLight,
        Separable::PinLight,
        Separable::HardMix,
        Separable::Difference,
        Separable::Subtract,
        Separable::Divide,
    ];
    for f in clamped {
        for (s, d) in all_pairs() {
            let v = blend_channel(f, s, d);
            assert!((0..=255).contains(&v), "{f:?}({s}, {d}) = {v}");
        }
    }
}

#[test]
fn soft_light_keeps_the_sqrt_curve_fractional() {
    assert_eq!(blend_channel(Separable::SoftLight, 131, 174), 175);
    assert_eq!(soft_light(200, 100), 133);
    assert_eq!(soft_light(255, 128), 180);
    assert_eq!(soft_light(192, 64), 96);
    assert_eq!(soft_light(192, 63), 87);
    assert_eq!(soft_light(100, 50), 42);
}

#[test]
fn mid_range_reference_values() {
    assert_eq!(vivid_light(64, 200), 146);
    assert_eq!(vivid_light(100, 150), 122);
    assert_eq!(vivid_light(160, 100), 134);
    assert_eq!(vivid_light(200, 60), 139);
    assert_eq!(vivid_light(10, 250), 192);

    assert_eq!(overlay(100, 200), 188);
    assert_eq!(overlay(50, 128), 50);
    assert_eq!(overlay(200, 255), 255);

    assert_eq!(exclusion(100, 200), 144);
    assert_eq!(exclusion(128, 128), 128);
    assert_eq!(exclusion(30, 240), 214);
}
