use super::*;

fn full(w: usize, h: usize) -> Region {
    Region {
        src_x: 0,
        src_y: 0,
        dest_x: 0,
        dest_y: 0,
        width: w,
        height: h,
    }
}

fn gradient(w: u32, h: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let v = ((x * 37 + y * 91) % 256) as u8;
            buf.set_pixel(x, y, [v, 255 - v, v / 2, 255]).unwrap();
        }
    }
    buf
}

#[test]
fn copy_alpha_touches_only_alpha() {
    let src = PixelBuffer::filled(2, 2, [1, 2, 3, 200]);
    let mut dest = PixelBuffer::filled(2, 2, [50, 60, 70, 10]);
    blend_region(&mut dest, &src, full(2, 2), 0.5, BlendMode::CopyAlpha).unwrap();
    for px in dest.as_bytes().chunks_exact(4) {
        assert_eq!(px, &[50, 60, 70, 100]);
    }
}

#[test]
fn copy_opaque_copies_color_and_sets_constant_alpha() {
    let src = PixelBuffer::filled(2, 2, [1, 2, 3, 9]);
    let mut dest = PixelBuffer::filled(2, 2, [50, 60, 70, 10]);
    blend_region(&mut dest, &src, full(2, 2), 0.5, BlendMode::CopyOpaque).unwrap();
    for px in dest.as_bytes().chunks_exact(4) {
        assert_eq!(px, &[1, 2, 3, 127]);
    }
}

#[test]
fn source_over_with_opaque_source_copies_it() {
    let src = gradient(4, 3);
    let mut dest = PixelBuffer::filled(4, 3, [9, 9, 9, 77]);
    blend_region(&mut dest, &src, full(4, 3), 1.0, BlendMode::SourceOver).unwrap();
    assert_eq!(dest, src);
}

#[test]
fn multiply_onto_opaque_white_yields_source() {
    let src = gradient(4, 3);
    let mut dest = PixelBuffer::filled(4, 3, [255, 255, 255, 255]);
    blend_region(&mut dest, &src, full(4, 3), 1.0, BlendMode::Multiply).unwrap();
    assert_eq!(dest, src);
}

#[test]
fn screen_onto_opaque_black_yields_source() {
    let src = gradient(4, 3);
    let mut dest = PixelBuffer::filled(4, 3, [0, 0, 0, 255]);
    blend_region(&mut dest, &src, full(4, 3), 1.0, BlendMode::Screen).unwrap();
    assert_eq!(dest, src);
}

#[test]
fn non_separable_modes_use_the_whole_triple() {
    let src = PixelBuffer::filled(1, 1, [255, 0, 0, 255]);
    let mut dest = PixelBuffer::filled(1, 1, [0, 0, 255, 255]);
    blend_region(&mut dest, &src, full(1, 1), 1.0, BlendMode::DarkerColor).unwrap();
    assert_eq!(dest.pixel(0, 0), Some([0, 0, 255, 255]));

    blend_region(&mut dest, &src, full(1, 1), 1.0, BlendMode::LighterColor).unwrap();
    assert_eq!(dest.pixel(0, 0), Some([255, 0, 0, 255]));
}

#[test]
fn only_the_region_is_written() {
    let src = PixelBuffer::filled(2, 2, [200, 100, 50, 255]);
    let mut dest = PixelBuffer::filled(4, 4, [0, 0, 0, 0]);
    let region = Region {
        src_x: 0,
        src_y: 0,
        dest_x: 1,
        dest_y: 2,
        width: 2,
        height: 2,
    };
    blend_region(&mut dest, &src, region, 1.0, BlendMode::SourceOver).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            let inside = (1..3).contains(&x) && (2..4).contains(&y);
            let expected = if inside { [200, 100, 50, 255] } else { [0, 0, 0, 0] };
            assert_eq!(dest.pixel(x, y), Some(expected), "({x}, {y})");
        }
    }
}

#[test]
fn zero_alpha_leaves_destination_untouched_for_blend_formulas() {
    let src = gradient(3, 3);
    let before = PixelBuffer::filled(3, 3, [10, 120, 230, 180]);
    for mode in BlendMode::ALL {
        if matches!(mode, BlendMode::CopyAlpha | BlendMode::CopyOpaque) {
            continue;
        }
        let mut dest = before.clone();
        blend_region(&mut dest, &src, full(3, 3), 0.0, mode).unwrap();
        assert_eq!(dest, before, "{mode}");
    }
}

#[test]
fn oversized_region_is_rejected_before_writing() {
    let src = PixelBuffer::filled(2, 2, [1, 1, 1, 255]);
    let mut dest = PixelBuffer::filled(2, 2, [5, 5, 5, 5]);
    let err = blend_region(&mut dest, &src, full(3, 2), 1.0, BlendMode::SourceOver).unwrap_err();
    assert!(matches!(err, BlendError::Validation(_)));
    assert_eq!(dest, PixelBuffer::filled(2, 2, [5, 5, 5, 5]));
}
