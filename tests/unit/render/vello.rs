use super::*;

#[test]
fn accepts_exactly_the_mix_backed_modes() {
    let backend = VelloBackend::new();
    let accepted: Vec<_> = BlendMode::ALL
        .iter()
        .filter(|m| {
            backend.round_trip_operation(m.as_str()).unwrap().as_deref() == Some(m.as_str())
        })
        .collect();
    assert_eq!(accepted.len(), 16);
    assert!(accepted.contains(&&BlendMode::ColorDodge));
    assert!(!accepted.contains(&&BlendMode::LinearDodge));
    assert_eq!(backend.round_trip_operation("bogus-mode").unwrap(), None);
}

#[test]
fn draw_rejects_modes_it_does_not_accept() {
    let src = PixelBuffer::filled(2, 2, [255, 0, 0, 255]);
    let mut dest = PixelBuffer::filled(2, 2, [0, 0, 255, 255]);
    let err = VelloBackend::new()
        .draw(&mut dest, &src, CopyRect::at(0, 0, 2, 2), 1.0, BlendMode::HardMix)
        .unwrap_err();
    assert!(matches!(err, BlendError::Backend(_)));
}

#[test]
fn draw_window_clips_against_both_buffers() {
    let src = PixelBuffer::new(4, 4);
    let dest = PixelBuffer::new(6, 6);
    let w = DrawWindow::new(
        CopyRect {
            src_x: -1,
            src_y: 0,
            dest_x: 4,
            dest_y: -2,
            width: 4,
            height: 4,
        },
        &src,
        &dest,
    )
    .unwrap();
    assert_eq!((w.x0, w.y0, w.x1, w.y1), (5, 0, 6, 2));
    assert!(DrawWindow::new(CopyRect::at(6, 0, 4, 4), &src, &dest).is_none());
}

#[test]
fn premultiply_round_trip_is_exact_for_opaque_pixels() {
    for c in 0..=255u8 {
        let px = [c, 255 - c, c / 3, 255];
        let premul = [
            mul_div255(px[0], 255),
            mul_div255(px[1], 255),
            mul_div255(px[2], 255),
            255,
        ];
        assert_eq!(unpremultiply(premul), px);
    }
    assert_eq!(unpremultiply([10, 10, 10, 0]), [0, 0, 0, 0]);
}

#[test]
fn source_over_writes_only_the_window() {
    let src = PixelBuffer::filled(2, 2, [255, 0, 0, 255]);
    let mut dest = PixelBuffer::filled(4, 4, [0, 0, 255, 255]);
    VelloBackend::new()
        .draw(&mut dest, &src, CopyRect::at(1, 1, 2, 2), 1.0, BlendMode::SourceOver)
        .unwrap();
    for y in 0..4 {
        for x in 0..4 {
            let px = dest.pixel(x, y).unwrap();
            if (1..3).contains(&x) && (1..3).contains(&y) {
                assert!(px[0] >= 254 && px[2] <= 1 && px[3] == 255, "({x}, {y}) {px:?}");
            } else {
                assert_eq!(px, [0, 0, 255, 255], "({x}, {y})");
            }
        }
    }
}
