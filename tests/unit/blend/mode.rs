use super::*;

#[test]
fn every_identifier_parses_back_to_itself() {
    for mode in BlendMode::ALL {
        assert_eq!(mode.as_str().parse::<BlendMode>().unwrap(), mode);
        assert_eq!(mode.to_string(), mode.as_str());
    }
}

#[test]
fn normal_is_an_alias_of_source_over() {
    assert_eq!("normal".parse::<BlendMode>().unwrap(), BlendMode::SourceOver);
    let m: BlendMode = serde_json::from_str("\"normal\"").unwrap();
    assert_eq!(m, BlendMode::SourceOver);
    assert_eq!(serde_json::to_string(&m).unwrap(), "\"source-over\"");
}

#[test]
fn unknown_identifier_is_invalid_blend_mode() {
    let err = "bogus-mode".parse::<BlendMode>().unwrap_err();
    assert!(matches!(err, BlendError::InvalidBlendMode(ref n) if n == "bogus-mode"));
    assert!("Multiply".parse::<BlendMode>().is_err());
}

#[test]
fn bits_are_distinct_and_fit_a_u32() {
    let mut seen = 0u32;
    for mode in BlendMode::ALL {
        assert_eq!(seen & mode.bit(), 0);
        seen |= mode.bit();
    }
    assert_eq!(seen.count_ones(), 28);
}

#[test]
fn kinds_split_into_families() {
    let mut separable = 0;
    let mut non_separable = 0;
    for mode in BlendMode::ALL {
        match mode.kind() {
            FormulaKind::Separable(_) => separable += 1,
            FormulaKind::NonSeparable(_) => non_separable += 1,
            FormulaKind::CopyAlpha | FormulaKind::CopyOpaque => {}
        }
    }
    assert_eq!(separable, 20);
    assert_eq!(non_separable, 6);
    assert_eq!(BlendMode::SourceOver.kind(), FormulaKind::Separable(Separable::Normal));
}
