use super::*;

#[test]
fn empty_registry_is_complete_and_has_no_modes() {
    let reg = CapabilityRegistry::empty();
    assert!(reg.modes().is_empty());
    assert!(reg.is_probed());
    assert_eq!(reg.outcome(), ProbeOutcome::Skipped);
}

#[test]
fn membership_and_monotonic_removal() {
    let reg = CapabilityRegistry::with_modes(
        [BlendMode::SourceOver, BlendMode::ColorDodge],
        ProbeOutcome::Pending,
    );
    assert!(reg.contains(BlendMode::ColorDodge));
    assert!(!reg.contains(BlendMode::HardMix));

    assert!(reg.remove(BlendMode::ColorDodge));
    assert!(!reg.remove(BlendMode::ColorDodge));
    assert_eq!(reg.modes(), vec![BlendMode::SourceOver]);
}

#[tokio::test]
async fn probed_resolves_once_finished() {
    let reg = CapabilityRegistry::with_modes([BlendMode::Multiply], ProbeOutcome::Pending);
    assert!(!reg.is_probed());

    let (outcome, ()) = tokio::join!(reg.probed(), async {
        tokio::task::yield_now().await;
        reg.finish(ProbeOutcome::Verified);
    });
    assert_eq!(outcome, ProbeOutcome::Verified);
    assert!(reg.is_probed());
    assert!(reg.contains(BlendMode::Multiply));
}

#[tokio::test]
async fn probed_returns_immediately_when_already_final() {
    let reg = CapabilityRegistry::with_modes([], ProbeOutcome::Disqualified);
    assert_eq!(reg.probed().await, ProbeOutcome::Disqualified);
}
