use super::step::PredicateStep;

#[test]
fn kind_predicates() {
    assert!(PredicateStep::Done.is_done());
    assert!(!PredicateStep::Done.is_capture());
    assert!(!PredicateStep::Done.is_string());

    assert!(PredicateStep::Capture(3).is_capture());
    assert!(!PredicateStep::Capture(3).is_string());

    assert!(PredicateStep::String(0).is_string());
    assert!(!PredicateStep::String(0).is_done());
}
