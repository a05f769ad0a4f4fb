use super::*;

#[test]
fn only_loading_state_waits_for_dom() {
    assert!(is_document_loading("loading"));
    assert!(!is_document_loading("interactive"));
    assert!(!is_document_loading("complete"));
}
