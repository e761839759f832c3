use solace_wizard::Progress;

#[test]
fn percent_is_whole_steps_reached() {
    assert_eq!(Progress::new(1, 8, "Patient Information").percent, 12);
    assert_eq!(Progress::new(4, 8, "Dimensions 1 & 2").percent, 50);
    assert_eq!(Progress::new(8, 8, "Summary").percent, 100);
    assert_eq!(Progress::new(17, 17, "Review & Signatures").percent, 100);
}

#[test]
fn zero_total_does_not_divide_by_zero() {
    assert_eq!(Progress::new(1, 0, "").percent, 0);
}
