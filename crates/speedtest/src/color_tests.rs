#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use termcolor::Color;

// NO_COLOR and COLOR handling is covered in tests/specs.rs, where each
// case runs in its own process.

#[test]
fn scheme_group_name_is_bold() {
    assert!(scheme::group_name().bold());
}

#[test]
fn scheme_test_name_is_cyan() {
    assert_eq!(scheme::test_name().fg(), Some(&Color::Cyan));
}

#[test]
fn scheme_successes_is_green() {
    assert_eq!(scheme::successes().fg(), Some(&Color::Green));
}

#[test]
fn scheme_failures_is_red_bold() {
    let spec = scheme::failures();
    assert_eq!(spec.fg(), Some(&Color::Red));
    assert!(spec.bold());
}

#[test]
fn scheme_average_is_yellow() {
    assert_eq!(scheme::average().fg(), Some(&Color::Yellow));
}

#[test]
fn scheme_filter_has_no_color() {
    let spec = scheme::filter();
    assert!(spec.fg().is_none());
    assert!(!spec.bold());
}
