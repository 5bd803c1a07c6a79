//! Internal test modules - whitebox tests with crate access
//!
//! Scenario tests that drive the frame loop, the session flow and the layout
//! engine together through the helpers in `crate::test_harness`.
