//! Tests for the passcode services


mod verifier_tests;
