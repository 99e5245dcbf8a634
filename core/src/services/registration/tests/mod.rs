//! Tests for the registration service

mod service_tests;
