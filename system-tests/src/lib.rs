// system-tests/src/lib.rs
// ============================================================================
// Module: Backstop System Tests Library
// Description: Shared configuration and helpers for system test scenarios.
// Purpose: Provide common utilities for Backstop suite binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration utilities used by the Backstop
//! suite binaries in `system-tests/tests`. The probe suites run against an
//! in-process emulated backend on loopback, so they are hermetic by default;
//! environment overrides only relocate artifacts or raise timeout floors.
//! Security posture: system-test inputs are untrusted; see
//! `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
