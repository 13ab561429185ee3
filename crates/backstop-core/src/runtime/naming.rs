// crates/backstop-core/src/runtime/naming.rs
// ============================================================================
// Module: Backstop Random Naming
// Description: Fixed-alphabet random names for per-run unique emails.
// Purpose: Avoid account collisions within a single suite run.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! Sign-up probes need an email the backend has not seen during the run.
//! Names are drawn from a fixed lowercase alphabet at a fixed length, which
//! keeps collision odds negligible within one run; nothing here guarantees
//! uniqueness across runs, and no such guarantee is required.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::Rng;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Alphabet names are drawn from.
pub const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Fixed length of generated names.
pub const NAME_LENGTH: usize = 4;

// ============================================================================
// SECTION: Generators
// ============================================================================

/// Draws a random name from the fixed alphabet using the given generator.
#[must_use]
pub fn random_name_with<R: Rng>(rng: &mut R) -> String {
    let mut name = String::with_capacity(NAME_LENGTH);
    for _ in 0..NAME_LENGTH {
        let index = rng.gen_range(0..NAME_ALPHABET.len());
        name.push(char::from(NAME_ALPHABET[index]));
    }
    name
}

/// Draws a random name from the fixed alphabet.
#[must_use]
pub fn random_name() -> String {
    random_name_with(&mut rand::thread_rng())
}

/// Builds a fresh email address with a random local part at the given domain.
#[must_use]
pub fn random_email(domain: &str) -> String {
    format!("{}@{domain}", random_name())
}
