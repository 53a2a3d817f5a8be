// ABOUTME: Shared utility functions for sitedesk
// ABOUTME: Identifier generation

use crate::constants::GENERATED_ID_LENGTH;

/// Generate a unique identifier of the form `<prefix>-<random>`
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, nanoid::nanoid!(GENERATED_ID_LENGTH))
}
