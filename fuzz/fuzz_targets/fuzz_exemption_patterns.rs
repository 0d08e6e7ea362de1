//! Fuzz target for config exemption matching.
//!
//! Invalid globs are rejected at construction; matching must never panic.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_exemption_patterns
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use polaris_validator::{Exemption, NamePatterns};

#[derive(Arbitrary, Debug)]
struct ExemptionInput {
    namespace: Option<String>,
    controller_names: Vec<String>,
    container_names: Vec<String>,
    rules: Vec<String>,
    check_id: String,
    object_namespace: String,
    object_name: String,
    container: Option<String>,
}

fuzz_target!(|input: ExemptionInput| {
    if input.controller_names.len() > 20 || input.container_names.len() > 20 {
        return;
    }
    let (Ok(controller_names), Ok(container_names)) = (
        NamePatterns::new(input.controller_names),
        NamePatterns::new(input.container_names),
    ) else {
        return;
    };
    let exemption = Exemption {
        namespace: input.namespace,
        controller_names,
        container_names,
        rules: input.rules,
    };
    let _ = exemption.applies(
        &input.check_id,
        &input.object_namespace,
        &input.object_name,
        input.container.as_deref(),
    );
});
