//! Law validators. Each takes the synthesizer under test and a declaration
//! set and returns a report with one result per declaration.

pub mod family;
pub mod idempotence;
pub mod naming;
pub mod ownership;
pub mod roundtrip;

use anyhow::{Context, Result};
use kindgen_codegen::{Synthesizer, TypeFactory};
use kindgen_model::{Declaration, Request, SyntheticMember};

/// Members of one request kind, with the declaration named on failure.
pub(crate) fn members<F: TypeFactory>(
    synth: &Synthesizer<F>,
    decl: &Declaration,
    request: Request,
) -> Result<Vec<SyntheticMember>> {
    synth.synthesize(decl, request).with_context(|| {
        format!(
            "synthesizing {} members of {}",
            request.as_str(),
            decl.qualified_name
        )
    })
}

/// Both request kinds, nested types first.
pub(crate) fn all_members<F: TypeFactory>(
    synth: &Synthesizer<F>,
    decl: &Declaration,
) -> Result<Vec<SyntheticMember>> {
    let mut all = Vec::new();
    for request in Request::ALL {
        all.extend(members(synth, decl, request)?);
    }
    Ok(all)
}
