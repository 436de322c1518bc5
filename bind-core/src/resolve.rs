//! Conflict resolution between overloads of the same function.
//!
//! When the store finds that a candidate describes a function it already
//! holds, the resolver decides which of the two becomes the canonical entry.
//!
//! # Rules
//!
//! Each rule inspects `(existing, candidate)` and may vote to replace the
//! existing entry. Votes are OR-ed: a single vote replaces, nothing vetoes.
//!
//! 1. **Unsigned naming**: move toward the variant whose name agrees with its
//!    parameter signedness. An existing entry with unsigned parameters but a
//!    signed-looking name loses to a candidate with an unsigned-looking name,
//!    and an existing entry without unsigned parameters but an
//!    unsigned-looking name loses to a candidate with a signed-looking one.
//! 2. **Scalar regression**: if any pair of same-named parameters goes from an
//!    array in the existing entry to a scalar in the candidate, replace.
//!
//! The direction of rule 2 favours the scalar variant. It is kept as the
//! generator has always behaved; disable it through [`Rules`] to compare.

use bitflags::bitflags;
use tracing::trace;

use crate::config::ResolverConfig;
use crate::decl::FunctionDeclaration;
use crate::naming::is_unsigned_name;

bitflags! {
    /// A set of resolution rules.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Rules: u8 {
        /// Prefer the variant whose name matches its parameter signedness.
        const UNSIGNED_NAMING = 1 << 0;
        /// Prefer a scalar candidate over an array entry for a same-named parameter.
        const SCALAR_REGRESSION = 1 << 1;
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules::all()
    }
}

/// The outcome of comparing two overloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the existing entry and discard the candidate.
    KeepExisting,
    /// Overwrite the existing entry with the candidate.
    Replace,
}

/// Picks the canonical overload among structurally equal declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictResolver {
    rules: Rules,
}

impl ConflictResolver {
    /// Creates a resolver with every rule enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver that only applies the given rules.
    pub fn with_rules(rules: Rules) -> Self {
        Self { rules }
    }

    /// Creates a resolver from a loaded configuration.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::with_rules(config.rules())
    }

    /// The rules this resolver applies.
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Returns the enabled rules that vote to replace `existing` with `candidate`.
    pub fn votes(&self, existing: &FunctionDeclaration, candidate: &FunctionDeclaration) -> Rules {
        let mut votes = Rules::empty();

        if self.rules.contains(Rules::UNSIGNED_NAMING) && unsigned_naming_vote(existing, candidate) {
            votes |= Rules::UNSIGNED_NAMING;
        }
        if self.rules.contains(Rules::SCALAR_REGRESSION) && scalar_regression_vote(existing, candidate) {
            votes |= Rules::SCALAR_REGRESSION;
        }

        votes
    }

    /// Decides which of two structurally equal declarations to keep.
    pub fn resolve(&self, existing: &FunctionDeclaration, candidate: &FunctionDeclaration) -> Resolution {
        let votes = self.votes(existing, candidate);
        trace!(
            existing = %existing.name,
            candidate = %candidate.name,
            votes = ?votes,
            "resolved overload conflict"
        );

        if votes.is_empty() {
            Resolution::KeepExisting
        } else {
            Resolution::Replace
        }
    }
}

fn unsigned_naming_vote(existing: &FunctionDeclaration, candidate: &FunctionDeclaration) -> bool {
    let existing_unsigned_params = existing.has_unsigned_parameter();
    let existing_unsigned_name = is_unsigned_name(&existing.name);
    let candidate_unsigned_name = is_unsigned_name(&candidate.name);

    (existing_unsigned_params && !existing_unsigned_name && candidate_unsigned_name)
        || (!existing_unsigned_params && existing_unsigned_name && !candidate_unsigned_name)
}

fn scalar_regression_vote(existing: &FunctionDeclaration, candidate: &FunctionDeclaration) -> bool {
    existing.parameters.iter().any(|old| {
        candidate
            .parameters
            .iter()
            .filter(|new| new.name == old.name)
            .any(|new| new.ty.is_scalar() && old.ty.is_array())
    })
}
