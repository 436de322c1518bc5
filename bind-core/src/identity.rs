//! Structural identity between declarations.
//!
//! The store needs to know when a candidate describes the same logical
//! function as an entry it already holds. That notion is supplied by the
//! caller through [`SignatureIdentity`]; [`OverloadIdentity`] is the default.

use crate::decl::FunctionDeclaration;
use crate::naming::split_overload;

/// Decides whether two declarations describe the same logical function.
///
/// Implementations must be consistent: the store relies on the answer being
/// stable for the same pair of declarations.
pub trait SignatureIdentity {
    fn same_function(&self, a: &FunctionDeclaration, b: &FunctionDeclaration) -> bool;
}

impl<F> SignatureIdentity for F
where
    F: Fn(&FunctionDeclaration, &FunctionDeclaration) -> bool,
{
    fn same_function(&self, a: &FunctionDeclaration, b: &FunctionDeclaration) -> bool {
        self(a, b)
    }
}

/// The default identity: compatible overload names and equal parameter names.
///
/// Names compare by stem and, when both carry one, by the element type of
/// their suffix. Signedness, count and vector markers are ignored, so
/// `glUniform1i` and `glUniform1uiv` are the same function while
/// `glUniform1i` and `glUniform1f` are not. A name without a suffix
/// (`glTexImage`) matches any suffixed variant of its stem. Parameter types
/// are not compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverloadIdentity;

impl SignatureIdentity for OverloadIdentity {
    fn same_function(&self, a: &FunctionDeclaration, b: &FunctionDeclaration) -> bool {
        split_overload(&a.name).is_compatible(&split_overload(&b.name))
            && a.parameters.len() == b.parameters.len()
            && a.parameters
                .iter()
                .zip(&b.parameters)
                .all(|(pa, pb)| pa.name == pb.name)
    }
}
