//! Function declaration records.
//!
//! These are the records the specification parser hands to the store. The
//! store trusts every field; `element_count` and `is_unsigned` are taken as
//! the parser computed them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BindResult;

/// The semantic type of a function parameter, as far as overload
/// resolution cares about it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterType {
    /// Whether the underlying element type is unsigned.
    pub is_unsigned: bool,
    /// Fixed array length. Zero means a plain scalar.
    pub element_count: u32,
}

impl ParameterType {
    /// A signed scalar.
    pub const fn scalar() -> Self {
        Self { is_unsigned: false, element_count: 0 }
    }

    /// An unsigned scalar.
    pub const fn unsigned() -> Self {
        Self { is_unsigned: true, element_count: 0 }
    }

    /// A fixed-size array of `count` elements.
    pub const fn array(count: u32) -> Self {
        Self { is_unsigned: false, element_count: count }
    }

    /// Returns the same type with the given signedness.
    pub const fn with_unsigned(mut self, is_unsigned: bool) -> Self {
        self.is_unsigned = is_unsigned;
        self
    }

    /// Returns true for plain scalars.
    pub const fn is_scalar(&self) -> bool {
        self.element_count == 0
    }

    /// Returns true for fixed-size arrays.
    pub const fn is_array(&self) -> bool {
        self.element_count != 0
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_unsigned { "unsigned" } else { "signed" })?;
        if self.is_array() {
            write!(f, "[{}]", self.element_count)?;
        }
        Ok(())
    }
}

/// A named function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: ParameterType,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: ParameterType) -> Self {
        Self { name: name.into(), ty }
    }
}

/// One raw overload of a function, as extracted from the specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// The raw overload name, possibly carrying a type suffix (`glUniform4uiv`).
    pub name: String,
    /// The extension or group this declaration belongs to.
    pub extension: String,
    /// Parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl FunctionDeclaration {
    /// Creates a declaration with no parameters.
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            parameters: Vec::new(),
        }
    }

    /// Appends a parameter, builder style.
    pub fn with_parameter(mut self, name: impl Into<String>, ty: ParameterType) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }

    /// Returns true if any parameter has an unsigned type.
    pub fn has_unsigned_parameter(&self) -> bool {
        self.parameters.iter().any(|p| p.ty.is_unsigned)
    }
}

impl fmt::Display for FunctionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.extension, self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
        }
        write!(f, ")")
    }
}

/// Parses a JSON array of declarations, as emitted by the specification parser.
pub fn load_declarations(json: &str) -> BindResult<Vec<FunctionDeclaration>> {
    Ok(serde_json::from_str(json)?)
}
