//! Field-code registry and variable name resolution.
//!
//! The registry is a fixed table built once from [`FIELD_CODES`]; lookups in
//! both directions and the full table are exposed as separate functions.

use crate::constants::{
    DATE_CODE, FIELD_CODES, GRAIN_TYPE_CODE, HEIGHT_CODE, THICKNESS_COLUMN, VARIABLE_ALIASES,
};
use crate::error::{Result, SnowgridError};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static CODE_TO_NAME: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| FIELD_CODES.iter().copied().collect());

static NAME_TO_CODE: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    FIELD_CODES
        .iter()
        .map(|&(code, name)| (name, code))
        .collect()
});

/// Variable name registered for a field code
pub fn name_for_code(code: &str) -> Result<&'static str> {
    CODE_TO_NAME
        .get(code)
        .copied()
        .ok_or_else(|| SnowgridError::UnknownCode {
            code: code.to_string(),
        })
}

/// Field code registered for a variable name
pub fn code_for_name(name: &str) -> Result<&'static str> {
    NAME_TO_CODE
        .get(name)
        .copied()
        .ok_or_else(|| SnowgridError::UnknownName {
            name: name.to_string(),
        })
}

/// Every registered code with its variable name, ordered by code
pub fn all_entries() -> &'static BTreeMap<&'static str, &'static str> {
    &CODE_TO_NAME
}

/// A variable a caller can ask for: a decoded field or the derived thickness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    Field {
        code: &'static str,
        name: &'static str,
    },
    Thickness,
}

impl Variable {
    /// Canonical column name of this variable in a profile
    pub fn name(&self) -> &'static str {
        match self {
            Variable::Field { name, .. } => name,
            Variable::Thickness => THICKNESS_COLUMN,
        }
    }

    /// Field code to read from the file, if the variable is decoded directly
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Variable::Field { code, .. } => Some(code),
            Variable::Thickness => None,
        }
    }

    pub fn is_grain_type(&self) -> bool {
        self.code() == Some(GRAIN_TYPE_CODE)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve caller input to a variable.
///
/// Aliases such as `density` are matched case-insensitively. Full variable
/// names (any registered field except the date, or `thickness_m`) pass through
/// unchanged and are matched case-sensitively.
pub fn resolve_variable(input: &str) -> Result<Variable> {
    let lowered = input.to_lowercase();
    let canonical = VARIABLE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|&(_, name)| name)
        .unwrap_or(input);

    if canonical == THICKNESS_COLUMN {
        return Ok(Variable::Thickness);
    }

    match NAME_TO_CODE.get(canonical) {
        Some(&code) if code != DATE_CODE => Ok(Variable::Field {
            code,
            name: CODE_TO_NAME[code],
        }),
        _ => Err(unrecognized(input)),
    }
}

fn unrecognized(input: &str) -> SnowgridError {
    let valid_aliases = VARIABLE_ALIASES
        .iter()
        .map(|(alias, _)| alias.to_string())
        .collect();
    let valid_names = FIELD_CODES
        .iter()
        .filter(|(code, _)| *code != DATE_CODE)
        .map(|(_, name)| name.to_string())
        .chain(std::iter::once(THICKNESS_COLUMN.to_string()))
        .collect();

    SnowgridError::UnrecognizedVariable {
        input: input.to_string(),
        valid_aliases,
        valid_names,
    }
}

/// Name of the height column every profile carries
pub fn height_name() -> &'static str {
    CODE_TO_NAME[HEIGHT_CODE]
}
