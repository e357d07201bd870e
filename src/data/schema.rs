use crate::error::{Error, Result};
use crate::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Role of a column (or run of columns) in an input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    /// A run of one or more numeric feature columns.
    Features,
    /// The categorical quality label.
    Label,
    /// The continuous target, e.g. settling speed.
    Target,
}

impl ColumnRole {
    fn name(self) -> &'static str {
        match self {
            ColumnRole::Features => "features",
            ColumnRole::Label => "label",
            ColumnRole::Target => "target",
        }
    }
}

impl FromStr for ColumnRole {
    type Err = ParseEnumError;
    /// Parse a string to a `ColumnRole`.
    ///
    /// Accepts `"features" | "label" | "target"`.
    fn from_str(str: &str) -> std::result::Result<Self, Self::Err> {
        match str.trim() {
            "features" => Ok(ColumnRole::Features),
            "label" => Ok(ColumnRole::Label),
            "target" => Ok(ColumnRole::Target),
            _ => Err(ParseEnumError(format!(
                "Not a column role: {}. Must be one of (features|label|target)",
                str
            ))),
        }
    }
}

/// Ordered list of column roles an input table must follow, left to right.
///
/// Each role appears exactly once; `Features` expands to all columns not
/// taken by the other roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Schema {
    roles: Vec<ColumnRole>,
}

/// Column positions of a [`Schema`](struct.Schema.html) resolved against a table width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLayout {
    pub features: Range<usize>,
    pub label: usize,
    pub target: usize,
}

impl Default for Schema {
    /// Feature columns, then the label, then the target (rightmost).
    fn default() -> Self {
        Schema {
            roles: vec![ColumnRole::Features, ColumnRole::Label, ColumnRole::Target],
        }
    }
}

impl Schema {
    /// Creates a schema from roles. Every role must appear exactly once.
    pub fn new(roles: &[ColumnRole]) -> Result<Self> {
        for role in &[ColumnRole::Features, ColumnRole::Label, ColumnRole::Target] {
            let count = roles.iter().filter(|r| *r == role).count();
            if count != 1 {
                return Err(Error::Config(format!(
                    "Schema must contain role '{}' exactly once, found {} times",
                    role.name(),
                    count
                )));
            }
        }
        Ok(Schema {
            roles: roles.to_vec(),
        })
    }

    /// The roles, left to right.
    pub fn roles(&self) -> &[ColumnRole] {
        &self.roles
    }

    /// Resolves the schema against a table with `ncols` columns.
    pub fn resolve(&self, ncols: usize) -> Result<SchemaLayout> {
        if ncols < self.roles.len() {
            return Err(Error::DatasetMalformed(format!(
                "Expected at least {} columns ({}), found {}",
                self.roles.len(),
                self,
                ncols
            )));
        }
        let n_features = ncols - (self.roles.len() - 1);
        let mut layout = SchemaLayout {
            features: 0..0,
            label: 0,
            target: 0,
        };
        let mut pos = 0;
        for role in &self.roles {
            match role {
                ColumnRole::Features => {
                    layout.features = pos..pos + n_features;
                    pos += n_features;
                }
                ColumnRole::Label => {
                    layout.label = pos;
                    pos += 1;
                }
                ColumnRole::Target => {
                    layout.target = pos;
                    pos += 1;
                }
            }
        }
        Ok(layout)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.roles.iter().map(|r| r.name()).collect();
        f.write_str(&names.join(","))
    }
}

impl FromStr for Schema {
    type Err = Error;
    /// Parses a comma-separated role list, e.g. `"features,target,label"`.
    fn from_str(str: &str) -> Result<Self> {
        let roles = str
            .split(',')
            .map(|s| s.parse::<ColumnRole>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Schema::new(&roles)
    }
}

impl TryFrom<String> for Schema {
    type Error = Error;
    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Schema> for String {
    fn from(schema: Schema) -> Self {
        schema.to_string()
    }
}
