use std::collections::BTreeMap;

use serde::{de::IgnoredAny, Deserialize};

use crate::{
    error::{Error, Result},
    geofile::feature::Scalar,
};

/// How the clauses of a [`FilterSpec`] are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every clause must hold.
    #[default]
    #[serde(alias = "All")]
    All,
    /// At least one clause must hold.
    #[serde(alias = "Any")]
    Any,
}

/// Test applied to a single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exclusive on both sides. A missing bound leaves that side open.
    Range {
        min: Option<Scalar>,
        max: Option<Scalar>,
    },
    List(Vec<Scalar>),
    Equals(Scalar),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    pub field: String,
    pub predicate: Predicate,
}

impl FilterClause {
    pub fn range(field: &str, min: Option<Scalar>, max: Option<Scalar>) -> Self {
        Self {
            field: field.to_string(),
            predicate: Predicate::Range { min, max },
        }
    }

    pub fn list(field: &str, values: Vec<Scalar>) -> Self {
        Self {
            field: field.to_string(),
            predicate: Predicate::List(values),
        }
    }

    pub fn equals(field: &str, value: impl Into<Scalar>) -> Self {
        Self {
            field: field.to_string(),
            predicate: Predicate::Equals(value.into()),
        }
    }
}

/// Ordered clauses plus the mode combining them.
///
/// Clause order is evaluation order. It decides where evaluation short-circuits but never
/// changes the outcome.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawFilterSpec")]
pub struct FilterSpec {
    pub clauses: Vec<FilterClause>,
    pub mode: FilterMode,
}

impl FilterSpec {
    pub fn new(clauses: Vec<FilterClause>, mode: FilterMode) -> Self {
        Self { clauses, mode }
    }

    pub fn all(clauses: Vec<FilterClause>) -> Self {
        Self::new(clauses, FilterMode::All)
    }

    pub fn any(clauses: Vec<FilterClause>) -> Self {
        Self::new(clauses, FilterMode::Any)
    }
}

/// Value of a key in a clause as written in a layer configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    One(Scalar),
    Many(Vec<Scalar>),
    Unsupported(IgnoredAny),
}

/// A clause as written in a layer configuration, either typed
/// (`{field: height, type: range, min: 2}`) or shorthand (`{kind: [road, path]}`).
pub type RawFilterClause = BTreeMap<String, RawValue>;

/// Filter with an explicit mode and clause list.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawClauseList {
    #[serde(default)]
    pub mode: FilterMode,
    pub clauses: Vec<RawFilterClause>,
}

/// A filter as written in a layer configuration.
///
/// The plain map form treats every entry as a shorthand clause combined with `All`. It may
/// not use the `mode` or `clauses` keys of the explicit form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawFilterSpec {
    Clauses(RawClauseList),
    Shorthand(RawFilterClause),
}

const CLAUSE_LIST_KEYS: [&str; 2] = ["mode", "clauses"];

const TYPED_CLAUSE_KEYS: [&str; 5] = ["field", "type", "min", "max", "value"];

impl TryFrom<RawFilterSpec> for FilterSpec {
    type Error = Error;

    fn try_from(raw: RawFilterSpec) -> Result<Self> {
        match raw {
            RawFilterSpec::Clauses(RawClauseList { mode, clauses }) => {
                let clauses = clauses
                    .into_iter()
                    .map(FilterClause::try_from)
                    .collect::<Result<Vec<_>>>()?;
                Ok(FilterSpec::new(clauses, mode))
            }
            RawFilterSpec::Shorthand(entries) => {
                if let Some(key) = entries
                    .keys()
                    .find(|key| CLAUSE_LIST_KEYS.contains(&key.as_str()))
                {
                    return Err(Error::MalformedFilterClause(format!(
                        "'{}' is only valid in a filter of the form {{mode, clauses}}",
                        key
                    )));
                }
                let clauses = entries
                    .into_iter()
                    .map(|(field, value)| shorthand_clause(field, value))
                    .collect::<Result<Vec<_>>>()?;
                Ok(FilterSpec::all(clauses))
            }
        }
    }
}

impl TryFrom<RawFilterClause> for FilterClause {
    type Error = Error;

    fn try_from(mut raw: RawFilterClause) -> Result<Self> {
        if !raw.contains_key("type") {
            if raw.len() != 1 {
                return Err(Error::MalformedFilterClause(format!(
                    "a shorthand clause must have exactly one field, found {}",
                    raw.len()
                )));
            }
            // Length was checked above.
            let (field, value) = raw.pop_first().ok_or_else(|| {
                Error::MalformedFilterClause("empty shorthand clause".to_string())
            })?;
            return shorthand_clause(field, value);
        }

        if let Some(key) = raw.keys().find(|key| !TYPED_CLAUSE_KEYS.contains(&key.as_str())) {
            return Err(Error::MalformedFilterClause(format!(
                "unexpected key '{}' in typed clause",
                key
            )));
        }
        let field = match raw.remove("field") {
            Some(RawValue::One(Scalar::String(field))) => field,
            _ => {
                return Err(Error::MalformedFilterClause(
                    "typed clause needs a string 'field'".to_string(),
                ))
            }
        };
        let kind = match raw.remove("type") {
            Some(RawValue::One(Scalar::String(kind))) => kind.to_ascii_lowercase(),
            _ => {
                return Err(Error::MalformedFilterClause(format!(
                    "clause on '{}' needs a string 'type'",
                    field
                )))
            }
        };
        let min = raw.remove("min");
        let max = raw.remove("max");
        let value = raw.remove("value");

        let predicate = match (kind.as_str(), value) {
            ("range", None) => Predicate::Range {
                min: bound(&field, "min", min)?,
                max: bound(&field, "max", max)?,
            },
            ("list", Some(RawValue::Many(values))) if min.is_none() && max.is_none() => {
                Predicate::List(values)
            }
            ("equals", Some(RawValue::One(value))) if min.is_none() && max.is_none() => {
                Predicate::Equals(value)
            }
            ("range" | "list" | "equals", _) => {
                return Err(Error::MalformedFilterClause(format!(
                    "{} clause on '{}' has the wrong set of keys",
                    kind, field
                )))
            }
            _ => {
                return Err(Error::MalformedFilterClause(format!(
                    "unknown clause type '{}' on '{}'",
                    kind, field
                )))
            }
        };
        Ok(FilterClause { field, predicate })
    }
}

fn shorthand_clause(field: String, value: RawValue) -> Result<FilterClause> {
    let predicate = match value {
        RawValue::One(value) => Predicate::Equals(value),
        RawValue::Many(values) => Predicate::List(values),
        RawValue::Unsupported(_) => {
            return Err(Error::MalformedFilterClause(format!(
                "value of '{}' must be a scalar or a list of scalars",
                field
            )))
        }
    };
    Ok(FilterClause { field, predicate })
}

/// A `null` bound is the same as leaving it out.
fn bound(field: &str, name: &str, value: Option<RawValue>) -> Result<Option<Scalar>> {
    match value {
        None | Some(RawValue::One(Scalar::Null)) => Ok(None),
        Some(RawValue::One(value)) => Ok(Some(value)),
        Some(_) => Err(Error::MalformedFilterClause(format!(
            "'{}' of range clause on '{}' must be a scalar",
            name, field
        ))),
    }
}
