//! Ordering descriptors for the reserved `order` parameter.
//!
//! The builder treats orderings as opaque JSON values; [`Ordering`] is the
//! conventional `{attribute, direction}` shape most resources expect.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Sort order for one attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (smallest first). This is the default.
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            }
        )?;
        Ok(())
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Orders results by one attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub attribute: String,
    pub direction: SortDirection,
}

impl Ordering {
    pub fn new(attribute: &str, direction: SortDirection) -> Self {
        Self {
            attribute: attribute.to_string(),
            direction,
        }
    }

    pub fn asc(attribute: &str) -> Self {
        Self::new(attribute, SortDirection::Asc)
    }

    pub fn desc(attribute: &str) -> Self {
        Self::new(attribute, SortDirection::Desc)
    }
}

impl From<Ordering> for Value {
    fn from(ordering: Ordering) -> Self {
        json!({
            "attribute": ordering.attribute,
            "direction": ordering.direction.to_string(),
        })
    }
}

/// Parses `attribute` or `attribute:direction`. A missing direction means ascending.
impl FromStr for Ordering {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (attribute, direction) = match s.split_once(':') {
            Some((attribute, direction)) => (attribute, direction.parse()?),
            None => (s, SortDirection::Asc),
        };
        if attribute.is_empty() {
            return Err(());
        }
        Ok(Ordering::new(attribute, direction))
    }
}
