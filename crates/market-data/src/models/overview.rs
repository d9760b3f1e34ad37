use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Company fundamentals as returned by the provider's OVERVIEW function.
///
/// The provider returns dozens of fields (`Name`, `PERatio`, `EPS`,
/// `DividendYield`, `52WeekHigh`, ...). They are kept as-is so the dashboard
/// can show whichever it needs; typed accessors cover the common ones.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyOverview(Map<String, Value>);

impl CompanyOverview {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// True when the provider sent an empty object.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ticker symbol reported by the provider, if any.
    pub fn symbol(&self) -> Option<&str> {
        self.field("Symbol")
    }

    /// Company name
    pub fn name(&self) -> Option<&str> {
        self.field("Name")
    }

    /// Raw string value of a field, skipping empty strings.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Parse a field as f64, handling the provider's "None" and "-" placeholders.
    pub fn numeric_field(&self, key: &str) -> Option<f64> {
        self.field(key)
            .filter(|v| *v != "None" && *v != "-")
            .and_then(|v| v.parse::<f64>().ok())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}
