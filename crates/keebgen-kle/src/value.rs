use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Loosely-typed tree every layout input is read into before parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Seq(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(s) => Some(s.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of this value. Numeric strings count, matching how layout editors
    /// sometimes export numbers.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Seq(_) => "array",
            Value::Map(_) => "object",
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, Error> {
        let v: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        Self::try_from_yaml_value(&v)
    }

    fn try_from_yaml_value(v: &serde_yaml::Value) -> Result<Self, Error> {
        Ok(match v {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(*b),
            serde_yaml::Value::Number(n) => Value::Number(
                n.as_f64()
                    .or_else(|| n.as_i64().map(|i| i as f64))
                    .or_else(|| n.as_u64().map(|u| u as f64))
                    .ok_or(Error::YamlNumber)?,
            ),
            serde_yaml::Value::String(s) => Value::String(s.clone()),
            serde_yaml::Value::Sequence(seq) => Value::Seq(
                seq.iter()
                    .map(Self::try_from_yaml_value)
                    .collect::<Result<_, _>>()?,
            ),
            serde_yaml::Value::Mapping(map) => {
                let mut out = IndexMap::new();
                for (k, vv) in map {
                    let serde_yaml::Value::String(key) = k else {
                        return Err(Error::NonStringKey);
                    };
                    out.insert(key.clone(), Self::try_from_yaml_value(vv)?);
                }
                Value::Map(out)
            }
            _ => return Err(Error::UnsupportedYamlValue),
        })
    }

    pub fn try_from_json_str(s: &str) -> Result<Self, Error> {
        let v: serde_json::Value =
            serde_json::from_str(s).map_err(|e| Error::Json(e.to_string()))?;
        Ok(Self::from_json_value(&v))
    }

    fn from_json_value(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(a) => {
                Value::Seq(a.iter().map(Self::from_json_value).collect())
            }
            serde_json::Value::Object(o) => Value::Map(
                o.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json_value(v)))
                    .collect(),
            ),
        }
    }

    fn try_from_json5_str(s: &str) -> Option<Self> {
        json5::from_str::<serde_json::Value>(s)
            .ok()
            .map(|v| Self::from_json_value(&v))
    }

    /// Read a layout in any of the shapes layout editors hand out.
    ///
    /// Tried in order: strict JSON, "raw data" (JSON5 with bare object keys), raw data without
    /// the enclosing brackets, and finally YAML. The error of the strict JSON attempt is
    /// reported when nothing matches.
    pub fn from_layout_str(input: &str) -> Result<Self, Error> {
        let strict_err = match Self::try_from_json_str(input) {
            Ok(v) => return Ok(v),
            Err(e) => e,
        };

        if let Some(v) = Self::try_from_json5_str(input) {
            return Ok(v);
        }
        if let Some(v) = Self::try_from_json5_str(&format!("[{input}]")) {
            return Ok(v);
        }

        match Self::from_yaml_str(input) {
            Ok(v @ Value::Seq(_)) => Ok(v),
            _ => Err(strict_err),
        }
    }
}
