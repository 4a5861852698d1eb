use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Runtime parameters passed to a contract.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: HashMap<String, String>,
}

impl Params {
    /// Create empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse from CLI args like "key=value".
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut params = Self::new();
        for arg in args {
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                Error::Config(format!("invalid param '{}', expected key=value", arg))
            })?;
            params.values.insert(key.to_string(), value.to_string());
        }
        Ok(params)
    }
}

/// Parameter definition in a contract.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDef {
    /// Whether this parameter is required.
    #[serde(default)]
    pub required: bool,

    /// Default value if not provided.
    pub default: Option<String>,

    /// Description for documentation.
    pub description: Option<String>,
}

/// Resolve one `${name}` occurrence. `None` means the name is unknown and the
/// placeholder is left untouched.
fn resolve(name: &str, params: &Params, defs: &HashMap<String, ParamDef>) -> Result<Option<String>> {
    if let Some(v) = params.get(name) {
        return Ok(Some(v.to_string()));
    }
    let Some(def) = defs.get(name) else {
        return Ok(None);
    };
    if let Some(ref default) = def.default {
        return Ok(Some(default.clone()));
    }
    if def.required {
        return Err(Error::Config(format!("missing required parameter: {}", name)));
    }
    // Optional param with no default substitutes to empty
    Ok(Some(String::new()))
}

/// Substitute `${var}` patterns in a string.
pub fn substitute(
    template: &str,
    params: &Params,
    defs: &HashMap<String, ParamDef>,
) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 2..];
        let Some(close) = tail.find('}') else {
            // Unterminated placeholder, keep verbatim
            out.push_str(&rest[open..]);
            return Ok(out);
        };
        let name = &tail[..close];
        match resolve(name, params, defs)? {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[open..open + 2 + close + 1]),
        }
        rest = &tail[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Recursively substitute params in a serde_yaml::Value.
pub fn substitute_tree(
    value: &mut serde_yaml::Value,
    params: &Params,
    defs: &HashMap<String, ParamDef>,
) -> Result<()> {
    match value {
        serde_yaml::Value::String(s) => {
            *s = substitute(s, params, defs)?;
        }
        serde_yaml::Value::Mapping(map) => {
            for (_, v) in map.iter_mut() {
                substitute_tree(v, params, defs)?;
            }
        }
        serde_yaml::Value::Sequence(seq) => {
            for v in seq.iter_mut() {
                substitute_tree(v, params, defs)?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_simple() {
        let params = Params::new().set("name", "world");
        let defs = HashMap::new();
        let result = substitute("hello ${name}!", &params, &defs).unwrap();
        assert_eq!(result, "hello world!");
    }

    #[test]
    fn test_substitute_multiple() {
        let params = Params::new().set("a", "1").set("b", "2");
        let defs = HashMap::new();
        let result = substitute("${a} + ${b} = 3", &params, &defs).unwrap();
        assert_eq!(result, "1 + 2 = 3");
    }

    #[test]
    fn test_substitute_default() {
        let params = Params::new();
        let mut defs = HashMap::new();
        defs.insert(
            "name".to_string(),
            ParamDef {
                required: false,
                default: Some("default".to_string()),
                description: None,
            },
        );
        let result = substitute("hello ${name}", &params, &defs).unwrap();
        assert_eq!(result, "hello default");
    }

    #[test]
    fn test_substitute_required_missing() {
        let params = Params::new();
        let mut defs = HashMap::new();
        defs.insert(
            "name".to_string(),
            ParamDef {
                required: true,
                default: None,
                description: None,
            },
        );
        assert!(substitute("hello ${name}", &params, &defs).is_err());
    }

    #[test]
    fn test_substitute_unknown_left_as_is() {
        let params = Params::new();
        let defs = HashMap::new();
        let result = substitute("keep ${unknown} here", &params, &defs).unwrap();
        assert_eq!(result, "keep ${unknown} here");
    }

    #[test]
    fn test_substitute_unterminated() {
        let params = Params::new().set("a", "1");
        let defs = HashMap::new();
        let result = substitute("${a} and ${broken", &params, &defs).unwrap();
        assert_eq!(result, "1 and ${broken");
    }

    #[test]
    fn test_params_from_args() {
        let args = vec!["user=alice".to_string(), "pass=secret".to_string()];
        let params = Params::from_args(&args).unwrap();
        assert_eq!(params.get("user"), Some("alice"));
        assert_eq!(params.get("pass"), Some("secret"));
    }

    #[test]
    fn test_params_from_args_invalid() {
        let args = vec!["no-equals-sign".to_string()];
        assert!(Params::from_args(&args).is_err());
    }
}
