use crate::error::ParamsError;
use crate::value::ParamValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validator for one parameter
pub type ValidatorFn = fn(&ParamValue) -> Result<(), ParamsError>;

/// Declared key of a module parameter and its validator
#[derive(Clone, Copy)]
pub struct ParamSetPair {
    pub key: &'static str,
    pub validate: ValidatorFn,
}

impl ParamSetPair {
    pub const fn new(key: &'static str, validate: ValidatorFn) -> Self {
        ParamSetPair { key, validate }
    }
}

impl std::fmt::Debug for ParamSetPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamSetPair").field("key", &self.key).finish()
    }
}

/// Ordered name -> value mapping for one module
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParamSet {
    pub fn new() -> Self {
        ParamSet {
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.values.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.values.iter()
    }

    /// Look up a declared key, failing with `MissingParameter`
    pub fn require(&self, module: &str, key: &str) -> Result<&ParamValue, ParamsError> {
        self.get(key).ok_or_else(|| ParamsError::MissingParameter {
            module: module.to_string(),
            key: key.to_string(),
        })
    }
}

/// Run the full module validator over a candidate set
///
/// Undeclared keys are rejected first, then every declared key is checked in
/// declaration order. The first violation wins.
pub fn validate_param_set(
    module: &str,
    pairs: &[ParamSetPair],
    candidate: &ParamSet,
) -> Result<(), ParamsError> {
    if let Some((key, _)) = candidate
        .iter()
        .find(|(key, _)| !pairs.iter().any(|p| p.key == key.as_str()))
    {
        return Err(ParamsError::UnknownParameter {
            module: module.to_string(),
            key: key.clone(),
        });
    }

    for pair in pairs {
        let value = candidate.require(module, pair.key)?;
        (pair.validate)(value)?;
    }

    Ok(())
}

/// Typed view over a module's parameter set
pub trait ModuleParams: Sized + Default {
    /// Module name, also the storage subspace
    const MODULE: &'static str;

    fn param_set_pairs() -> &'static [ParamSetPair];

    fn to_param_set(&self) -> ParamSet;

    fn from_param_set(set: &ParamSet) -> Result<Self, ParamsError>;

    fn validate(&self) -> Result<(), ParamsError> {
        validate_param_set(Self::MODULE, Self::param_set_pairs(), &self.to_param_set())
    }
}
