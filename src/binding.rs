//! Binding of call arguments to a declared constructor signature.
//!
//! A [`Signature`] lists a constructor's parameters in order, optionally
//! with defaults. [`CallArgs`] carries the values of one actual call, a mix
//! of positional and named. [`Signature::resolve`] binds the two exactly as
//! the constructor itself would, so a value supplied positionally resolves
//! to the same identifier value as the same value supplied by name, and a
//! parameter left to its default still resolves.

use crate::datatype::KeyValue;
use crate::error::{KeepsakeError, Result};

#[derive(Debug, Clone)]
pub struct Param {
    name: &'static str,
    default: Option<KeyValue>,
}

impl Param {
    pub fn name(&self) -> &'static str {
        self.name
    }
    pub fn default(&self) -> Option<&KeyValue> {
        self.default.as_ref()
    }
}

/// An ordered parameter list, built up parameter by parameter.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }
    pub fn required(mut self, name: &'static str) -> Self {
        self.params.push(Param { name, default: None });
        self
    }
    pub fn optional(mut self, name: &'static str, default: impl Into<KeyValue>) -> Self {
        self.params.push(Param {
            name,
            default: Some(default.into()),
        });
        self
    }
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|param| param.name == name)
    }

    /// Bind `args` against this signature and extract the value of the
    /// parameter called `identifier`.
    ///
    /// Positional values bind to parameters in declaration order, named
    /// values to the parameter carrying their name, and defaults fill
    /// whatever remains. The whole call is validated, not just the
    /// identifier, so a misspelled or doubly supplied parameter fails even
    /// when it is not the identifying one.
    pub fn resolve(&self, identifier: &str, args: &CallArgs) -> Result<KeyValue> {
        let position = self
            .position_of(identifier)
            .ok_or_else(|| KeepsakeError::UndeclaredIdentifier {
                name: identifier.to_owned(),
            })?;
        if args.positional.len() > self.params.len() {
            return Err(KeepsakeError::TooManyPositional {
                expected: self.params.len(),
                got: args.positional.len(),
            });
        }
        let mut seen: Vec<&str> = Vec::new();
        for (name, _) in &args.named {
            let bound = self
                .position_of(name)
                .ok_or_else(|| KeepsakeError::UnknownArgument { name: name.clone() })?;
            if bound < args.positional.len() || seen.contains(&name.as_str()) {
                return Err(KeepsakeError::DuplicateArgument { name: name.clone() });
            }
            seen.push(name.as_str());
        }
        if position < args.positional.len() {
            return Ok(args.positional[position].clone());
        }
        if let Some((_, value)) = args.named.iter().find(|(name, _)| name.as_str() == identifier) {
            return Ok(value.clone());
        }
        match &self.params[position].default {
            Some(default) => Ok(default.clone()),
            None => Err(KeepsakeError::UnresolvedIdentifier {
                name: identifier.to_owned(),
            }),
        }
    }
}

/// The values of one construction call.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    pub(crate) positional: Vec<KeyValue>,
    pub(crate) named: Vec<(String, KeyValue)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn arg(mut self, value: impl Into<KeyValue>) -> Self {
        self.positional.push(value.into());
        self
    }
    pub fn named(mut self, name: impl Into<String>, value: impl Into<KeyValue>) -> Self {
        self.named.push((name.into(), value.into()));
        self
    }
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}
