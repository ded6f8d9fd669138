//! Option registry for renderer invocations.
//!
//! An [`OptionSet`] is a closed, ordered set of named slots. Slots are
//! declared once with a default value; afterwards only declared names can be
//! set or overridden. The declaration order is the order in which options
//! appear on the generated command line.

mod value;

pub use value::OptionValue;

use thiserror::Error;

/// Error type for option registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("The option '{0}' does not exist.")]
    Unknown(String),

    #[error("The option '{0}' already exists.")]
    AlreadyDeclared(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    name: String,
    default: OptionValue,
    value: OptionValue,
}

/// A closed set of named option slots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionSet {
    slots: Vec<Slot>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.name == name)
    }

    /// Declares a new slot holding `default`.
    ///
    /// # Errors
    ///
    /// Returns `OptionError::AlreadyDeclared` if `name` is already declared.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        default: impl Into<OptionValue>,
    ) -> Result<&mut Self, OptionError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(OptionError::AlreadyDeclared(name));
        }
        let default = default.into();
        self.slots.push(Slot {
            name,
            value: default.clone(),
            default,
        });
        Ok(self)
    }

    /// Declares every `(name, default)` pair in order, stopping at the first
    /// duplicate.
    pub fn declare_all<I, K, V>(&mut self, defaults: I) -> Result<&mut Self, OptionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OptionValue>,
    {
        for (name, default) in defaults {
            self.declare(name, default)?;
        }
        Ok(self)
    }

    /// Sets the value of a declared option.
    ///
    /// Values are not validated; it is up to the caller to sanitize user input.
    ///
    /// # Errors
    ///
    /// Returns `OptionError::Unknown` if `name` was never declared.
    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> Result<&mut Self, OptionError> {
        let index = self
            .position(name)
            .ok_or_else(|| OptionError::Unknown(name.to_string()))?;
        let value = value.into();
        log::debug!("Set option \"{}\" to {}.", name, value);
        self.slots[index].value = value;
        Ok(self)
    }

    /// Applies `set` to each entry in turn. Entries before the first unknown
    /// name stay applied.
    pub fn set_many<I, K, V>(&mut self, values: I) -> Result<&mut Self, OptionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        for (name, value) in values {
            self.set(name.as_ref(), value)?;
        }
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.position(name).map(|index| &self.slots[index].value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Current `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.slots.iter().map(|slot| (slot.name.as_str(), &slot.value))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the current values with `overrides` applied, leaving the set
    /// itself untouched.
    ///
    /// # Errors
    ///
    /// Returns `OptionError::Unknown` for the first override naming an
    /// undeclared option.
    pub fn merge<I, K, V>(&self, overrides: I) -> Result<ResolvedOptions, OptionError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<OptionValue>,
    {
        let mut resolved = self.resolved();
        for (name, value) in overrides {
            let name = name.as_ref();
            let slot = resolved
                .entries
                .iter_mut()
                .find(|(key, _)| key == name)
                .ok_or_else(|| OptionError::Unknown(name.to_string()))?;
            slot.1 = value.into();
        }
        Ok(resolved)
    }

    /// The current values as a resolved mapping.
    pub fn resolved(&self) -> ResolvedOptions {
        ResolvedOptions {
            entries: self
                .slots
                .iter()
                .map(|slot| (slot.name.clone(), slot.value.clone()))
                .collect(),
        }
    }

    /// Restores every slot to its declared default.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.value = slot.default.clone();
        }
    }
}

/// An ordered `(name, value)` mapping ready to be turned into arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedOptions {
    entries: Vec<(String, OptionValue)>,
}

impl ResolvedOptions {
    /// Builds a mapping directly, bypassing any registry. Mostly useful for
    /// feeding the command builder in tests and tools.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<OptionValue>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut OptionValue)> {
        self.entries.iter_mut().map(|(key, value)| (key.as_str(), value))
    }

    /// Drops every `null` entry.
    pub fn without_nulls(mut self) -> Self {
        self.entries.retain(|(_, value)| !value.is_null());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for ResolvedOptions {
    type Item = (String, OptionValue);
    type IntoIter = std::vec::IntoIter<(String, OptionValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
