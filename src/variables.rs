use crate::error_handling::*;
use std::collections::HashMap;

/// Supplies the values of single-letter variables while an expression is converted.
///
/// `request` is called once for every occurrence of a variable and returns the raw
/// text of its value; the converter does the parsing.
pub trait VariableSource {
    fn request(&mut self, name: char) -> Result<String>;
}

impl<F: FnMut(char) -> Result<String>> VariableSource for F {
    fn request(&mut self, name: char) -> Result<String> {
        self(name)
    }
}

/// Fixed variable values.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    values: HashMap<char, f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: char, value: f64) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: char) -> Option<f64> {
        self.values.get(&name).copied()
    }
}

impl FromIterator<(char, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (char, f64)>>(iter: I) -> Self {
        Self{values: iter.into_iter().collect()}
    }
}

impl VariableSource for Bindings {
    fn request(&mut self, name: char) -> Result<String> {
        self.get(name)
            .map(|value| value.to_string())
            .ok_or(CalcError::undefined(name))
    }
}

/// Rejects every variable.
pub struct NoVariables;

impl VariableSource for NoVariables {
    fn request(&mut self, name: char) -> Result<String> {
        Err(CalcError::undefined(name))
    }
}
