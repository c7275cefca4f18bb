#![allow(nonstandard_style)]

//! Arithmetic expression evaluation.
//!
//! Expressions are converted from infix text to postfix order with a
//! shunting-yard pass and then evaluated on a single stack. Single-letter
//! variables are resolved through a [`VariableSource`].

pub mod error_handling;
pub mod evaluating;
pub mod parsing;
pub mod scanning;
pub mod variables;

pub use error_handling::{CalcError, Result};
pub use evaluating::evaluate;
pub use parsing::{convert, BinaryOperator, ExprNode, Function};
pub use variables::{Bindings, NoVariables, VariableSource};

use log::debug;

/// Evaluates an expression that contains no variables.
pub fn calculate(expression: &str) -> Result<f64> {
    calculate_with(expression, &mut NoVariables)
}

/// Evaluates an expression, asking `variables` for the value of every variable it meets.
pub fn calculate_with<V: VariableSource + ?Sized>(expression: &str, variables: &mut V) -> Result<f64> {
    let postfix = convert(expression, variables)?;
    let result = evaluate(&postfix)?;
    debug!("{} = {}", expression.trim(), result);
    Ok(result)
}
