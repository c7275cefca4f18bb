use crate::error_handling::*;
use crate::parsing::*;

fn pop_operand(slots: &mut Vec<f64>, node: &ExprNode) -> Result<f64> {
    slots.pop().ok_or_else(|| CalcError::stack_underflow(node.to_string()))
}

pub fn evaluate(expression: &[ExprNode]) -> Result<f64> {
    let mut slots = Vec::<f64>::new();
    for node in expression {
        match node {
            ExprNode::number(value) => slots.push(*value),

            ExprNode::negation => {
                let value = pop_operand(&mut slots, node)?;
                slots.push(-value);
            },

            ExprNode::binary(operator) => {
                let right = pop_operand(&mut slots, node)?;
                let left = pop_operand(&mut slots, node)?;
                slots.push(operator.call(left, right));
            },

            ExprNode::function(function) => {
                let value = pop_operand(&mut slots, node)?;
                slots.push(function.call(value));
            },
        }
    }

    match slots.as_slice() {
        [result] => Ok(*result),
        _ => Err(CalcError::empty_result(slots.len())),
    }
}
