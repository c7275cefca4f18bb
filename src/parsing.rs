use crate::error_handling::*;
use crate::scanning::*;
use crate::variables::*;
use log::debug;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOperator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    addition,
    subtraction,
    multiplication,
    division,
    exponentiation,
}

impl BinaryOperator {
    pub fn call(&self, left: f64, right: f64) -> f64 {
        use BinaryOperator::*;

        match self {
            addition => left + right,
            subtraction => left - right,
            multiplication => left * right,
            division => left / right,
            exponentiation => left.powf(right),
        }
    }

    fn precedence(&self) -> i32 {
        use BinaryOperator::*;
        match self {
            addition | subtraction => 1,
            multiplication | division => 2,
            exponentiation => 3,
        }
    }
}

impl FromStr for BinaryOperator {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        use BinaryOperator::*;
        match s {
            "+" => Ok(addition),
            "-" => Ok(subtraction),
            "*" => Ok(multiplication),
            "/" => Ok(division),
            "^" => Ok(exponentiation),
            _ => Err(InvalidOperator),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::*;
        let symbol = match self {
            addition => "+",
            subtraction => "-",
            multiplication => "*",
            division => "/",
            exponentiation => "^",
        };
        f.write_str(symbol)
    }
}

/// Named functions of one argument. Trigonometry works in radians.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    sin,
    cos,
    tan,
    cot,
    log,
    ln,
    sqrt,
}

impl Function {
    pub fn call(&self, value: f64) -> f64 {
        use Function::*;
        match self {
            sin => value.sin(),
            cos => value.cos(),
            tan => value.tan(),
            cot => 1.0 / value.tan(),
            log => value.log10(),
            ln => value.ln(),
            sqrt => value.sqrt(),
        }
    }
}

impl FromStr for Function {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        use Function::*;
        match s {
            "sin" => Ok(sin),
            "cos" => Ok(cos),
            "tan" => Ok(tan),
            "cot" => Ok(cot),
            "log" => Ok(log),
            "ln" => Ok(ln),
            "sqrt" => Ok(sqrt),
            _ => Err(InvalidOperator),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub enum StackNode {
    operator(BinaryOperator),
    negation,
    paren,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExprNode {
    number(f64),
    negation,
    binary(BinaryOperator),
    function(Function),
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::number(value) => write!(f, "{}", value),
            Self::negation => f.write_str("~"),
            Self::binary(operator) => write!(f, "{}", operator),
            Self::function(function) => write!(f, "{}", function),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidNode;

impl TryFrom<StackNode> for ExprNode {
    type Error = InvalidNode;

    fn try_from(node: StackNode) -> std::result::Result<Self, Self::Error> {
        match node {
            StackNode::operator(operator) => Ok(ExprNode::binary(operator)),
            StackNode::negation => Ok(ExprNode::negation),
            StackNode::paren => Err(InvalidNode),
        }
    }
}

/// Shunting-yard state: the postfix output plus the operator and function stacks.
///
/// A pending function is emitted as soon as a bare number or variable has been
/// emitted, or alongside each operator popped by a closing paren. Whatever is left
/// of either stack is flushed by `finish`, functions first.
pub struct Yard {
    expression: Vec<ExprNode>,
    stack: Vec<StackNode>,
    functions: Vec<Function>,
}

impl Yard {
    pub fn new() -> Self {
        Self{expression: Vec::new(), stack: Vec::new(), functions: Vec::new()}
    }

    fn resolve_function(&mut self) {
        if let Some(function) = self.functions.pop() {
            self.expression.push(ExprNode::function(function));
        }
    }

    fn add_number(&mut self, content: &str) -> Result<()> {
        let value = content
            .parse()
            .map_err(|_| CalcError::invalid_number(content.into()))?;
        self.expression.push(ExprNode::number(value));

        if let Some(StackNode::negation) = self.stack.last() {
            self.stack.pop();
            self.expression.push(ExprNode::negation);
        }
        self.resolve_function();
        Ok(())
    }

    fn add_variable(&mut self, value: f64) {
        if value < 0.0 {
            self.expression.push(ExprNode::number(-value));
            self.expression.push(ExprNode::negation);
        } else {
            self.expression.push(ExprNode::number(value));
        }
        self.resolve_function();
    }

    fn pop_higher_operator(&mut self, precedence: i32) -> Option<BinaryOperator> {
        match self.stack.last() {
            Some(StackNode::operator(operator)) if operator.precedence() >= precedence => {
                let operator = *operator;
                self.stack.pop();
                Some(operator)
            },
            _ => None,
        }
    }

    fn add_operator(&mut self, operator: BinaryOperator) {
        while let Some(higher) = self.pop_higher_operator(operator.precedence()) {
            self.expression.push(ExprNode::binary(higher));
        }
        self.stack.push(StackNode::operator(operator));
    }

    fn add_negation(&mut self) {
        self.stack.push(StackNode::negation);
    }

    fn add_left_paren(&mut self) {
        self.stack.push(StackNode::paren);
    }

    fn add_function(&mut self, function: Function) {
        self.stack.push(StackNode::paren);
        self.functions.push(function);
    }

    fn add_right_paren(&mut self) -> Result<()> {
        while let Some(stack_node) = self.stack.pop() {
            if let StackNode::paren = stack_node {
                return Ok(());
            }
            self.expression.push(to_expr_node(stack_node)?);
            self.resolve_function();
        }
        Err(CalcError::unmatched_parenthesis(')'))
    }

    pub fn finish(mut self) -> Result<Vec<ExprNode>> {
        while let Some(function) = self.functions.pop() {
            self.expression.push(ExprNode::function(function));
        }
        while let Some(stack_node) = self.stack.pop() {
            self.expression.push(to_expr_node(stack_node)?);
        }
        Ok(self.expression)
    }
}

impl Default for Yard {
    fn default() -> Self {
        Self::new()
    }
}

/// Only an open paren fails to convert, so a failure means it was never closed.
fn to_expr_node(node: StackNode) -> Result<ExprNode> {
    node.try_into().map_err(|_| CalcError::unmatched_parenthesis('('))
}

fn first_character(token: &Token) -> char {
    token.content.chars().next().unwrap_or_default()
}

fn handle_variable<V: VariableSource + ?Sized>(yard: &mut Yard, name: char, variables: &mut V) -> Result<()> {
    let text = variables.request(name)?;
    let value = text
        .trim()
        .parse()
        .map_err(|_| CalcError::invalid_variable_input(name, text.trim().into()))?;
    debug!("{} = {}", name, value);
    yard.add_variable(value);
    Ok(())
}

/// Feeds one token to the yard and returns whether the next token is in prefix position.
fn handle_token<S, V>(yard: &mut Yard, source: &mut S, token: &Token, is_prefix: bool, variables: &mut V) -> Result<bool>
where
    S: Scanner,
    V: VariableSource + ?Sized,
{
    use TokenKind::*;
    match token.kind {
        number => {
            yard.add_number(&token.content)?;
            Ok(false)
        },
        punctuation => {
            if token.content == "(" {
                yard.add_left_paren();
                Ok(true)
            } else {
                yard.add_right_paren()?;
                Ok(false)
            }
        },
        operator => {
            if is_prefix && token.content == "-" {
                yard.add_negation();
            } else {
                let binary: BinaryOperator = token
                    .content
                    .parse()
                    .map_err(|_| CalcError::invalid_character(first_character(token), token.position))?;
                yard.add_operator(binary);
            }
            Ok(false)
        },
        identifier => {
            let mut letters = token.content.chars();
            if let (Some(name), None) = (letters.next(), letters.next()) {
                handle_variable(yard, name, variables)?;
                return Ok(false);
            }

            match token.content.parse::<Function>() {
                Ok(function) if source.is_followed_by('(') => {
                    yard.add_function(function);
                    source.advance()?;
                    Ok(true)
                },
                _ => Err(CalcError::unknown_identifier(token.content.clone())),
            }
        },
    }
}

pub fn parse<S, V>(mut source: S, variables: &mut V) -> Result<Vec<ExprNode>>
where
    S: Scanner,
    V: VariableSource + ?Sized,
{
    let mut is_prefix = true;
    let mut yard = Yard::new();

    while let Some(token) = source.get_current() {
        is_prefix = handle_token(&mut yard, &mut source, &token, is_prefix, variables)?;
        source.advance()?;
    }

    let expression = yard.finish()?;
    debug!("postfix: {}", expression.iter().map(ToString::to_string).collect::<Vec<_>>().join(" "));
    Ok(expression)
}

/// Converts an infix expression into postfix order.
pub fn convert<V: VariableSource + ?Sized>(expression: &str, variables: &mut V) -> Result<Vec<ExprNode>> {
    parse(StringScanner::new(expression)?, variables)
}
