use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("invalid character, '{0}', encountered at position {1}")]
    invalid_character(char, usize),

    #[error("'{0}' is not a valid number")]
    invalid_number(String),

    #[error("'{0}' is not a known function")]
    unknown_identifier(String),

    #[error("could not find a match for '{0}'")]
    unmatched_parenthesis(char),

    #[error("'{1}' is not a valid value for '{0}'")]
    invalid_variable_input(char, String),

    #[error("variable, '{0}', is not defined")]
    undefined(char),

    #[error("'{0}' is missing an operand")]
    stack_underflow(String),

    #[error("expression left {0} values instead of one")]
    empty_result(usize),

    #[error("could not read input: {0}")]
    io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CalcError>;
