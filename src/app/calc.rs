use std::fmt;
use std::io::{BufRead, Write};

use anyhow::Result;

use super::commands::is_exit;
use super::console::Console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

const OPERATOR_ALIASES: &[(&str, Operator)] = &[
    ("add", Operator::Add),
    ("sub", Operator::Sub),
    ("mul", Operator::Mul),
    ("div", Operator::Div),
];

impl Operator {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        OPERATOR_ALIASES
            .iter()
            .find(|(alias, _)| *alias == input)
            .map(|(_, op)| *op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CalcError {
    DivisionByZero,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "Division by zero."),
        }
    }
}

pub(crate) fn evaluate(op: Operator, a: f64, b: f64) -> Result<f64, CalcError> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Sub => Ok(a - b),
        Operator::Mul => Ok(a * b),
        Operator::Div if b == 0.0 => Err(CalcError::DivisionByZero),
        Operator::Div => Ok(a / b),
    }
}

pub(crate) fn parse_operand(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

pub(crate) fn run_calculator<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.heading("\nWelcome to the calculator.")?;
    loop {
        let Some(answer) = console.ask_keyword("Enter operation (add, sub, mul, div) or \"exit\": ")?
        else {
            return Ok(());
        };
        if is_exit(&answer) {
            return Ok(());
        }
        let Some(op) = Operator::parse(&answer) else {
            console.error("Invalid operation.")?;
            continue;
        };

        let Some(a) = ask_operand(console, "Enter first number: ")? else {
            return Ok(());
        };
        let Some(b) = ask_operand(console, "Enter second number: ")? else {
            return Ok(());
        };

        match evaluate(op, a, b) {
            Ok(value) => console.success(&format!("Result: {value}"))?,
            Err(err) => {
                log::debug!("calculator rejected {op:?}: {err}");
                console.error(&format!("Error: {err}"))?;
            }
        }
    }
}

fn ask_operand<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> Result<Option<f64>> {
    loop {
        let Some(answer) = console.ask(prompt)? else {
            return Ok(None);
        };
        match parse_operand(&answer) {
            Some(value) => return Ok(Some(value)),
            None => console.error("Invalid input. Please enter a number.")?,
        }
    }
}
