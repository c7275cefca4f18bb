use calc_rs::*;
use clap::Parser;
use log::LevelFilter;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "calc", version, about = "Evaluates arithmetic expressions")]
struct Settings {
    /// Expression to evaluate once; starts an interactive session when omitted
    expression: Option<String>,

    /// Preset variable value, e.g. `--var x=2.5`; other variables are prompted for
    #[arg(short, long = "var", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    vars: Vec<(char, f64)>,

    /// Digits printed after the decimal point
    #[arg(short, long, env = "CALC_PRECISION")]
    precision: Option<usize>,

    /// Log filter (off, error, warn, info, debug, trace); falls back to RUST_LOG
    #[arg(long, env = "CALC_LOG")]
    log_level: Option<LevelFilter>,
}

fn parse_assignment(text: &str) -> std::result::Result<(char, f64), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", text))?;

    let mut letters = name.trim().chars();
    let name = match (letters.next(), letters.next()) {
        (Some(name), None) if name.is_alphabetic() => name,
        _ => return Err(format!("'{}' is not a single-letter variable", name.trim())),
    };
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", value.trim()))?;
    Ok((name, value))
}

/// Answers from the presets, otherwise asks on the terminal.
struct Prompt {
    presets: Bindings,
}

impl VariableSource for Prompt {
    fn request(&mut self, name: char) -> Result<String> {
        if let Some(value) = self.presets.get(name) {
            return Ok(value.to_string());
        }

        print!("Enter value of {}: ", name);
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line)
    }
}

fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn report(expression: &str, prompt: &mut Prompt, precision: Option<usize>) -> bool {
    match calculate_with(expression, prompt) {
        Ok(result) => {
            match precision {
                Some(digits) => println!("{:.*}", digits, result),
                None => println!("{}", result),
            }
            true
        },
        Err(e) => {
            println!("Error, {}", e);
            false
        },
    }
}

fn prompt_line() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn main() -> Result<()> {
    let settings = Settings::parse();
    init_logger(settings.log_level);

    let mut prompt = Prompt{presets: settings.vars.into_iter().collect()};

    if let Some(expression) = settings.expression {
        if !report(&expression, &mut prompt, settings.precision) {
            std::process::exit(1);
        }
        return Ok(());
    }

    prompt_line()?;
    loop {
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }

        report(&line, &mut prompt, settings.precision);
        prompt_line()?;
    }
    Ok(())
}
