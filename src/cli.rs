//! Command-line front end: one-shot expression evaluation or an interactive
//! read-eval-print loop.
//!
//! Grounded on `App.{hpp,cpp}` for the option set and REPL shape; the clap
//! derive style follows the teacher's `bin/vsfinfo.rs`.

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::interpreter;
use crate::printer::ExprPrinter;
use crate::rational::Rational;
use crate::scalar::Scalar;
use crate::settings::{Mode, Settings};

#[derive(Parser)]
#[command(name = "dirac")]
#[command(about = "Dirac matrices calculator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Evaluate this expression and exit instead of starting the REPL.
    #[arg(short = 'e', long = "expr", value_name = "EXPR")]
    pub expr: Option<String>,

    /// Arithmetic mode: "float" or "rational" (default).
    #[arg(short = 'm', long = "mode", value_name = "MODE")]
    pub mode: Option<String>,

    /// Terms per printed line, or "inf" for unlimited (default).
    #[arg(short = 'l', long = "line-terms", value_name = "N")]
    pub line_terms: Option<String>,

    /// Dummy index name template, default "\omega".
    #[arg(short = 'd', long = "dummy", value_name = "NAME")]
    pub dummy: Option<String>,

    /// Apply index symmetry reduction: "true" (default) or "false".
    #[arg(short = 's', long = "apply-symmetry", value_name = "BOOL")]
    pub apply_symmetry: Option<String>,
}

impl Cli {
    /// Folds command-line flags into a [`Settings`] value, returning the
    /// one-shot expression if `-e` was given.
    pub fn into_settings(self) -> (Settings, Option<String>) {
        let mut settings = Settings::default();
        if let Some(m) = &self.mode {
            settings.set_var("mode", m);
        }
        if let Some(l) = &self.line_terms {
            settings.set_var("line_terms", l);
        }
        if let Some(d) = self.dummy {
            settings.dummy_name = d;
        }
        if let Some(s) = &self.apply_symmetry {
            settings.set_var("apply_symmetry", s);
        }
        (settings, self.expr)
    }
}

/// Evaluates one expression under `settings` and writes its LaTeX
/// rendering, or an error message, to `output`. Never returns an `Err`
/// from a malformed expression; only genuine I/O failures propagate.
/// Returns `0` on success, `1` if evaluation failed, mirroring
/// `App::compute<Number>`'s return code.
pub fn compute(settings: &Settings, input: &str, output: &mut impl Write) -> io::Result<i32> {
    match settings.mode {
        Mode::Float => compute_typed::<f64>(settings, input, output),
        Mode::Rational => compute_typed::<Rational>(settings, input, output),
    }
}

fn compute_typed<S: Scalar>(
    settings: &Settings,
    input: &str,
    output: &mut impl Write,
) -> io::Result<i32> {
    let result = interpreter::run::<S>(input).map(|expr| {
        if settings.apply_symmetry {
            expr.apply_symmetry()
        } else {
            expr
        }
    });

    match result {
        Ok(expr) => {
            let mut printer = ExprPrinter::new(settings.dummy_name.clone(), settings.line_terms);
            writeln!(output, "{}", printer.latexify(&expr))?;
            Ok(0)
        }
        Err(e) => {
            writeln!(output, "{}", e.to_string().red())?;
            Ok(1)
        }
    }
}

/// Runs the interactive read-eval-print loop against standard input/output.
pub fn run_shell(mut settings: Settings) -> io::Result<()> {
    println!("Dirac matrices calculator");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        print!("dirac:> ");
        stdout.flush()?;

        let input = line?;
        let words: Vec<&str> = input.split_whitespace().collect();

        if words.len() == 1 && words[0] == "quit" {
            break;
        }
        if words.is_empty() {
            continue;
        }
        if words.len() == 3 && words[0] == "#set" {
            settings.set_var(words[1], words[2]);
            continue;
        }

        compute(&settings, &input, &mut stdout)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_renders_a_valid_expression() {
        let settings = Settings::default();
        let mut out = Vec::new();
        let code = compute(&settings, "2 + 2", &mut out).unwrap();
        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(out).unwrap().trim_end(), "4");
    }

    #[test]
    fn compute_reports_a_parse_error_with_exit_code_one() {
        let settings = Settings::default();
        let mut out = Vec::new();
        let code = compute(&settings, "{", &mut out).unwrap();
        assert_eq!(code, 1);
        let rendered = String::from_utf8(out).unwrap();
        assert!(!rendered.trim().is_empty());
    }

    #[test]
    fn into_settings_applies_cli_flags() {
        let cli = Cli {
            expr: Some("1".to_string()),
            mode: Some("float".to_string()),
            line_terms: Some("8".to_string()),
            dummy: Some("\\mu".to_string()),
            apply_symmetry: Some("false".to_string()),
        };
        let (settings, expr) = cli.into_settings();
        assert_eq!(settings.mode, Mode::Float);
        assert_eq!(settings.line_terms, 8);
        assert_eq!(settings.dummy_name, "\\mu");
        assert!(!settings.apply_symmetry);
        assert_eq!(expr.as_deref(), Some("1"));
    }
}
