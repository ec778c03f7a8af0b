//! Command-line argument parsing.

use anyhow::{bail, Result};

/// Which dialog to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    #[default]
    Confirm,
    Alert,
}

/// How the scripted user answers the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Answer {
    /// Press the confirm (or OK) button.
    #[default]
    Yes,
    /// Press the cancel (or OK) button.
    No,
    /// Press Escape without touching a button.
    Dismiss,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub kind: Kind,
    pub title: Option<String>,
    pub answer: Answer,
}

pub const USAGE: &str = "usage: mprompt [confirm|alert] [TITLE] [--answer yes|no|dismiss]";

/// Parse command-line arguments.
pub fn parse_args() -> Result<Invocation> {
    parse(std::env::args().skip(1))
}

fn parse(args: impl IntoIterator<Item = String>) -> Result<Invocation> {
    let mut invocation = Invocation::default();
    let mut positional = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--answer" | "-a" => {
                let Some(value) = args.next() else {
                    bail!("--answer needs a value\n{USAGE}");
                };
                invocation.answer = parse_answer(&value)?;
            }
            "--help" | "-h" => bail!("{USAGE}"),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    match positional.next().as_deref() {
        None => return Ok(invocation),
        Some("confirm") => invocation.kind = Kind::Confirm,
        Some("alert") => invocation.kind = Kind::Alert,
        Some(other) => bail!("unknown dialog kind `{other}`\n{USAGE}"),
    }
    invocation.title = positional.next();
    if let Some(extra) = positional.next() {
        bail!("unexpected argument `{extra}`\n{USAGE}");
    }
    Ok(invocation)
}

fn parse_answer(value: &str) -> Result<Answer> {
    Ok(match value {
        "yes" | "y" => Answer::Yes,
        "no" | "n" => Answer::No,
        "dismiss" | "esc" => Answer::Dismiss,
        _ => bail!("unknown answer `{value}`\n{USAGE}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Invocation> {
        parse(list.iter().map(|arg| (*arg).to_string()))
    }

    #[test]
    fn no_arguments_confirm_with_defaults() {
        assert_eq!(args(&[]).unwrap(), Invocation::default());
    }

    #[test]
    fn kind_title_and_answer() {
        let invocation = args(&["alert", "Saved", "--answer", "dismiss"]).unwrap();
        assert_eq!(invocation.kind, Kind::Alert);
        assert_eq!(invocation.title.as_deref(), Some("Saved"));
        assert_eq!(invocation.answer, Answer::Dismiss);
    }

    #[test]
    fn answer_flag_may_come_first() {
        let invocation = args(&["-a", "n", "confirm"]).unwrap();
        assert_eq!(invocation.kind, Kind::Confirm);
        assert_eq!(invocation.answer, Answer::No);
        assert_eq!(invocation.title, None);
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(args(&["prompt"]).is_err());
        assert!(args(&["confirm", "--answer", "maybe"]).is_err());
        assert!(args(&["confirm", "--answer"]).is_err());
        assert!(args(&["confirm", "A", "B"]).is_err());
    }
}
