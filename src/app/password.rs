use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use anyhow::Result;

use super::Exit;
use super::console::Console;
use crate::credential::{Access, CredentialStore, MIN_PASSWORD_LEN, Reset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PasswordKind {
    Alphabetical,
    Numerical,
}

impl PasswordKind {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        match input {
            "a" => Some(Self::Alphabetical),
            "n" => Some(Self::Numerical),
            _ => None,
        }
    }
}

pub(super) fn set_up_password<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    credentials: &CredentialStore,
) -> Result<ControlFlow<Exit>> {
    loop {
        console.heading("Your password can either be numerical or alphabetical.")?;
        let Some(answer) = console.ask_keyword("Type a for alphabetical and n for numerical: ")?
        else {
            return Ok(ControlFlow::Break(Exit::Unconfigured));
        };
        let Some(kind) = PasswordKind::parse(&answer) else {
            console.error("Invalid choice. Please try again.")?;
            continue;
        };

        let Some(password) = console.ask("Enter your password: ")? else {
            return Ok(ControlFlow::Break(Exit::Unconfigured));
        };
        match credentials.set_up(&password)? {
            Some(_) => {
                log::debug!("first password set, chosen kind {kind:?}");
                console.success("Password set successfully!")?;
                return Ok(ControlFlow::Continue(()));
            }
            None => console.error(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long. Please try again."
            ))?,
        }
    }
}

pub(super) fn authorize<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    credentials: &CredentialStore,
) -> Result<ControlFlow<Exit, String>> {
    if !credentials.is_configured() {
        console.error("No password found. Please set one first.")?;
        return Ok(ControlFlow::Break(Exit::Unconfigured));
    }
    let Some(entered) = console.ask("Enter your password to continue: ")? else {
        console.error("Incorrect password. Exiting program...")?;
        return Ok(ControlFlow::Break(Exit::AccessDenied));
    };
    match credentials.verify(&entered)? {
        Access::Granted => {
            console.success("Password verified. You can continue.")?;
            Ok(ControlFlow::Continue(entered))
        }
        Access::Denied => {
            console.error("Incorrect password. Exiting program...")?;
            Ok(ControlFlow::Break(Exit::AccessDenied))
        }
        Access::Unconfigured => {
            console.error("No password found. Please set one first.")?;
            Ok(ControlFlow::Break(Exit::Unconfigured))
        }
    }
}

pub(super) fn reset_password<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    credentials: &CredentialStore,
) -> Result<ControlFlow<Exit>> {
    let old = match authorize(console, credentials)? {
        ControlFlow::Continue(old) => old,
        ControlFlow::Break(exit) => return Ok(ControlFlow::Break(exit)),
    };
    console.heading("\n--- Reset Password ---")?;
    let Some(new) = console.ask("Enter your new password: ")? else {
        return Ok(ControlFlow::Continue(()));
    };
    match credentials.reset(&old, &new)? {
        Reset::Changed => console.success("Password reset successfully!")?,
        Reset::TooShort => console.error(&format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long."
        ))?,
        Reset::Denied => return Ok(ControlFlow::Break(Exit::AccessDenied)),
        Reset::Unconfigured => return Ok(ControlFlow::Break(Exit::Unconfigured)),
    }
    Ok(ControlFlow::Continue(()))
}
