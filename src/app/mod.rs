mod calc;
mod commands;
mod console;
mod game;
mod password;
mod records;


use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use anyhow::Result;

use crate::cli::Cli;
use crate::credential::CredentialStore;
use crate::history::HistoryStore;
use crate::logging;
use crate::paths::DataPaths;

use self::calc::run_calculator;
use self::commands::MenuCommand;
use self::console::Console;
use self::game::{Opponent, RandomOpponent, run_game};
use self::password::{authorize, reset_password, set_up_password};
use self::records::{clear_history, show_history};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exit {
    Goodbye,
    AccessDenied,
    Unconfigured,
}

pub fn run(_cli: Cli) -> Result<()> {
    let paths = DataPaths::resolve()?;
    logging::init(&paths.log)?;
    log::info!("starting multitool with data in {}", paths.history.display());

    let credentials = CredentialStore::new(&paths.credential);
    let mut history = HistoryStore::load(&paths.history)?;
    let mut opponent = RandomOpponent::new();
    let mut console = Console::new(io::stdin().lock(), io::stdout());

    let exit = run_session(&mut console, &credentials, &mut history, &mut opponent)?;
    log::info!("session ended: {exit:?}");
    Ok(())
}

fn run_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    credentials: &CredentialStore,
    history: &mut HistoryStore,
    opponent: &mut impl Opponent,
) -> Result<Exit> {
    if !credentials.is_configured()
        && let ControlFlow::Break(exit) = set_up_password(console, credentials)?
    {
        return Ok(exit);
    }

    console.heading("Welcome to the multitasking program!")?;
    if console.ask("Press Enter to continue...")?.is_none() {
        return Ok(Exit::Goodbye);
    }
    if let ControlFlow::Break(exit) = authorize(console, credentials)? {
        return Ok(exit);
    }

    loop {
        console.heading("\n--- Main Menu ---")?;
        let Some(answer) = console.ask_keyword(
            "Options: Calc, Rock Paper Scissors, History, Clear History, Reset Password or Exit: ",
        )?
        else {
            return Ok(Exit::Goodbye);
        };
        let Some(command) = MenuCommand::parse(&answer) else {
            console.error("Invalid choice. Please try again.")?;
            continue;
        };
        log::debug!("menu command: {command:?}");

        match command {
            MenuCommand::Exit => {
                console.success("Thank you for using the multitasking program. Goodbye!")?;
                return Ok(Exit::Goodbye);
            }
            MenuCommand::Calc => run_calculator(console)?,
            MenuCommand::RockPaperScissors => run_game(console, opponent, history)?,
            MenuCommand::History => {
                if let ControlFlow::Break(exit) = authorize(console, credentials)? {
                    return Ok(exit);
                }
                show_history(console, history)?;
            }
            MenuCommand::ClearHistory => {
                if let ControlFlow::Break(exit) = authorize(console, credentials)? {
                    return Ok(exit);
                }
                clear_history(console, history)?;
            }
            MenuCommand::ResetPassword => {
                if let ControlFlow::Break(exit) = reset_password(console, credentials)? {
                    return Ok(exit);
                }
            }
        }
    }
}
