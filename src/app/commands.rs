use super::console::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuCommand {
    Calc,
    RockPaperScissors,
    History,
    ClearHistory,
    ResetPassword,
    Exit,
}

const MENU_ALIASES: &[(&str, MenuCommand)] = &[
    ("calc", MenuCommand::Calc),
    ("rock paper scissors", MenuCommand::RockPaperScissors),
    ("rps", MenuCommand::RockPaperScissors),
    ("history", MenuCommand::History),
    ("clear history", MenuCommand::ClearHistory),
    ("reset password", MenuCommand::ResetPassword),
    ("exit", MenuCommand::Exit),
];

pub(crate) const EXIT_KEYWORD: &str = "exit";
const AFFIRMATIVE: &str = "yes";

impl MenuCommand {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        let wanted = normalize(input);
        MENU_ALIASES
            .iter()
            .find(|(alias, _)| *alias == wanted)
            .map(|(_, command)| *command)
    }
}

pub(crate) fn is_affirmative(input: &str) -> bool {
    normalize(input) == AFFIRMATIVE
}

pub(crate) fn is_exit(input: &str) -> bool {
    normalize(input) == EXIT_KEYWORD
}
