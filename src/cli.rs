use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "multitool",
    version,
    about = "Password-gated menu with a calculator and Rock-Paper-Scissors"
)]
pub struct Cli {}
