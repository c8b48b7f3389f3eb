//! # chipjack CLI
//!
//! A terminal front-end for the chipjack bot service, mainly useful for
//! trying the game rules out without any chat platform attached. Balances
//! live in the in-memory store, so they last for one process.
//!
//! ## Subcommands
//!
//! - `play`: interactive hit/stand loop against the dealer
//! - `balance`: show the current balance
//! - `fountain`: claim the fountain grant

use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use chipjack_bot::{Bank, BotError, Dispatcher, GameRegistry, RoundResponse};

/// Player identity used for the whole CLI session.
const LOCAL_PLAYER: &str = "local";

pub const EXIT_OK: i32 = 0;
pub const EXIT_INVALID_INPUT: i32 = 2;

#[derive(Parser)]
#[command(name = "chipjack", about = "Blackjack bot service, terminal edition")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Play blackjack rounds interactively (h = hit, s = stand, q = quit)
    Play {
        /// Bet per round
        #[arg(long, default_value_t = 10)]
        bet: u32,
        /// Deterministic deck seed (omit for OS entropy)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the current balance
    Balance,
    /// Claim coins from the fountain
    Fountain,
}

/// Parses `args` and executes the chosen subcommand, reading player input
/// from `input` and writing to `out`/`err`. Returns the process exit code.
pub fn run<I, T, R, W, E>(args: I, input: &mut R, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    R: BufRead,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(parse_err) => {
            let _ = write!(err, "{}", parse_err);
            return EXIT_INVALID_INPUT;
        }
    };

    let bot = Dispatcher::new(Arc::new(GameRegistry::new()), Arc::new(Bank::in_memory()));

    let result = match cli.command {
        Command::Play { bet, seed } => play(&bot, bet, seed, input, out),
        Command::Balance => {
            writeln!(out, "Balance: {}", bot.balance(LOCAL_PLAYER)).map(|_| EXIT_OK)
        }
        Command::Fountain => match bot.claim_fountain(LOCAL_PLAYER) {
            Ok(balance) => {
                writeln!(out, "Fountain claimed. Balance: {}", balance).map(|_| EXIT_OK)
            }
            Err(bot_err) => writeln!(out, "{}", bot_err).map(|_| EXIT_INVALID_INPUT),
        },
    };

    match result {
        Ok(code) => code,
        Err(io_err) => {
            let _ = writeln!(err, "I/O error: {}", io_err);
            EXIT_INVALID_INPUT
        }
    }
}

fn play<R: BufRead, W: Write>(
    bot: &Dispatcher,
    bet: u32,
    seed: Option<u64>,
    input: &mut R,
    out: &mut W,
) -> std::io::Result<i32> {
    let opening = match seed {
        Some(seed) => bot.start_round_seeded(LOCAL_PLAYER, bet, seed),
        None => bot.start_round(LOCAL_PLAYER, bet),
    };
    let opening = match opening {
        Ok(response) => response,
        Err(bot_err) => {
            writeln!(out, "{}", bot_err)?;
            return Ok(EXIT_INVALID_INPUT);
        }
    };
    writeln!(out, "{}", opening.text)?;

    loop {
        writeln!(out, "[h]it, [s]tand or [q]uit?")?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // stdin closed: walk away from the table
            bot.registry().remove(LOCAL_PLAYER);
            return Ok(EXIT_OK);
        }
        let response = match line.trim().to_lowercase().as_str() {
            "h" | "hit" => bot.hit(LOCAL_PLAYER),
            "s" | "stand" => bot.stand(LOCAL_PLAYER),
            "q" | "quit" => {
                bot.registry().remove(LOCAL_PLAYER);
                return Ok(EXIT_OK);
            }
            other => {
                writeln!(out, "Unknown input: {:?}", other)?;
                continue;
            }
        };
        match response {
            Ok(RoundResponse {
                text, finished, ..
            }) => {
                writeln!(out, "{}", text)?;
                if finished {
                    writeln!(out, "Balance: {}", bot.balance(LOCAL_PLAYER))?;
                    return Ok(EXIT_OK);
                }
            }
            Err(BotError::RoundAborted(_)) => {
                writeln!(out, "The game ended abnormally.")?;
                return Ok(EXIT_OK);
            }
            Err(bot_err) => {
                writeln!(out, "{}", bot_err)?;
                return Ok(EXIT_INVALID_INPUT);
            }
        }
    }
}
