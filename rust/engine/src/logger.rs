use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{Game, RoundSummary};

/// Complete record of one finished blackjack round.
/// Serialized to JSONL for audit history and replay tooling.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Identity of the player who wagered on the round
    pub player_id: String,
    /// Wagered amount (already debited when the round started)
    pub bet: u32,
    /// Final player cards in draw order
    pub player_cards: Vec<Card>,
    /// Final player total after soft-ace adjustment
    pub player_total: u32,
    /// Final dealer cards in draw order (the hole card is never recorded)
    pub dealer_cards: Vec<Card>,
    /// Final dealer total
    pub dealer_total: u32,
    /// Whether the player busted
    pub player_busted: bool,
    /// Timestamp when the round finished (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn from_game(game: &Game) -> Self {
        Self::from_summary(game.summary())
    }

    pub fn from_summary(summary: RoundSummary) -> Self {
        Self {
            player_id: summary.player_id,
            bet: summary.bet,
            player_cards: summary.player_cards,
            player_total: summary.player_total,
            dealer_cards: summary.dealer_cards,
            dealer_total: summary.dealer_total,
            player_busted: summary.player_busted,
            ts: None,
        }
    }
}

/// Appends one JSON line per round to a history file.
pub struct RoundLogger {
    writer: BufWriter<File>,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(f),
        })
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
