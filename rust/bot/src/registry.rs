use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};

use chipjack_engine::game::Game;

const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// A registered round plus its activity stamp. All mutation of the
/// underlying [`Game`] goes through [`GameEntry::lock`], which is what gives
/// each player's round single-writer semantics even under duplicate rapid
/// requests.
#[derive(Debug)]
pub struct GameEntry {
    game: Mutex<Game>,
    last_active: Mutex<Instant>,
}

impl GameEntry {
    fn new(game: Game) -> Self {
        Self {
            game: Mutex::new(game),
            last_active: Mutex::new(Instant::now()),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Game> {
        match self.game.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn touch(&self) {
        let mut stamp = match self.last_active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *stamp = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        let stamp = match self.last_active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        stamp.elapsed()
    }
}

/// In-process mapping from player identity to their one live round.
///
/// The registry is mechanical: `save` overwrites, `get` never fails, and
/// `remove` is a no-op when the key is absent. Refusing a new round while
/// one is active is the caller's job (it checks `get` first); deciding when
/// a finished or aborted round leaves the table is also the caller's job.
/// Rounds idle past the TTL are evicted by [`GameRegistry::sweep_idle`] so
/// abandoned games do not accumulate for the life of the process.
#[derive(Debug)]
pub struct GameRegistry {
    games: RwLock<HashMap<String, Arc<GameEntry>>>,
    idle_ttl: Duration,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_IDLE_TTL)
    }

    pub fn with_ttl(idle_ttl: Duration) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Inserts or overwrites the entry for the game's player identity.
    pub fn save(&self, game: Game) -> Arc<GameEntry> {
        let player_id = game.player_id().to_string();
        let entry = Arc::new(GameEntry::new(game));
        let mut guard = match self.games.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.insert(player_id, Arc::clone(&entry));
        entry
    }

    /// The live round for a player, or `None`. Never fails.
    pub fn get(&self, player_id: &str) -> Option<Arc<GameEntry>> {
        let guard = match self.games.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.get(player_id).cloned()
    }

    /// Deletes the entry if present; no-op otherwise.
    pub fn remove(&self, player_id: &str) -> Option<Arc<GameEntry>> {
        let mut guard = match self.games.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.remove(player_id)
    }

    pub fn active_players(&self) -> Vec<String> {
        let guard = match self.games.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.keys().cloned().collect()
    }

    /// Evicts rounds idle past the TTL, returning the evicted player ids.
    pub fn sweep_idle(&self) -> Vec<String> {
        let mut evicted = Vec::new();
        {
            let mut guard = match self.games.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.retain(|player_id, entry| {
                if entry.idle_for() > self.idle_ttl {
                    evicted.push(player_id.clone());
                    false
                } else {
                    true
                }
            });
        }
        for player_id in &evicted {
            tracing::info!(player_id = %player_id, "evicted idle blackjack round");
        }
        evicted
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
