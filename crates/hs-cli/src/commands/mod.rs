pub mod actions;
pub mod edit;
pub mod export;
pub mod portrait;
pub mod roster;
pub mod show;

use std::fs;
use std::path::PathBuf;

use clap::ValueEnum;
use colored::Colorize;
use hs_core::{CharacterId, PoolKind};
use hs_session::{ActivityEntry, EntryKind, SheetConfig, SheetSession};

/// Options shared by every command.
pub struct Context {
    pub data_dir: PathBuf,
    pub character: Option<String>,
    pub seed: Option<u64>,
    pub offline: bool,
    pub journal: Option<PathBuf>,
}

/// Resource pool selector on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum Pool {
    /// Vitality
    Hp,
    /// Aura
    Nen,
}

impl Pool {
    pub fn kind(self) -> PoolKind {
        match self {
            Self::Hp => PoolKind::Hp,
            Self::Nen => PoolKind::Nen,
        }
    }
}

impl Context {
    fn config(&self) -> SheetConfig {
        let mut config = SheetConfig::default();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if !self.offline {
            config = config.with_data_dir(&self.data_dir);
        }
        config
    }
}

/// Open a session, load the roster, and select `--character` if given.
/// A failed load is reported and the session continues with the default
/// character. Offline sessions start from the default character.
fn open_session(ctx: &Context) -> Result<SheetSession, String> {
    let mut session = SheetSession::new(ctx.config());
    if let Err(e) = session.load() {
        eprintln!("{} {e}", "warning:".yellow());
    }
    if let Some(id) = &ctx.character {
        session
            .select(&CharacterId::from(id.as_str()))
            .map_err(|e| e.to_string())?;
    }
    Ok(session)
}

/// Save the active character unless running offline.
fn persist(session: &mut SheetSession) -> Result<(), String> {
    if session.is_offline() {
        return Ok(());
    }
    session.save().map_err(|e| format!("cannot save: {e}"))
}

/// Print log entries appended since `mark`, and write the whole activity
/// log of this run to `--journal` if given.
fn report(ctx: &Context, session: &SheetSession, mark: usize) -> Result<(), String> {
    for entry in session.log().since(mark) {
        print_entry(entry);
    }
    if let Some(path) = &ctx.journal {
        fs::write(path, session.log().export_text())
            .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    }
    Ok(())
}

fn print_entry(entry: &ActivityEntry) {
    let result = entry.result.to_string();
    let result = match entry.kind {
        EntryKind::Combat => result.red().bold(),
        EntryKind::Failure => result.red(),
        EntryKind::Info => result.cyan(),
    };
    if entry.detail.is_empty() {
        println!("  {}  {result}", entry.title.bold());
    } else {
        println!(
            "  {}  {result}  {}",
            entry.title.bold(),
            entry.detail.dimmed()
        );
    }
}
