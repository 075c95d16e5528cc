//! CLI frontend for the Hunter Sheet character sheet.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::edit::{
    AttrCommand, ConditionCommand, Field, ItemCommand, SkillCommand, SummonCommand,
    SummonSkillCommand, WeaponFields,
};
use commands::{Context, Pool};

#[derive(Parser)]
#[command(
    name = "hsheet",
    about = "Hunter Sheet: a tabletop character sheet with dice and resource tracking",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding stored characters
    #[arg(long, global = true, default_value = "sheets")]
    data_dir: PathBuf,

    /// Character to act on (default: most recently updated)
    #[arg(short, long, global = true)]
    character: Option<String>,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Do not read or write the data directory
    #[arg(long, global = true)]
    offline: bool,

    /// Write the activity log of this run to a text file
    #[arg(long, global = true)]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory with the default character
    Init,

    /// List stored characters
    List,

    /// Show the full sheet of a character
    Show,

    /// Create a new character from the default template
    New {
        /// Character name
        name: String,
    },

    /// Delete a character
    Delete {
        /// Character id
        id: String,
    },

    /// Roll dice notation such as 2d6
    Roll {
        /// Dice notation
        notation: String,
    },

    /// Use a skill, paying its cost
    Use {
        /// Skill id
        id: String,

        /// Use a summon's skill instead of the character's
        #[arg(short, long)]
        summon: Option<String>,
    },

    /// Attack with the equipped weapon
    Attack,

    /// Roll 1d20 plus an attribute
    Check {
        /// Attribute key
        attribute: String,
    },

    /// Add to or subtract from a resource pool
    Adjust {
        /// Pool to change
        #[arg(value_enum)]
        pool: Pool,

        /// Signed amount
        #[arg(allow_negative_numbers = true)]
        delta: i32,

        /// Adjust a summon's pool instead of the character's
        #[arg(short, long)]
        summon: Option<String>,
    },

    /// Rest and recover a fifth of HP and Nen
    Rest,

    /// Attach a portrait image
    Portrait {
        /// Image file
        file: PathBuf,

        /// Attach to a skill
        #[arg(long, conflicts_with_all = ["summon", "weapon", "attribute"])]
        skill: Option<String>,

        /// Attach to a summon
        #[arg(long, conflicts_with_all = ["weapon", "attribute"])]
        summon: Option<String>,

        /// Attach to the equipped weapon
        #[arg(long, conflicts_with = "attribute")]
        weapon: bool,

        /// Attach to an attribute card
        #[arg(long)]
        attribute: Option<String>,
    },

    /// Set a top-level field of the character
    Set {
        /// Field to change
        #[arg(value_enum)]
        field: Field,

        /// New value
        #[arg(allow_negative_numbers = true)]
        value: String,
    },

    /// Add, remove, set, or relabel attributes
    Attr {
        #[command(subcommand)]
        action: AttrCommand,
    },

    /// Add, remove, or change skills
    Skill {
        #[command(subcommand)]
        action: SkillCommand,
    },

    /// Add, remove, or change inventory items
    Item {
        #[command(subcommand)]
        action: ItemCommand,
    },

    /// Add, remove, or change summons
    Summon {
        #[command(subcommand)]
        action: SummonCommand,
    },

    /// Add, remove, or change a summon's skills
    SummonSkill {
        #[command(subcommand)]
        action: SummonSkillCommand,
    },

    /// Add or remove conditions
    Condition {
        #[command(subcommand)]
        action: ConditionCommand,
    },

    /// Change the equipped weapon
    Weapon {
        #[command(flatten)]
        fields: WeaponFields,
    },

    /// Export every character as JSON
    Export {
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context {
        data_dir: cli.data_dir,
        character: cli.character,
        seed: cli.seed,
        offline: cli.offline,
        journal: cli.journal,
    };

    let result = match cli.command {
        Commands::Init => commands::roster::init(&ctx),
        Commands::List => commands::roster::list(&ctx),
        Commands::Show => commands::show::run(&ctx),
        Commands::New { name } => commands::roster::new(&ctx, &name),
        Commands::Delete { id } => commands::roster::delete(&ctx, &id),
        Commands::Roll { notation } => commands::actions::roll(&ctx, &notation),
        Commands::Use { id, summon } => {
            commands::actions::use_skill(&ctx, &id, summon.as_deref())
        }
        Commands::Attack => commands::actions::attack(&ctx),
        Commands::Check { attribute } => commands::actions::check(&ctx, &attribute),
        Commands::Adjust {
            pool,
            delta,
            summon,
        } => commands::actions::adjust(&ctx, pool.kind(), delta, summon.as_deref()),
        Commands::Rest => commands::actions::rest(&ctx),
        Commands::Portrait {
            file,
            skill,
            summon,
            weapon,
            attribute,
        } => {
            let target = commands::portrait::target(skill, summon, weapon, attribute);
            commands::portrait::run(&ctx, &file, target)
        }
        Commands::Set { field, value } => commands::edit::set(&ctx, field, &value),
        Commands::Attr { action } => commands::edit::attr(&ctx, action),
        Commands::Skill { action } => commands::edit::skill(&ctx, action),
        Commands::Item { action } => commands::edit::item(&ctx, action),
        Commands::Summon { action } => commands::edit::summon(&ctx, action),
        Commands::SummonSkill { action } => commands::edit::summon_skill(&ctx, action),
        Commands::Condition { action } => commands::edit::condition(&ctx, action),
        Commands::Weapon { fields } => commands::edit::weapon(&ctx, fields),
        Commands::Export { output } => commands::export::run(&ctx, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
