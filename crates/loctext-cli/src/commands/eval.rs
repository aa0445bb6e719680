//! Implementation of the `loctext eval` command.

use std::path::PathBuf;

use clap::{ArgGroup, Args};
use loctext::interpreter::DEFAULT_RESOURCE_ROOT;
use loctext::{Character, Gender, Item, SharedRng, Store, Subject, Value};
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;

/// Arguments for the eval command.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("subject").args(["bool", "chara", "item"])))]
pub struct EvalArgs {
    /// Directory holding one subdirectory per locale.
    #[arg(long, default_value = DEFAULT_RESOURCE_ROOT)]
    pub root: PathBuf,

    /// Locale to load (e.g., en, jp)
    #[arg(long, required = true)]
    pub lang: String,

    /// Dotted key to look up (e.g., core.locale.ability.gain)
    #[arg(long, required = true)]
    pub key: String,

    /// Use a boolean subject
    #[arg(long)]
    pub bool: Option<bool>,

    /// Use a character subject with this name
    #[arg(long)]
    pub chara: Option<String>,

    /// The character is female
    #[arg(long, requires = "chara")]
    pub female: bool,

    /// The character is the player
    #[arg(long, requires = "chara")]
    pub player: bool,

    /// The character cannot be seen
    #[arg(long, requires = "chara")]
    pub hidden: bool,

    /// Use an item subject with this name
    #[arg(long)]
    pub item: Option<String>,

    /// Stack size of the item subject
    #[arg(long, default_value_t = 1, requires = "item")]
    pub count: i64,

    /// Positional values bound to _2, _3, ... (`key:<path>` for a key)
    #[arg(short = 'a', long = "arg", value_parser = parse_value)]
    pub args: Vec<Value>,

    /// Seed for variant selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub key: String,
    pub language: String,
    pub result: String,
}

/// Parse a positional value: `key:<path>`, an integer, a boolean, or text.
fn parse_value(s: &str) -> Result<Value, String> {
    if let Some(path) = s.strip_prefix("key:") {
        if path.is_empty() {
            return Err("expected a dotted key after 'key:'".to_string());
        }
        return Ok(Value::key(path));
    }
    if let Ok(n) = s.parse::<i64>() {
        return Ok(Value::from(n));
    }
    match s {
        "true" => Ok(Value::from(true)),
        "false" => Ok(Value::from(false)),
        _ => Ok(Value::from(s)),
    }
}

/// A character described on the command line.
struct CliCharacter {
    name: String,
    gender: Gender,
    player: bool,
    hidden: bool,
}

impl Character for CliCharacter {
    fn index(&self) -> usize {
        usize::from(!self.player)
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn base_name(&self) -> String {
        self.name.clone()
    }

    fn gender(&self) -> Gender {
        self.gender
    }

    fn is_visible(&self) -> bool {
        !self.hidden
    }
}

/// An item stack described on the command line.
struct CliItem {
    name: String,
    count: i64,
}

impl Item for CliItem {
    fn index(&self) -> usize {
        0
    }

    fn id(&self) -> u32 {
        0
    }

    fn count(&self) -> i64 {
        self.count
    }

    fn name(&self) -> String {
        if self.count == 1 {
            self.name.clone()
        } else {
            format!("{} {}", self.count, self.name)
        }
    }

    fn base_name(&self) -> String {
        self.name.clone()
    }
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let rng = args.seed.map(SharedRng::seeded).unwrap_or_default();
    let mut store = Store::builder()
        .resource_root(args.root.clone())
        .rng(rng)
        .build();
    store
        .load(&args.lang)
        .map_err(|e| miette!("failed to load locale '{}': {e}", args.lang))?;

    if !store.contains(&args.key) {
        eprintln!("warning: key '{}' is not defined", args.key);
    }

    let chara = args.chara.as_ref().map(|name| CliCharacter {
        name: name.clone(),
        gender: if args.female { Gender::Female } else { Gender::Male },
        player: args.player,
        hidden: args.hidden,
    });
    let item = args.item.as_ref().map(|name| CliItem {
        name: name.clone(),
        count: args.count,
    });
    let subject = match (&chara, &item, args.bool) {
        (Some(chara), _, _) => Subject::Character(chara),
        (None, Some(item), _) => Subject::Item(item),
        (None, None, Some(value)) => Subject::Bool(value),
        (None, None, None) => Subject::None,
    };

    let result = store.lookup_with(&args.key, subject, &args.args);
    if args.json {
        let output = EvalResult {
            key: args.key.clone(),
            language: store.language().to_string(),
            result,
        };
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        println!("{result}");
    }

    if store.contains(&args.key) {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
