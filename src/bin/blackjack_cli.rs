// src/bin/blackjack_cli.rs

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dialoguer::Input;
use log::info;
use thiserror::Error;

use blackjack_engine::domain::{
    validate_roster, ConfigError, ForfeitPolicy, HoleCardTiming, TableConfig,
};
use blackjack_engine::engine::{DecisionProvider, EngineError, NullObserver, Round, RoundObserver};
use blackjack_engine::infra::{AnyRng, ConsoleDecisions, ConsoleReporter, ThresholdBot};

/// Блэкджек: дилер против одного или нескольких игроков.
#[derive(Parser, Debug)]
#[command(name = "blackjack_cli", version, about)]
struct Args {
    /// Количество игроков (если не задано: спросим).
    #[arg(short = 'n', long)]
    players: Option<usize>,

    /// Имя игрока; флаг повторяется, порядок = порядок ходов.
    #[arg(long = "name", value_name = "NAME")]
    names: Vec<String>,

    /// Колода в 4 мастях.
    #[arg(long, conflicts_with = "unsuited")]
    suited: bool,

    /// Колода только из рангов (одна неявная масть).
    #[arg(long)]
    unsuited: bool,

    /// Сколько комплектов в колоде.
    #[arg(long, value_name = "N")]
    decks: Option<u32>,

    /// Когда дилер получает закрытую карту.
    #[arg(long, value_enum)]
    dealer_hole_card: Option<HoleCardArg>,

    /// Что делать с игроком, чей ввод недоступен.
    #[arg(long, value_enum)]
    forfeit: Option<ForfeitArg>,

    /// Seed для воспроизводимой колоды.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML-файл с конфигом стола; флаги перекрывают значения из файла.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Автоигра: все игроки: боты, которые берут карту, пока очки меньше порога.
    #[arg(long, value_name = "THRESHOLD")]
    bot: Option<u32>,

    /// Вывести итог раунда в JSON вместо построчного лога.
    #[arg(long)]
    json: bool,
}

/// Внешнее представление `HoleCardTiming` (CLI-слой).
#[derive(Clone, Copy, Debug, ValueEnum)]
enum HoleCardArg {
    Immediate,
    Deferred,
}

/// Внешнее представление `ForfeitPolicy` (CLI-слой).
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ForfeitArg {
    Stand,
    Bust,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Не удалось прочитать конфиг {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Ошибка ввода: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Ошибка сериализации: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Engine(e.into())
    }
}

impl CliError {
    /// 2: некорректная конфигурация, 3: колода кончилась, 1: всё остальное.
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Engine(EngineError::Config(_)) | CliError::ConfigFile { .. } => 2,
            CliError::Engine(e) if e.is_deck_exhausted() => 3,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[CLI] ОШИБКА: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = load_config(&args)?;
    let names = resolve_names(args.players, &args.names)?;
    info!("конфиг стола: {:?}", config);

    let mut rng = AnyRng::from_optional_seed(args.seed);
    let mut round = Round::new(config, names, &mut rng)?;

    let mut provider: Box<dyn DecisionProvider> = match args.bot {
        Some(threshold) => Box::new(ThresholdBot::new(threshold)),
        None => Box::new(ConsoleDecisions),
    };
    let mut observer: Box<dyn RoundObserver> = if args.json {
        Box::new(NullObserver)
    } else {
        Box::new(ConsoleReporter::stdout())
    };

    let summary = round.play(provider.as_mut(), observer.as_mut())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

/// Конфиг: значения по умолчанию → файл → флаги.
fn load_config(args: &Args) -> Result<TableConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| CliError::ConfigFile {
                path: path.clone(),
                source,
            })?;
            TableConfig::from_toml_str(&raw)?
        }
        None => TableConfig::default(),
    };

    if args.suited {
        config.suited = true;
    }
    if args.unsuited {
        config.suited = false;
    }
    if let Some(decks) = args.decks {
        config.deck_copies = decks;
    }
    if let Some(timing) = args.dealer_hole_card {
        config.dealer_hole_card = match timing {
            HoleCardArg::Immediate => HoleCardTiming::Immediate,
            HoleCardArg::Deferred => HoleCardTiming::Deferred,
        };
    }
    if let Some(policy) = args.forfeit {
        config.forfeit = match policy {
            ForfeitArg::Stand => ForfeitPolicy::Stand,
            ForfeitArg::Bust => ForfeitPolicy::Bust,
        };
    }

    config.validate()?;
    Ok(config)
}

/// Состав игроков: из флагов, недостающее спрашиваем в терминале.
fn resolve_names(players: Option<usize>, given: &[String]) -> Result<Vec<String>, CliError> {
    let count = match planned_count(players, given)? {
        Some(n) => n,
        None => prompt_player_count()?,
    };

    let mut names = validate_roster(given.iter().cloned()).or_else(|e| match e {
        ConfigError::NoPlayers => Ok(Vec::new()),
        e => Err(e),
    })?;
    for idx in names.len()..count {
        let name: String = Input::new()
            .with_prompt(format!("Name of player {}", idx + 1))
            .validate_with(|input: &String| check_new_name(&names, input))
            .interact_text()?;
        names.push(name.trim().to_string());
    }
    Ok(names)
}

/// Сколько игроков нужно по флагам; `None`: спросить в терминале.
fn planned_count(players: Option<usize>, given: &[String]) -> Result<Option<usize>, ConfigError> {
    match players {
        Some(0) => Err(ConfigError::NoPlayers),
        Some(n) if n < given.len() => Err(ConfigError::PlayerCountMismatch {
            expected: n,
            got: given.len(),
        }),
        Some(n) => Ok(Some(n)),
        None if !given.is_empty() => Ok(Some(given.len())),
        None => Ok(None),
    }
}

/// Имя, введённое в терминале: непустое и ещё не занятое.
fn check_new_name(taken: &[String], input: &str) -> Result<(), String> {
    let name = input.trim();
    if name.is_empty() {
        return Err(String::from("Name cannot be empty."));
    }
    if taken.iter().any(|t| t == name) {
        return Err(format!("{name} is already at the table."));
    }
    Ok(())
}

/// Переспрашиваем, пока не введут положительное целое.
fn prompt_player_count() -> Result<usize, CliError> {
    let raw: String = Input::new()
        .with_prompt("How many players?")
        .validate_with(|input: &String| -> Result<(), String> {
            match input.trim().parse::<usize>() {
                Ok(n) if n > 0 => Ok(()),
                _ => Err(String::from("Enter a valid number.")),
            }
        })
        .interact_text()?;
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::NoPlayers.into())
}
