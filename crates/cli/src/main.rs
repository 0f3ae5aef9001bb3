mod headless;

use dreamroster_core::{FullRosterStage, Role, Stage};
use headless::{Command, OutputMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Command,
    seed: u64,
    assets: PathBuf,
    output: OutputMode,
}

fn parse_role(value: &str) -> Result<Role, String> {
    Role::parse(value).ok_or_else(|| {
        format!("unknown role '{value}' (expected top, jungle, mid, adc or support)")
    })
}

fn parse_stage(value: &str) -> Result<FullRosterStage, String> {
    FullRosterStage::ORDER
        .iter()
        .copied()
        .find(|stage| stage.label().eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("unknown full roster stage '{value}'"))
}

fn parse_cli_options(args: &[String]) -> Result<CliOptions, String> {
    let mut cui = false;
    let mut json = false;
    let mut skip = false;
    let mut full_roster = false;
    let mut skip_at = None;
    let mut seed = std::env::var("DREAMROSTER_SEED")
        .ok()
        .and_then(|value| value.parse::<u64>().ok());
    let mut assets = std::env::var("DREAMROSTER_ASSETS").ok().map(PathBuf::from);
    let mut positional: Vec<&str> = Vec::new();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--cui" => cui = true,
            "--json" => json = true,
            "--skip" => skip = true,
            "--full-roster" => full_roster = true,
            "--seed" => {
                let value = args.get(idx + 1).ok_or("--seed needs a value")?;
                seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("invalid seed '{value}'"))?,
                );
                idx += 1;
            }
            "--assets" => {
                let value = args.get(idx + 1).ok_or("--assets needs a directory")?;
                assets = Some(PathBuf::from(value));
                idx += 1;
            }
            "--skip-at" => {
                let value = args.get(idx + 1).ok_or("--skip-at needs a stage")?;
                skip_at = Some(parse_stage(value)?);
                idx += 1;
            }
            "-h" | "--help" => positional.insert(0, "help"),
            other if other.starts_with("--") => return Err(format!("unknown flag {other}")),
            other => positional.push(other),
        }
        idx += 1;
    }

    let command = if cui {
        Command::Cui
    } else {
        match positional.split_first() {
            None | Some((&"help", _)) => Command::Help,
            Some((&"draw", rest)) => {
                if rest.is_empty() {
                    return Err("draw needs at least one role".to_string());
                }
                let roles = rest
                    .iter()
                    .map(|value| parse_role(value))
                    .collect::<Result<Vec<_>, _>>()?;
                Command::Draw {
                    roles,
                    skip,
                    full_roster,
                }
            }
            Some((&"showcase", rest)) => {
                if rest.is_empty() {
                    return Err("showcase needs a roster name".to_string());
                }
                Command::Showcase {
                    name: rest.join(" "),
                    skip_at,
                }
            }
            Some((&"catalog", _)) => Command::Catalog,
            Some((other, _)) => return Err(format!("unknown command '{other}'")),
        }
    };

    Ok(CliOptions {
        command,
        seed: seed.unwrap_or(dreamroster_cui::DEFAULT_SEED),
        assets: assets.unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
        output: if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        },
    })
}

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("DREAMROSTER_LOG").unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("install log subscriber: {err}"))
}

fn print_help() {
    println!("usage:");
    println!("  dreamroster-cli draw <role>... [--skip] [--full-roster] [--seed N] [--json]");
    println!("  dreamroster-cli showcase <name> [--skip-at <stage>] [--json]");
    println!("  dreamroster-cli catalog [--json]");
    println!("  dreamroster-cli --cui [--seed N]");
    println!("common: --assets DIR (or DREAMROSTER_ASSETS), --seed N (or DREAMROSTER_SEED)");
    println!("roles: top jungle mid adc support");
    println!("stages: initial merging flash champion splitting upgraded");
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            print_help();
            std::process::exit(2);
        }
    };
    if options.command == Command::Cui {
        let launch = dreamroster_cui::LaunchOptions {
            seed: Some(options.seed),
            assets: Some(options.assets),
        };
        if let Err(err) = dreamroster_cui::run(launch) {
            eprintln!("cui launch error: {err:#}");
            std::process::exit(1);
        }
        return;
    }
    if options.command == Command::Help {
        print_help();
        return;
    }
    if let Err(err) = init_logging() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
    let mut stdout = std::io::stdout().lock();
    if let Err(err) = headless::run(
        &options.command,
        &options.assets,
        options.seed,
        options.output,
        &mut stdout,
    ) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(values: &[&str]) -> Result<CliOptions, String> {
        let args: Vec<String> = values.iter().map(|value| value.to_string()).collect();
        parse_cli_options(&args)
    }

    #[test]
    fn draw_takes_roles_and_flags() {
        let options = parse(&["draw", "top", "ADC", "--skip", "--seed", "9", "--json"]).expect("parse");
        assert_eq!(
            options.command,
            Command::Draw {
                roles: vec![Role::Top, Role::Adc],
                skip: true,
                full_roster: false,
            }
        );
        assert_eq!(options.seed, 9);
        assert_eq!(options.output, OutputMode::Json);
    }

    #[test]
    fn showcase_name_may_contain_spaces() {
        let options = parse(&["showcase", "T1", "2024", "--skip-at", "merging"]).expect("parse");
        assert_eq!(
            options.command,
            Command::Showcase {
                name: "T1 2024".to_string(),
                skip_at: Some(FullRosterStage::Merging),
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["draw"]).is_err());
        assert!(parse(&["draw", "bottom"]).is_err());
        assert!(parse(&["showcase", "G2", "--skip-at", "later"]).is_err());
        assert!(parse(&["dance"]).is_err());
        assert!(parse(&["catalog", "--seed"]).is_err());
        assert!(parse(&["catalog", "--loud"]).is_err());
    }

    #[test]
    fn second_logging_init_reports_an_error() {
        let _ = init_logging();
        let err = init_logging().unwrap_err();
        assert!(err.to_string().contains("install log subscriber"));
    }

    #[test]
    fn cui_flag_wins_and_no_args_means_help() {
        assert_eq!(parse(&["draw", "top", "--cui"]).expect("parse").command, Command::Cui);
        assert_eq!(parse(&[]).expect("parse").command, Command::Help);
        assert_eq!(parse(&["--assets", "/data"]).expect("parse").assets, PathBuf::from("/data"));
    }
}
