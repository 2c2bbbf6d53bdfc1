use stalker_core::LEVEL_COUNT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchOptions {
    pub seed: SeedChoice,
    /// 0-based level index; the command line takes it 1-based.
    pub level: usize,
}

pub fn resolve_launch_from_args(
    args: &[String],
    generated_seed: u64,
) -> Result<LaunchOptions, String> {
    let mut selected_seed = None;
    let mut selected_level = None;
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();

        let (flag, inline_value) = match argument.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (argument, None),
        };
        if flag != "--seed" && flag != "--level" {
            index += 1;
            continue;
        }

        let value = match inline_value {
            Some(value) => value,
            None => {
                index += 1;
                args.get(index)
                    .map(String::as_str)
                    .ok_or_else(|| format!("missing value for {flag}"))?
            }
        };
        index += 1;

        if flag == "--seed" {
            if selected_seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            selected_seed = Some(parse_seed_value(value)?);
        } else {
            if selected_level.is_some() {
                return Err("level provided more than once".to_string());
            }
            selected_level = Some(parse_level_value(value)?);
        }
    }

    Ok(LaunchOptions {
        seed: match selected_seed {
            Some(seed) => SeedChoice::Cli(seed),
            None => SeedChoice::Generated(generated_seed),
        },
        level: selected_level.unwrap_or(0),
    })
}

fn parse_seed_value(raw_value: &str) -> Result<u64, String> {
    raw_value.parse::<u64>().map_err(|_| format!("seed value '{raw_value}' must be a number"))
}

fn parse_level_value(raw_value: &str) -> Result<usize, String> {
    match raw_value.parse::<usize>() {
        Ok(level) if (1..=LEVEL_COUNT).contains(&level) => Ok(level - 1),
        _ => Err(format!("level value '{raw_value}' must be between 1 and {LEVEL_COUNT}")),
    }
}
