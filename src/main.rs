use creature_duel::ai::AiTier;
use creature_duel::{run, CliOptions, Controller};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--p1 ID] [--p2 ID] [--tier1 1-5|--script1 SCRIPT] [--tier2 1-5|--script2 SCRIPT] \
[--seed SEED] [--roster roster.json] [--config battle.json] [--log-json out.json] [--list]\n\
SCRIPT: turns separated by ';', two commands per turn separated by ',' (e.g. \"advance,weaponattack;reflect,stancea\")"
    );
    std::process::exit(1);
}

fn parse_tier(val: &str) -> anyhow::Result<AiTier> {
    let level: u8 = val.parse()?;
    Ok(AiTier::try_from(level)?)
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut opts = CliOptions {
        roster_path: None,
        config_path: None,
        p1: "ironclad".to_string(),
        p2: "emberwitch".to_string(),
        controller1: Controller::Ai(AiTier::Situational),
        controller2: Controller::Ai(AiTier::Adaptive),
        seed: 0,
        log_json: None,
        list: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--p1" => {
                opts.p1 = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--p1 requires a combatant id"))?;
            }
            "--p2" => {
                opts.p2 = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--p2 requires a combatant id"))?;
            }
            "--tier1" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--tier1 requires a number from 1 to 5"))?;
                opts.controller1 = Controller::Ai(parse_tier(&val)?);
            }
            "--tier2" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--tier2 requires a number from 1 to 5"))?;
                opts.controller2 = Controller::Ai(parse_tier(&val)?);
            }
            "--script1" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--script1 requires a command script"))?;
                opts.controller1 = Controller::Script(val);
            }
            "--script2" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--script2 requires a command script"))?;
                opts.controller2 = Controller::Script(val);
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                opts.seed = val.parse()?;
            }
            "--roster" => {
                opts.roster_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--roster requires a path (e.g. --roster roster.json)")
                })?);
            }
            "--config" => {
                opts.config_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--config requires a path (e.g. --config battle.json)")
                })?);
            }
            "--log-json" => {
                opts.log_json = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--log-json requires a path (e.g. --log-json battle.json)")
                })?);
            }
            "--list" => opts.list = true,
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }
    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let opts = parse_args()?;
    run(opts)
}
