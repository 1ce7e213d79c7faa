use anyhow::{bail, Context, Result};
use swipeable_demo::{bundled_script, parse_script, Pacing, ScriptRunner, BUNDLED_SCRIPTS};

const USAGE: &str = "usage: swipeable-demo [--realtime] [SCRIPT | @NAME]";

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut pacing = Pacing::Virtual;
    let mut source_arg = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--realtime" => pacing = Pacing::Realtime,
            "-h" | "--help" => {
                println!("{USAGE}");
                println!("bundled scripts:");
                for (name, _) in BUNDLED_SCRIPTS {
                    println!("  @{name}");
                }
                return Ok(());
            }
            flag if flag.starts_with('-') => bail!("unknown flag `{flag}`\n{USAGE}"),
            _ if source_arg.is_some() => bail!("only one script may be given\n{USAGE}"),
            _ => source_arg = Some(arg),
        }
    }

    let (name, source) = match source_arg {
        None => ("@commit".to_owned(), bundled_script("commit").unwrap_or_default().to_owned()),
        Some(arg) => match arg.strip_prefix('@') {
            Some(bundled) => {
                let source = bundled_script(bundled)
                    .with_context(|| format!("no bundled script named `{bundled}`"))?;
                (arg.clone(), source.to_owned())
            }
            None => {
                let source = std::fs::read_to_string(&arg)
                    .with_context(|| format!("failed to read script {arg}"))?;
                (arg, source)
            }
        },
    };

    let script = parse_script(&source).with_context(|| format!("invalid script {name}"))?;
    println!("=== Swipeable button: {name} ({pacing:?} clock) ===");

    let mut runner = ScriptRunner::new(script.options, pacing);
    for command in &script.commands {
        let report = runner.execute(command)?;
        println!("{report}");
    }

    println!("final state: {}", runner.controller().state());
    Ok(())
}
