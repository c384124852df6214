use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use glowcalm::AppContext;
use glowcalm::commands;
use glowcalm::logging;
use glowcalm::printer;
use glowcalm::readline;
use glowcalm_core::BreathKind;
use glowcalm_core::app_info::{APP_DESCRIPTION, APP_NAME, APP_VERSION, INVALID_INPUT};
use glowcalm_core::context::config_dir;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init(config_dir().as_deref());

    let ctx = AppContext::new();
    let event_printer = printer::spawn_event_printer(&ctx).await;
    ctx.tasks.lock().await.event_printer = Some(event_printer);

    println!("{APP_NAME} {APP_VERSION}: {APP_DESCRIPTION}");
    println!("Type 'help' for commands.");

    while let Some(line) = readline()? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    ctx.shutdown().await;
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Guided breathing exercises")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available techniques
    List,
    /// Choose the technique to breathe with
    Select {
        #[arg(short, long)]
        technique: String,
    },
    /// Describe a technique (default: the selected one)
    Show {
        #[arg(short, long)]
        technique: Option<String>,
    },
    /// Start or resume the session
    Start {
        /// Stop after this many cycles
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        cycles: Option<u32>,
    },
    Pause,
    Reset,
    Status,
    /// Show settings, optionally changing and saving them
    Config {
        #[arg(long)]
        default_technique: Option<String>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        volume: Option<u8>,
        #[arg(long)]
        audio: Option<bool>,
        #[arg(long)]
        save: bool,
    },
    /// Generate a breath sound with the text-to-speech provider
    Voice {
        #[arg(short, long)]
        kind: BreathKind,
        #[arg(short, long)]
        out: PathBuf,
        /// Clip length in seconds (default: the selected technique's phase)
        #[arg(short, long, value_parser = commands::parse_clip_secs)]
        duration: Option<f32>,
        #[arg(short, long)]
        prompt: Option<String>,
    },
    Exit,
}

async fn respond(line: &str, ctx: &AppContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or_else(|| format!("error: {INVALID_INPUT}"))?;
    args.insert(0, "glowcalm".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    let result = match &cli.command {
        Some(Commands::List) => commands::list_techniques(ctx).await,
        Some(Commands::Select { technique }) => commands::select_technique(technique, ctx).await,
        Some(Commands::Show { technique }) => {
            commands::show_technique(technique.as_deref(), ctx).await
        }
        Some(Commands::Start { cycles }) => commands::start_session(*cycles, ctx).await,
        Some(Commands::Pause) => commands::pause_session(ctx).await,
        Some(Commands::Reset) => commands::reset_session(ctx).await,
        Some(Commands::Status) => commands::show_status(ctx).await,
        Some(Commands::Config {
            default_technique,
            volume,
            audio,
            save,
        }) => {
            commands::configure(default_technique.as_deref(), *volume, *audio, *save, ctx).await
        }
        Some(Commands::Voice {
            kind,
            out,
            duration,
            prompt,
        }) => commands::generate_voice(*kind, out, *duration, prompt.as_deref(), ctx).await,
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => Ok(()),
    };

    result.map(|()| false).map_err(|e| format!("error: {e}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Cli, clap::Error> {
        let mut args = shlex::split(line).unwrap();
        args.insert(0, "glowcalm".to_string());
        Cli::try_parse_from(args)
    }

    #[test]
    fn cycle_goal_must_be_positive() {
        assert!(parse("start --cycles 0").is_err());
        assert!(matches!(
            parse("start --cycles 3").unwrap().command,
            Some(Commands::Start { cycles: Some(3) })
        ));
    }

    #[test]
    fn voice_duration_is_range_checked() {
        assert!(parse("voice --kind exhale --out clip.mp3 --duration -3").is_err());
        assert!(parse("voice --kind exhale --out clip.mp3 --duration NaN").is_err());
        assert!(parse("voice --kind inhale --out clip.mp3 --duration 4").is_ok());
    }
}
