use std::io::Write;
use std::path::Path;

use chrono::Local;
use glowcalm_core::app_info::SETTINGS_SAVED;
use glowcalm_core::breathing::MAX_PHASE_SECS;
use glowcalm_core::breathing::visual::cue;
use glowcalm_core::context::{AppConfigExt, config_path};
use glowcalm_core::{BreathKind, Technique, VoiceClient};

use crate::context::{AppContext, SessionGoal};
use crate::display;

async fn selected_technique(ctx: &AppContext) -> Result<Technique, String> {
    let key = ctx.selected.read().await.clone();
    ctx.catalog
        .get(&key)
        .cloned()
        .ok_or_else(|| format!("unknown technique: {key}"))
}

pub async fn list_techniques(ctx: &AppContext) -> Result<(), String> {
    let selected = ctx.selected.read().await.clone();
    for technique in ctx.catalog.iter() {
        println!("{}", display::technique_row(technique, technique.key == selected));
    }
    Ok(())
}

pub async fn show_technique(key: Option<&str>, ctx: &AppContext) -> Result<(), String> {
    let technique = match key {
        Some(key) => ctx
            .catalog
            .get(key)
            .cloned()
            .ok_or_else(|| format!("unknown technique: {key}"))?,
        None => selected_technique(ctx).await?,
    };
    print!("{}", display::technique_details(&technique));
    Ok(())
}

/// Switch technique. A running session restarts with the new timing.
pub async fn select_technique(key: &str, ctx: &AppContext) -> Result<(), String> {
    let technique = ctx
        .catalog
        .get(key)
        .ok_or_else(|| format!("unknown technique: {key}"))?;

    ctx.sequencer
        .lock()
        .await
        .update_config(technique.cycle)
        .map_err(|e| e.to_string())?;
    *ctx.selected.write().await = technique.key.clone();

    println!("selected {} ({})", technique.name, technique.cycle.timing_summary());
    Ok(())
}

pub async fn start_session(cycles: Option<u32>, ctx: &AppContext) -> Result<(), String> {
    if cycles == Some(0) {
        return Err("--cycles must be at least 1".to_string());
    }
    let technique = selected_technique(ctx).await?;
    let mut sequencer = ctx.sequencer.lock().await;
    let was_active = sequencer.is_active();

    sequencer.start(technique.cycle).map_err(|e| e.to_string())?;

    let current = sequencer.snapshot().cycle_count;
    *ctx.goal.write().await = cycles.map(|n| SessionGoal::new(current, n));
    if !was_active {
        *ctx.started_at.write().await = Some(Local::now());
    }

    tracing::info!(technique = %technique.key, ?cycles, "Session started");
    Ok(())
}

pub async fn pause_session(ctx: &AppContext) -> Result<(), String> {
    ctx.sequencer.lock().await.stop();
    Ok(())
}

pub async fn reset_session(ctx: &AppContext) -> Result<(), String> {
    ctx.sequencer.lock().await.reset();
    *ctx.goal.write().await = None;
    *ctx.started_at.write().await = None;
    Ok(())
}

pub async fn show_status(ctx: &AppContext) -> Result<(), String> {
    let technique = selected_technique(ctx).await?;
    let (state, running) = {
        let sequencer = ctx.sequencer.lock().await;
        (sequencer.snapshot(), sequencer.config())
    };
    let cycle = running.unwrap_or(technique.cycle);
    let visual = ctx.config.read().await.visual.clone();
    let cue = cue(&state, &cycle, &visual);

    let goal = *ctx.goal.read().await;
    let started_at = *ctx.started_at.read().await;
    print!(
        "{}",
        display::status(&state, &technique, &cue, goal, started_at)
    );
    Ok(())
}

/// Print settings, optionally changing the startup technique or audio and saving
pub async fn configure(
    default_technique: Option<&str>,
    volume: Option<u8>,
    audio: Option<bool>,
    save: bool,
    ctx: &AppContext,
) -> Result<(), String> {
    let mut config = ctx.config.write().await;

    if let Some(key) = default_technique {
        config
            .set_default_technique(key, &ctx.catalog)
            .map_err(|e| e.to_string())?;
    }
    if let Some(volume) = volume {
        config.audio.volume = volume.min(100);
    }
    if let Some(enabled) = audio {
        config.audio.enabled = enabled;
    }
    *ctx.audio_settings.write().await = config.audio.clone();

    if let Ok(path) = config_path() {
        println!("Config file: {}", path.display());
    }
    println!("Default technique: {}", config.default_technique);
    println!(
        "Audio: {} (volume {}%, {})",
        if config.audio.enabled { "on" } else { "off" },
        config.audio.volume,
        config.audio.ambient_sound.as_deref().unwrap_or("no ambient sound")
    );
    println!(
        "Voice: {}",
        if config.voice.has_api_key() {
            "API key set"
        } else {
            "no API key"
        }
    );

    if save {
        config.save().map_err(|e| e.to_string())?;
        println!("{SETTINGS_SAVED}");
    }
    Ok(())
}

/// Parse a `voice --duration` value
pub fn parse_clip_secs(value: &str) -> Result<f32, String> {
    let secs = value
        .parse::<f32>()
        .map_err(|_| format!("'{value}' is not a number of seconds"))?;
    check_clip_secs(secs)
}

fn check_clip_secs(secs: f32) -> Result<f32, String> {
    if secs.is_finite() && secs > 0.0 && secs <= MAX_PHASE_SECS {
        Ok(secs)
    } else {
        Err(format!(
            "clip duration must be between 0 and {MAX_PHASE_SECS} seconds, got {secs}"
        ))
    }
}

/// Generate a breath clip and write it to `out`
pub async fn generate_voice(
    kind: BreathKind,
    out: &Path,
    duration_secs: Option<f32>,
    prompt: Option<&str>,
    ctx: &AppContext,
) -> Result<(), String> {
    let duration_secs = match duration_secs {
        Some(secs) => check_clip_secs(secs)?,
        None => {
            let technique = selected_technique(ctx).await?;
            match kind {
                BreathKind::Inhale => technique.cycle.expand_secs,
                BreathKind::Exhale => technique.cycle.contract_secs,
            }
        }
    };

    let settings = ctx.config.read().await.voice.clone();
    let client = VoiceClient::new(&settings).map_err(|e| e.to_string())?;
    let audio = client
        .generate_breath(kind, duration_secs, prompt)
        .await
        .map_err(|e| e.to_string())?;
    tokio::fs::write(out, &audio)
        .await
        .map_err(|e| format!("failed to write {}: {e}", out.display()))?;

    println!("wrote {} bytes to {}", audio.len(), out.display());
    Ok(())
}

pub fn exit() -> Result<(), String> {
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}
