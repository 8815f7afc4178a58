//! Application entry point — Free Text to Speech.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the speech synthesizer selected in config.
//! 5. Create worker channels (`command`, `reply`).
//! 6. Spawn the synthesis worker on the tokio runtime.
//! 7. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use text_to_speech::{
    app::PageShell,
    config::{AppConfig, AppPaths},
    tts::{build_synthesizer, run_synthesis_worker, SynthesisCommand, SynthesisReply},
};
use tokio::sync::mpsc;

use eframe::egui;

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (w, h) = config.ui.window_size;
    let vp = egui::ViewportBuilder::default()
        .with_title("Free Text to Speech")
        .with_inner_size([w, h])
        .with_min_inner_size([420.0, 480.0]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Free Text to Speech starting up");

    // 2. Configuration
    let paths = AppPaths::new();
    let config = AppConfig::load_from(&paths.settings_file).unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    if AppConfig::is_first_run() {
        log::info!("no settings file yet; expected at {}", paths.settings_file.display());
    }

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Synthesizer
    let synth = build_synthesizer(&config, &paths);

    // 5. Channels. Capacity 1 is enough: the form allows one request at a time.
    let (command_tx, command_rx) = mpsc::channel::<SynthesisCommand>(1);
    let (reply_tx, reply_rx) = mpsc::channel::<SynthesisReply>(1);

    // 6. Worker
    rt.spawn(run_synthesis_worker(synth, command_rx, reply_tx));

    // 7. UI
    let app = PageShell::new(&config, command_tx, reply_rx);
    let options = native_options(&config);

    eframe::run_native(
        "Free Text to Speech",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
