//! Page shell: the egui/eframe application.
//!
//! # Architecture
//!
//! [`PageShell`] is the top-level [`eframe::App`]. It mounts exactly one
//! [`SpeechRequestForm`] centered in the window and owns the plumbing the
//! form needs:
//!
//! * `command_tx` — sends [`SynthesisCommand`] to the synthesis worker.
//! * `reply_rx`   — receives [`SynthesisReply`] from the worker.
//! * `toasts`     — the [`ToastQueue`] the form notifies through, drawn as
//!   an overlay in the bottom-right corner.

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::form::{FormAction, SpeechRequestForm};
use crate::notify::{Notification, Notifier, Severity, ToastQueue};
use crate::playback;
use crate::tts::{SynthesisCommand, SynthesisError, SynthesisReply, SynthesisRequest};

/// Widest the form column grows, in points.
const MAX_FORM_WIDTH: f32 = 640.0;
/// Rough height of the form, used to centre it vertically.
const FORM_HEIGHT_ESTIMATE: f32 = 480.0;

// ---------------------------------------------------------------------------
// PageShell
// ---------------------------------------------------------------------------

/// eframe application hosting the speech request form.
pub struct PageShell {
    form: SpeechRequestForm,
    toasts: ToastQueue,
    command_tx: mpsc::Sender<SynthesisCommand>,
    reply_rx: mpsc::Receiver<SynthesisReply>,
}

impl PageShell {
    /// Create the shell and its form.
    ///
    /// * `command_tx` — sender end of the worker command channel.
    /// * `reply_rx`   — receiver end of the worker reply channel.
    pub fn new(
        config: &AppConfig,
        command_tx: mpsc::Sender<SynthesisCommand>,
        reply_rx: mpsc::Receiver<SynthesisReply>,
    ) -> Self {
        let toasts = ToastQueue::new(
            Duration::from_secs(config.ui.toast_secs),
            config.ui.max_toasts,
        );
        let form = SpeechRequestForm::new(&config.form, Arc::new(toasts.clone()));

        Self {
            form,
            toasts,
            command_tx,
            reply_rx,
        }
    }

    pub fn form(&self) -> &SpeechRequestForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SpeechRequestForm {
        &mut self.form
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    // ── Worker plumbing ──────────────────────────────────────────────────

    /// Hand an accepted request to the worker. If the worker cannot take it
    /// the submit is finished immediately as a failure.
    pub fn dispatch(&mut self, request: SynthesisRequest) {
        if let Err(e) = self
            .command_tx
            .try_send(SynthesisCommand::Synthesize(request))
        {
            log::error!("shell: could not reach synthesis worker: {e}");
            self.form
                .finish_submit(Err(SynthesisError::WorkerUnavailable));
        }
    }

    /// Drain all pending worker replies (non-blocking).
    pub fn poll_replies(&mut self) {
        while let Ok(reply) = self.reply_rx.try_recv() {
            match reply {
                SynthesisReply::Finished(result) => self.form.finish_submit(result),
            }
        }
    }

    /// Act on what the form view asked for this frame.
    pub fn handle_action(&mut self, action: FormAction) {
        match action {
            FormAction::Dispatch(request) => self.dispatch(request),
            FormAction::Play(location) => {
                if let Err(e) = playback::open_audio(&location) {
                    log::warn!("shell: playback failed: {e}");
                    self.toasts.notify(Notification::new(
                        "Playback failed",
                        e.to_string(),
                        Severity::Destructive,
                    ));
                }
            }
        }
    }

    // ── Toast overlay ────────────────────────────────────────────────────

    fn draw_toasts(&self, ctx: &egui::Context) {
        let visible = self.toasts.visible();
        if visible.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (i, toast) in visible.iter().enumerate() {
                    let n = &toast.notification;
                    let (fill, title_color) = match n.severity {
                        Severity::Default => (
                            egui::Color32::from_rgb(38, 38, 46),
                            egui::Color32::from_rgb(230, 230, 240),
                        ),
                        Severity::Destructive => (
                            egui::Color32::from_rgb(127, 29, 29),
                            egui::Color32::from_rgb(254, 226, 226),
                        ),
                    };

                    egui::Frame::new()
                        .fill(fill)
                        .corner_radius(egui::CornerRadius::same(6))
                        .inner_margin(egui::Margin::same(10))
                        .show(ui, |ui| {
                            ui.set_width(280.0);
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(&n.title)
                                        .color(title_color)
                                        .strong(),
                                );
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui
                                            .add(egui::Button::new("x").frame(false))
                                            .clicked()
                                        {
                                            dismissed = Some(i);
                                        }
                                    },
                                );
                            });
                            ui.label(
                                egui::RichText::new(&n.description)
                                    .color(title_color)
                                    .size(12.0),
                            );
                        });
                    ui.add_space(6.0);
                }
            });

        if let Some(i) = dismissed {
            self.toasts.dismiss(i);
        }
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for PageShell {
    /// Called every frame by eframe. Polls the worker, then renders the page.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_replies();

        // Keep polling while a request is in flight and let toasts expire.
        if self.form.state().is_submitting() {
            ctx.request_repaint_after(Duration::from_millis(66));
        } else if !self.toasts.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        let frame = egui::Frame::new()
            .fill(egui::Color32::from_rgb(24, 22, 34))
            .inner_margin(egui::Margin::same(16));

        let mut action = None;
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let top = ((ui.available_height() - FORM_HEIGHT_ESTIMATE) / 2.0).max(0.0);
                ui.add_space(top);
                ui.vertical_centered(|ui| {
                    ui.set_max_width(MAX_FORM_WIDTH.min(ui.available_width()));
                    action = self.form.ui(ui);
                });
            });
        });

        if let Some(action) = action {
            self.handle_action(action);
        }

        self.draw_toasts(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("text-to-speech window closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::{AudioLocation, SpeechOutcome};

    fn make_shell(
        capacity: usize,
    ) -> (
        PageShell,
        mpsc::Receiver<SynthesisCommand>,
        mpsc::Sender<SynthesisReply>,
    ) {
        let (command_tx, command_rx) = mpsc::channel(capacity);
        let (reply_tx, reply_rx) = mpsc::channel(capacity);
        let shell = PageShell::new(&AppConfig::default(), command_tx, reply_rx);
        (shell, command_rx, reply_tx)
    }

    fn titles(shell: &PageShell) -> Vec<String> {
        shell
            .toasts()
            .visible()
            .into_iter()
            .map(|t| t.notification.title)
            .collect()
    }

    #[test]
    fn shell_mounts_one_fresh_form() {
        let (shell, _rx, _tx) = make_shell(1);
        assert_eq!(shell.form().state().text(), "");
        assert!(!shell.form().state().is_submitting());
        assert!(shell.toasts().is_empty());
    }

    #[test]
    fn accepted_submit_reaches_worker_and_reply_finishes_it() {
        let (mut shell, mut command_rx, reply_tx) = make_shell(4);
        shell.form_mut().edit_text("Hello world");
        let request = shell.form_mut().begin_submit().unwrap();

        shell.handle_action(FormAction::Dispatch(request.clone()));

        match command_rx.try_recv() {
            Ok(SynthesisCommand::Synthesize(sent)) => assert_eq!(sent, request),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(shell.form().state().is_submitting());

        reply_tx
            .try_send(SynthesisReply::Finished(Ok(SpeechOutcome::default())))
            .unwrap();
        shell.poll_replies();

        assert!(!shell.form().state().is_submitting());
        assert_eq!(titles(&shell), ["Success!"]);
    }

    #[test]
    fn closed_worker_fails_the_submit() {
        let (mut shell, command_rx, _reply_tx) = make_shell(1);
        drop(command_rx);
        shell.form_mut().edit_text("Hello world");
        let request = shell.form_mut().begin_submit().unwrap();

        shell.dispatch(request);

        assert!(!shell.form().state().is_submitting());
        assert_eq!(titles(&shell), ["Generation failed"]);
    }

    #[test]
    fn over_limit_edit_shows_warning_toast() {
        let (mut shell, _rx, _tx) = make_shell(1);
        shell.form_mut().edit_text("a".repeat(1025));
        assert_eq!(titles(&shell), ["Character limit exceeded"]);
    }

    #[test]
    fn playing_a_missing_clip_shows_toast() {
        let (mut shell, _rx, _tx) = make_shell(1);
        let dir = tempfile::tempdir().unwrap();
        let missing = AudioLocation::File(dir.path().join("none.mp3"));

        shell.handle_action(FormAction::Play(missing));

        assert_eq!(titles(&shell), ["Playback failed"]);
    }
}
