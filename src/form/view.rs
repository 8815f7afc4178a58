//! egui rendering for [`SpeechRequestForm`].
//!
//! | Limit status | Counter / border colour |
//! |--------------|-------------------------|
//! | `Normal`     | muted gray              |
//! | `NearLimit`  | yellow                  |
//! | `OverLimit`  | red                     |

use eframe::egui;

use crate::tts::{AudioLocation, SynthesisRequest};
use crate::voice::VOICES;

use super::controller::SpeechRequestForm;
use super::state::LimitStatus;

/// Something the page shell has to act on after a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// A submit was accepted; send this to the synthesis worker.
    Dispatch(SynthesisRequest),
    /// The user asked to play the generated clip.
    Play(AudioLocation),
}

const RED: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
const YELLOW: egui::Color32 = egui::Color32::from_rgb(234, 179, 8);
const MUTED: egui::Color32 = egui::Color32::from_rgb(140, 140, 150);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(155, 135, 245);

/// Counter / border colour for a limit status.
pub fn status_color(status: LimitStatus) -> egui::Color32 {
    match status {
        LimitStatus::Normal => MUTED,
        LimitStatus::NearLimit => YELLOW,
        LimitStatus::OverLimit => RED,
    }
}

impl SpeechRequestForm {
    /// Draw the form and return what the page shell must do next.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<FormAction> {
        self.draw_header(ui);
        ui.add_space(20.0);

        self.draw_voice_picker(ui);
        ui.add_space(12.0);

        self.draw_text_area(ui);
        ui.add_space(12.0);

        if let Some(request) = self.draw_submit_button(ui) {
            return Some(FormAction::Dispatch(request));
        }

        self.draw_audio_row(ui).map(FormAction::Play)
    }

    // ── Sections ─────────────────────────────────────────────────────────

    fn draw_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Free Text to Speech")
                    .color(ACCENT)
                    .strong()
                    .size(32.0),
            );
            ui.label(
                egui::RichText::new("Convert your text to natural-sounding speech")
                    .color(MUTED)
                    .size(14.0),
            );
        });
    }

    fn draw_voice_picker(&mut self, ui: &mut egui::Ui) {
        let current = self.state().selected_voice();
        let mut picked: Option<&'static str> = None;

        egui::ComboBox::from_id_salt("voice-picker")
            .width(ui.available_width())
            .selected_text(current.name)
            .show_ui(ui, |ui| {
                for voice in VOICES {
                    if ui
                        .selectable_label(voice.id == current.id, voice.name)
                        .clicked()
                    {
                        picked = Some(voice.id);
                    }
                }
            });

        if let Some(id) = picked {
            if let Err(e) = self.select_voice(id) {
                log::error!("voice picker: {e}");
            }
        }
    }

    fn draw_text_area(&mut self, ui: &mut egui::Ui) {
        let status = self.limit_status();
        let border = match status {
            LimitStatus::Normal => ui.visuals().widgets.inactive.bg_stroke.color,
            other => status_color(other),
        };

        let mut buffer = self.state().text().to_owned();
        let response = egui::Frame::new()
            .stroke(egui::Stroke::new(1.5, border))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::same(4))
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut buffer)
                        .hint_text("Enter your text here...")
                        .desired_rows(10)
                        .desired_width(f32::INFINITY)
                        .frame(false),
                )
            })
            .inner;

        if response.changed() {
            self.edit_text(buffer);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(self.char_count_label())
                    .color(status_color(self.limit_status()))
                    .size(12.0),
            );
        });
    }

    fn draw_submit_button(&mut self, ui: &mut egui::Ui) -> Option<SynthesisRequest> {
        let size = egui::vec2(ui.available_width(), 36.0);

        if self.state().is_submitting() {
            ui.add_enabled_ui(false, |ui| {
                ui.allocate_ui_with_layout(
                    size,
                    egui::Layout::left_to_right(egui::Align::Center),
                    |ui| {
                        ui.add(egui::Spinner::new());
                        ui.label("Generating...");
                    },
                );
            });
            return None;
        }

        let clicked = ui
            .add_enabled(
                self.can_submit(),
                egui::Button::new(egui::RichText::new("Generate Speech").size(15.0))
                    .min_size(size),
            )
            .clicked();

        if clicked {
            self.begin_submit().ok()
        } else {
            None
        }
    }

    fn draw_audio_row(&self, ui: &mut egui::Ui) -> Option<AudioLocation> {
        let location = self.playable_audio()?;

        ui.add_space(16.0);
        let mut play = false;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                play = ui.button("▶ Play").clicked();
                ui.label(
                    egui::RichText::new(location.to_string())
                        .color(MUTED)
                        .size(11.0),
                );
            });
        });

        play.then(|| location.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::config::FormConfig;
    use crate::notify::RecordingNotifier;
    use crate::tts::{SpeechOutcome, SynthesisError};

    fn render(form: &mut SpeechRequestForm) -> Option<FormAction> {
        let ctx = egui::Context::default();
        let mut action = None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = form.ui(ui);
            });
        });
        action
    }

    #[test]
    fn colours_follow_status() {
        assert_eq!(status_color(LimitStatus::Normal), MUTED);
        assert_eq!(status_color(LimitStatus::NearLimit), YELLOW);
        assert_eq!(status_color(LimitStatus::OverLimit), RED);
    }

    #[test]
    fn frame_without_input_yields_no_action() {
        let mut form =
            SpeechRequestForm::new(&FormConfig::default(), Arc::new(RecordingNotifier::default()));
        form.edit_text("Hello world");
        form.begin_submit().unwrap();
        form.finish_submit(Ok(SpeechOutcome {
            audio: Some(AudioLocation::File(PathBuf::from("/tmp/clip.mp3"))),
        }));
        assert!(render(&mut form).is_none());

        // In flight: the audio row is hidden and the form stays submitting.
        form.begin_submit().unwrap();
        assert!(render(&mut form).is_none());
        assert!(form.state().is_submitting());

        form.finish_submit(Err(SynthesisError::Timeout));
        assert!(!form.state().is_submitting());
    }
}
