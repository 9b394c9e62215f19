use eframe::egui;
use std::time::Instant;

use crate::config::LocalConfig;
use crate::error::FieldError;
use crate::hasher::{MAX_COST, MIN_COST, SaltedHasher};
use crate::model::{Algorithm, HashedPassword};
use crate::services::clipboard::{self, CopyFeedback, EguiClipboard};
use crate::services::hashing;
use crate::ui::form::{self, Phase};

#[derive(Debug, Default)]
pub struct HashState {
    pub password: String,
    pub phase: Phase<HashedPassword>,
    pub field_err: Option<FieldError>,
    pub copy: CopyFeedback,
}

impl HashState {
    /// Validates the form and queues the hash. Returns false if a required field is empty.
    pub fn submit(&mut self) -> bool {
        match form::require("Password", &self.password) {
            Ok(()) => {
                self.field_err = None;
                self.phase = Phase::Submitted;
                self.copy.clear();
                true
            }
            Err(e) => {
                self.field_err = Some(e);
                false
            }
        }
    }

    /// Runs a queued submission.
    pub fn run(&mut self, hasher: &dyn SaltedHasher) {
        if !self.phase.is_submitted() {
            return;
        }
        self.phase = match hashing::hash_password(hasher, &self.password) {
            Ok(h) => Phase::Ready(h),
            Err(e) => Phase::Failed(e.to_string()),
        };
    }

    pub fn hash(&self) -> Option<&HashedPassword> {
        self.phase.ready()
    }
}

/// Draws the hashing section. Returns true when the settings were edited.
pub fn render(
    ui: &mut egui::Ui,
    hasher: &dyn SaltedHasher,
    cfg: &mut LocalConfig,
    state: &mut HashState,
) -> bool {
    // Submitted on the previous frame; the spinner has been shown once.
    state.run(hasher);

    ui.heading("Password Hashing");
    ui.label(
        "Securely hash your passwords using a salted, deliberately slow algorithm. \
         Get a unique hash that can be safely stored and used for authentication.",
    );
    ui.add_space(8.0);

    ui.label("Password");
    let resp = ui.add(
        egui::TextEdit::singleline(&mut state.password)
            .password(true)
            .hint_text("Enter your password"),
    );
    let enter = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if (ui.button("Hash Password").clicked() || enter) && state.submit() {
        ui.ctx().request_repaint();
    }
    if let Some(err) = &state.field_err {
        ui.colored_label(egui::Color32::RED, err.to_string());
    }

    let changed = render_settings(ui, cfg);

    ui.separator();
    ui.heading("Hashed Password");

    let now = Instant::now();
    state.copy.tick(now);
    ui.horizontal(|ui| {
        match &state.phase {
            Phase::Idle => {
                ui.weak("Enter a password to hash");
            }
            Phase::Submitted => {
                ui.spinner();
                ui.label("Hashing…");
            }
            Phase::Ready(h) => {
                ui.add(egui::Label::new(egui::RichText::new(h.as_str()).monospace()).selectable(true));
            }
            Phase::Failed(e) => {
                ui.colored_label(egui::Color32::RED, e);
            }
        }

        let label = if state.copy.is_active(now) { "✔ Copied" } else { "Copy" };
        let copy_btn = ui
            .add_enabled(state.hash().is_some(), egui::Button::new(label))
            .on_hover_text("Copy hash");
        if copy_btn.clicked() {
            let mut sink = EguiClipboard(ui.ctx());
            clipboard::copy_hash(&mut sink, state.phase.ready(), &mut state.copy, now);
        }
    });
    if let Some(left) = state.copy.remaining(now) {
        ui.ctx().request_repaint_after(left);
    }

    ui.add_space(4.0);
    ui.weak(
        "This is your hashed password. You can now safely store this value \
         in your database for authentication.",
    );

    changed
}

fn render_settings(ui: &mut egui::Ui, cfg: &mut LocalConfig) -> bool {
    let mut changed = false;
    ui.collapsing("Settings", |ui| {
        egui::ComboBox::from_label("Algorithm")
            .selected_text(cfg.algorithm.label())
            .show_ui(ui, |ui| {
                for a in Algorithm::ALL {
                    changed |= ui.selectable_value(&mut cfg.algorithm, a, a.label()).changed();
                }
            });
        ui.add_enabled_ui(cfg.algorithm == Algorithm::Bcrypt, |ui| {
            let resp = ui.add(
                egui::Slider::new(&mut cfg.cost, MIN_COST..=MAX_COST).text("Work factor"),
            );
            // Save once the drag ends, not on every frame of it.
            changed |= resp.drag_stopped() || (resp.changed() && !resp.dragged());
        });
    });
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::BcryptHasher;
    use crate::model::Verdict;
    use crate::services::hashing::verify_password;

    #[test]
    fn empty_password_stays_idle() {
        let mut s = HashState::default();
        assert!(!s.submit());
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.field_err, Some(FieldError::Required("Password")));

        s.run(&BcryptHasher::new(MIN_COST));
        assert_eq!(s.phase, Phase::Idle);
    }

    #[test]
    fn submit_then_run_yields_hash() {
        let h = BcryptHasher::new(MIN_COST);
        let mut s = HashState { password: "correct horse".into(), ..Default::default() };
        assert!(s.submit());
        assert!(s.phase.is_submitted());
        assert!(s.field_err.is_none());

        s.run(&h);
        let token = s.hash().expect("hash ready").clone();
        assert_eq!(verify_password(&h, "correct horse", token.as_str()), Verdict::Match);
    }

    #[test]
    fn run_without_submit_keeps_result() {
        let h = BcryptHasher::new(MIN_COST);
        let mut s = HashState { password: "pw".into(), ..Default::default() };
        s.submit();
        s.run(&h);
        let first = s.hash().cloned();

        s.password = "edited".into();
        s.run(&h);
        assert_eq!(s.hash().cloned(), first);
    }

    #[test]
    fn resubmit_produces_fresh_salt() {
        let h = BcryptHasher::new(MIN_COST);
        let mut s = HashState { password: "pw".into(), ..Default::default() };
        s.submit();
        s.run(&h);
        let first = s.hash().cloned();
        s.submit();
        s.run(&h);
        assert_ne!(s.hash().cloned(), first);
    }

    #[test]
    fn primitive_fault_fails_the_form() {
        let mut s = HashState { password: "pw".into(), ..Default::default() };
        s.submit();
        s.run(&BcryptHasher::new(2));
        assert!(matches!(s.phase, Phase::Failed(_)));
        assert!(s.hash().is_none());
    }
}
