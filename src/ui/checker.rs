use eframe::egui;

use crate::error::FieldError;
use crate::hasher::SaltedHasher;
use crate::model::Verdict;
use crate::services::hashing;
use crate::ui::form::{self, Phase};

#[derive(Debug, Default)]
pub struct CheckState {
    pub password: String,
    pub hash: String,
    pub phase: Phase<Verdict>,
    pub field_err: Option<FieldError>,
}

impl CheckState {
    pub fn submit(&mut self) -> bool {
        let checked = form::require("Password", &self.password)
            .and_then(|()| form::require("Hashed Password", self.hash.trim()));
        match checked {
            Ok(()) => {
                self.field_err = None;
                self.phase = Phase::Submitted;
                true
            }
            Err(e) => {
                self.field_err = Some(e);
                false
            }
        }
    }

    pub fn run(&mut self, hasher: &dyn SaltedHasher) {
        if !self.phase.is_submitted() {
            return;
        }
        let verdict = hashing::verify_password(hasher, &self.password, &self.hash);
        self.phase = Phase::Ready(verdict);
    }

    pub fn is_valid(&self) -> bool {
        self.phase.ready().is_some_and(Verdict::is_valid)
    }
}

pub fn render(ui: &mut egui::Ui, hasher: &dyn SaltedHasher, state: &mut CheckState) {
    state.run(hasher);

    ui.heading("Password Checker");
    ui.label(
        "Verify if a password matches a hashed value. \
         This can be used to authenticate users during login.",
    );
    ui.add_space(8.0);

    ui.label("Password");
    let pw = ui.add(
        egui::TextEdit::singleline(&mut state.password)
            .password(true)
            .hint_text("Enter your password"),
    );
    ui.label("Hashed Password");
    let hs = ui.add(
        egui::TextEdit::singleline(&mut state.hash)
            .hint_text("Enter the hashed password")
            .font(egui::TextStyle::Monospace),
    );
    let enter = (pw.lost_focus() || hs.lost_focus()) && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if (ui.button("Check Password").clicked() || enter) && state.submit() {
        ui.ctx().request_repaint();
    }
    if let Some(err) = &state.field_err {
        ui.colored_label(egui::Color32::RED, err.to_string());
    }

    ui.separator();
    ui.heading("Password Verification");
    match &state.phase {
        Phase::Idle => {
            ui.weak("Enter a password and a hash to check them.");
        }
        Phase::Submitted => {
            ui.spinner();
        }
        Phase::Ready(verdict) => {
            if verdict.is_valid() {
                ui.colored_label(egui::Color32::GREEN, "Password is valid");
                ui.weak(
                    "The password you entered matches the hashed value. This means \
                     the password is valid and can be used for authentication.",
                );
            } else {
                ui.colored_label(egui::Color32::RED, "Password is invalid");
            }
            if let Some(reason) = verdict.diagnostic() {
                ui.colored_label(egui::Color32::YELLOW, format!("Malformed hash: {reason}"));
            }
        }
        Phase::Failed(e) => {
            ui.colored_label(egui::Color32::RED, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::{BcryptHasher, MIN_COST};
    use crate::services::hashing::hash_password;

    #[test]
    fn both_fields_required() {
        let mut s = CheckState::default();
        assert!(!s.submit());
        assert_eq!(s.field_err, Some(FieldError::Required("Password")));

        s.password = "pw".into();
        s.hash = "  ".into();
        assert!(!s.submit());
        assert_eq!(s.field_err, Some(FieldError::Required("Hashed Password")));
        assert_eq!(s.phase, Phase::Idle);
    }

    #[test]
    fn correct_and_wrong_horse() {
        let h = BcryptHasher::new(MIN_COST);
        let token = hash_password(&h, "correct horse").unwrap();

        let mut s = CheckState {
            password: "correct horse".into(),
            hash: token.to_string(),
            ..Default::default()
        };
        assert!(s.submit());
        s.run(&h);
        assert!(s.is_valid());

        s.password = "wrong horse".into();
        s.submit();
        s.run(&h);
        assert!(!s.is_valid());
        assert_eq!(s.phase, Phase::Ready(Verdict::Mismatch));
    }

    #[test]
    fn malformed_hash_is_invalid_with_diagnostic() {
        let mut s = CheckState {
            password: "pw".into(),
            hash: "definitely-not-bcrypt".into(),
            ..Default::default()
        };
        s.submit();
        s.run(&BcryptHasher::new(MIN_COST));
        assert!(!s.is_valid());
        let diag = s.phase.ready().and_then(Verdict::diagnostic);
        assert!(diag.is_some());
    }
}
