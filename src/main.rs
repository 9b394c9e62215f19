mod config;
mod error;
mod hasher;
mod model;
mod services;
mod ui;

use eframe::{egui, App, Frame};
use tracing_subscriber::EnvFilter;

use crate::config::{LocalConfig, ResolvedConfig};
use crate::hasher::SaltedHasher;

struct PasswordHasherApp {
    // Settings the hasher was built from
    resolved: ResolvedConfig,
    // Settings as currently shown in the UI, applied on change
    draft: LocalConfig,
    hasher: Box<dyn SaltedHasher>,

    // Current tab
    tab: ui::UiTab,

    hash_state: ui::hashing::HashState,
    check_state: ui::checker::CheckState,

    settings_err: Option<String>,
}

impl PasswordHasherApp {
    fn new(resolved: ResolvedConfig) -> Self {
        let cfg = &resolved.effective;
        tracing::info!(algorithm = %cfg.algorithm, cost = cfg.cost, "starting");
        Self {
            hasher: hasher::hasher_for(cfg),
            draft: cfg.clone(),
            resolved,
            tab: ui::UiTab::default(),
            hash_state: Default::default(),
            check_state: Default::default(),
            settings_err: None,
        }
    }

    fn apply_settings(&mut self) {
        if let Err(e) = self.draft.validate() {
            self.settings_err = Some(e.to_string());
            return;
        }
        self.resolved.apply_edit(&self.draft);
        self.hasher = hasher::hasher_for(&self.resolved.effective);
        tracing::info!(algorithm = %self.draft.algorithm, cost = self.draft.cost, "settings changed");
        match config::save(&self.resolved.file) {
            Ok(()) => self.settings_err = None,
            Err(e) => {
                tracing::warn!("saving config failed: {e:#}");
                self.settings_err = Some(format!("{e:#}"));
            }
        }
    }
}

impl App for PasswordHasherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // ----- Top navigation -----
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong("🔒 Password Hasher");
                ui.separator();
                for tab in ui::UiTab::ALL {
                    if ui.selectable_label(self.tab == tab, tab.title()).clicked() {
                        self.tab = tab;
                    }
                }
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(format!("Password Hasher v{}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                let active = &self.resolved.effective;
                match active.algorithm {
                    model::Algorithm::Bcrypt => {
                        ui.weak(format!("{} · cost {}", active.algorithm, active.cost))
                    }
                    model::Algorithm::Argon2 => ui.weak(active.algorithm.label()),
                };
            });
        });

        // ----- Main content -----
        let mut settings_changed = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
                ui::UiTab::Hashing => {
                    settings_changed = ui::hashing::render(
                        ui,
                        self.hasher.as_ref(),
                        &mut self.draft,
                        &mut self.hash_state,
                    );
                    if let Some(err) = &self.settings_err {
                        ui.colored_label(egui::Color32::RED, err);
                    }
                }
                ui::UiTab::Checker => {
                    ui::checker::render(ui, self.hasher.as_ref(), &mut self.check_state)
                }
                ui::UiTab::Security => ui::security::render(ui),
            });
        });

        if settings_changed {
            self.apply_settings();
        }
    }
}

fn main() -> eframe::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let resolved = config::resolve();
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([720.0, 560.0]),
        ..Default::default()
    };

    // Read current version from Cargo.toml (injected at compile time)
    let title = format!("Password Hasher v{}", env!("CARGO_PKG_VERSION"));

    eframe::run_native(
        &title,
        opts,
        Box::new(|_cc| Ok(Box::new(PasswordHasherApp::new(resolved)))),
    )
}
