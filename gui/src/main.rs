use eframe::egui::{self, Style, TextureHandle, Vec2, Visuals};
use patcher::{default_locator, PatchProfile, PatchTarget, Tier};

mod thumbs;

const WINDOW_SIZE: Vec2 = Vec2::new(420.0, 230.0);
const THUMBNAIL_SIZE: Vec2 = Vec2::new(48.0, 48.0);

fn main() {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_app_id("robe-patcher")
            .with_title(get_project_title())
            .with_inner_size(WINDOW_SIZE)
            .with_taskbar(true)
            .with_resizable(false),
        ..eframe::NativeOptions::default()
    };

    eframe::run_native(
        get_project_title().as_str(),
        native_options,
        Box::new(|cc| Ok(Box::new(RobePatcherApp::new(cc)))),
    ).expect("Could not run egui app");
}

struct RobePatcherApp {
    profile: PatchProfile,
    target: Option<PatchTarget>,
    thumbnails: Vec<TextureHandle>,
    current: Option<u32>,
    log_entries: Vec<String>,
}

impl RobePatcherApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_style(Style {
            visuals: Visuals::dark(),
            ..Style::default()
        });

        let profile = PatchProfile::journey();
        let thumbnails = thumbs::load_tier_thumbnails(&cc.egui_ctx, &profile);

        let mut log_entries = Vec::new();
        let target = match profile.resolve(default_locator().as_ref()) {
            Ok(target) => Some(target),
            Err(e) => {
                rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Error")
                    .set_description(e.to_string())
                    .show();
                log_entries.push(format!("Could not resolve Journey.exe: {e}"));
                None
            }
        };

        let current = target.as_ref().and_then(|t| match t.current_value() {
            Ok(value) => Some(value),
            Err(e) => {
                log_entries.push(format!("Could not read current tier: {e}"));
                None
            }
        });

        Self {
            profile,
            target,
            thumbnails,
            current,
            log_entries,
        }
    }

    fn confirm_and_write(&mut self, tier: &Tier) {
        let confirmed = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Info)
            .set_title("Confirmation")
            .set_description(format!("Do you want to set {}?", tier.name))
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        if confirmed != rfd::MessageDialogResult::Yes {
            return;
        }

        let Some(target) = self.target.as_ref() else {
            return;
        };

        match target.write_value(tier.value) {
            Ok(()) => {
                self.log_entries.push(format!("Set {}", tier.name));
                match target.current_value() {
                    Ok(value) => self.current = Some(value),
                    Err(e) => self
                        .log_entries
                        .push(format!("Could not read back current tier: {e}")),
                }
            }
            Err(e) => self
                .log_entries
                .push(format!("Failed to set {}: {e}", tier.name)),
        }
    }

    fn show_thumbnail(&self, ui: &mut egui::Ui, index: usize) {
        if let Some(texture) = self.thumbnails.get(index) {
            ui.add(egui::Image::from_texture(texture).fit_to_exact_size(THUMBNAIL_SIZE));
        }
    }
}

impl eframe::App for RobePatcherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(get_project_title());
            ui.add_space(4.0);

            let mut clicked = None;
            ui.horizontal(|ui| {
                for (i, tier) in self.profile.tiers.iter().enumerate() {
                    ui.vertical(|ui| {
                        self.show_thumbnail(ui, i);
                        if ui
                            .add_enabled(self.target.is_some(), egui::Button::new(&tier.name))
                            .clicked()
                        {
                            clicked = Some(tier.clone());
                        }
                    });
                }

                ui.separator();

                ui.vertical(|ui| {
                    ui.label("Current");
                    match self.current {
                        Some(value) => {
                            match self.profile.tiers.iter().position(|t| t.value == value) {
                                Some(i) => {
                                    self.show_thumbnail(ui, i);
                                    ui.label(&self.profile.tiers[i].name);
                                }
                                None => {
                                    ui.label(format!("Unknown value {value}"));
                                }
                            }
                        }
                        None => {
                            ui.label("Unknown");
                        }
                    }
                });
            });

            if let Some(tier) = clicked {
                self.confirm_and_write(&tier);
            }

            ui.add_space(4.0);
            let mut log_buffer = self.log_entries.join("\n");
            ui.add_enabled(
                false,
                egui::TextEdit::multiline(&mut log_buffer)
                    .interactive(false)
                    .desired_width(f32::INFINITY),
            );
        });
    }
}

fn get_project_title() -> String {
    format!("Robe patcher v{}", env!("CARGO_PKG_VERSION"))
}
