// src/ui.rs
use egui;

pub fn build_ui(ctx: &egui::Context, debug_columns: &mut bool, fps: f32) {
    egui::Window::new("Columns")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.label(format!("{fps:.0} fps"));
                ui.checkbox(debug_columns, "Solid column tint");
                ui.separator();

                ui.label("🎮 Keyboard Controls:");
                ui.label("   W/S: Walk Forward/Back");
                ui.label("   A/D: Strafe");
                ui.label("   Arrow Keys: Turn");
            });
        });
}
