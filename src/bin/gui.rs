#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use egui::{Color32, RichText};
use tenant_invoice::{
    billing::BillingCalculator,
    cli::GuiArgs,
    config, format,
    format::InvoiceLines,
    logging,
};

const CARD_GRAY: Color32 = Color32::from_rgb(0xf2, 0xf2, 0xf2);
const MUTED: Color32 = Color32::from_rgb(0x86, 0x86, 0x8b);
const AMOUNT_GREEN: Color32 = Color32::from_rgb(0x28, 0xa7, 0x45);
const TENANT_FILL: Color32 = Color32::from_rgb(0xff, 0xf9, 0xdb);
const TENANT_STROKE: Color32 = Color32::from_rgb(0xff, 0xe0, 0x66);
const TENANT_TEXT: Color32 = Color32::from_rgb(0x85, 0x64, 0x04);

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    logging::init(args.common.verbose);

    let app_cfg = config::load_or_fallback(&args.common.config);
    let title = app_cfg.labels.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([440.0, 680.0]),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg))),
    )
}

struct GuiApp {
    config: config::Config,
    calc: BillingCalculator,
    /// 표시 중인 경고 메시지. 닫기 전까지 입력 폼을 막는다.
    alert: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let calc = BillingCalculator::new(config.policy);
        Self {
            config,
            calc,
            alert: None,
        }
    }

    fn on_calculate(&mut self) {
        if let Err(err) = self.calc.calculate() {
            self.alert = Some(err.to_string());
        }
    }

    fn ui_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(&self.config.labels.title).strong());
            ui.label(RichText::new(&self.config.labels.subtitle).color(MUTED));
        });
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let labels = &self.config.labels;
        let inputs = self.calc.inputs_mut();
        reading_field(ui, "Total Utility Bill (KW)", &mut inputs.total_energy_kw, "0");
        reading_field(ui, "Total Utility Cost (NIS)", &mut inputs.total_cost_nis, "0.00");
        reading_field(
            ui,
            &format!("{} Meter (KW)", labels.machine),
            &mut inputs.machine_energy_kw,
            "0",
        );
        egui::Frame::none()
            .fill(TENANT_FILL)
            .stroke(egui::Stroke::new(1.0, TENANT_STROKE))
            .rounding(10.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!("{} Cabinet Meter (KW)", labels.tenant))
                        .color(TENANT_TEXT),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut inputs.tenant_energy_kw)
                        .hint_text("0")
                        .desired_width(f32::INFINITY),
                );
            });
        ui.add_space(8.0);

        let button = egui::Button::new(RichText::new("Calculate Invoice").strong());
        if ui.add_sized([ui.available_width(), 36.0], button).clicked() {
            self.on_calculate();
        }
    }

    fn ui_result(&self, ui: &mut egui::Ui) {
        let Some(invoice) = self.calc.result() else {
            return;
        };
        let lines = InvoiceLines::new(invoice);
        let share_label = format!(
            "AC Share ({})",
            format::percent(self.calc.policy().tenant_ac_share)
        );
        ui.add_space(16.0);
        egui::Frame::none()
            .fill(CARD_GRAY)
            .rounding(16.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("AMOUNT TO INVOICE").small().strong().color(MUTED));
                    ui.label(
                        RichText::new(&lines.amount)
                            .size(32.0)
                            .strong()
                            .color(AMOUNT_GREEN),
                    );
                });
                ui.separator();
                result_row(ui, "Avg Rate", &lines.rate, false);
                result_row(ui, "Direct Meter", &lines.direct, false);
                result_row(ui, &share_label, &lines.shared, false);
                ui.separator();
                result_row(ui, "Total Billed", &lines.billed, true);
                if invoice.has_negative_allocation() {
                    ui.add_space(6.0);
                    ui.colored_label(
                        Color32::from_rgb(0xc9, 0x2a, 0x2a),
                        format!(
                            "{} meter exceeds the facility total; the shared allocation is negative.",
                            self.config.labels.machine
                        ),
                    );
                }
            });
    }

    fn ui_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.as_deref() else {
            return;
        };
        let mut close = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    close = true;
                }
            });
        if close {
            self.alert = None;
        }
    }
}

fn reading_field(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);
}

fn result_row(ui: &mut egui::Ui, key: &str, value: &str, emphasis: bool) {
    ui.horizontal(|ui| {
        if emphasis {
            ui.label(RichText::new(key).strong());
        } else {
            ui.label(RichText::new(key).color(MUTED));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(value).strong());
        });
    });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.ui_header(ui);
                ui.add_space(16.0);
                let blocked = self.alert.is_some();
                ui.add_enabled_ui(!blocked, |ui| self.ui_form(ui));
                self.ui_result(ui);
            });
        });
        self.ui_alert(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenant_invoice::billing::{BillInputs, CalculatorState};

    #[test]
    fn missing_bill_details_raise_alert() {
        let mut app = GuiApp::new(config::Config::default());
        app.on_calculate();
        assert_eq!(
            app.alert.as_deref(),
            Some("Please enter the main bill details.")
        );
        assert_eq!(app.calc.state(), CalculatorState::NoResult);
    }

    #[test]
    fn alert_does_not_clear_previous_result() {
        let mut app = GuiApp::new(config::Config::default());
        app.calc
            .set_inputs(BillInputs::new("10000", "5000", "2000", "50"));
        app.on_calculate();
        assert!(app.alert.is_none());

        app.calc.inputs_mut().total_cost_nis = "0".into();
        app.on_calculate();
        assert!(app.alert.is_some());
        assert_eq!(app.calc.state(), CalculatorState::HasResult);
    }
}
