use eframe::egui::{RichText, Ui};

use crate::ui::config::UI_CONFIG;
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::Panel;
use crate::ui::utils::{card_frame, colored_subsection_heading, section_heading, spaced_separator};

struct Feature {
    icon: &'static str,
    title: &'static str,
    description: &'static str,
}

struct Step {
    title: &'static str,
    body: &'static str,
}

const HEADLINE: &str = "📈 Financial Analysis";
const TAGLINE: &str = "A modern platform for analysing and optimising investment portfolios";

const FEATURES: &[Feature] = &[
    Feature {
        icon: "📈",
        title: "Portfolio analysis",
        description: "Analyse and optimise investment portfolios with the efficient frontier and the Sharpe ratio.",
    },
    Feature {
        icon: "🎲",
        title: "Monte Carlo simulation",
        description: "Project possible future scenarios for your portfolio with stochastic simulations.",
    },
    Feature {
        icon: "🗄",
        title: "Historical data",
        description: "Real market data drives the analysis of each asset's historical behaviour.",
    },
];

const STEPS: &[Step] = &[
    Step {
        title: "Choose assets",
        body: "Pick at least two stocks from the available list. Search by symbol to narrow it down.",
    },
    Step {
        title: "Evaluation period",
        body: "Set the date range used to study the assets' history. At least one year gives more reliable results.",
    },
    Step {
        title: "Initial investment",
        body: "Enter the amount you want to invest at the start.",
    },
    Step {
        title: "Monte Carlo simulations",
        body: "Choose how many simulations to run. More runs are more precise but take longer.",
    },
    Step {
        title: "Review the results",
        body: "Once the analysis completes, review the results:",
    },
];

const RESULT_HIGHLIGHTS: &[&str] = &[
    "The optimal allocation according to Markowitz theory",
    "Expected return and volatility of the optimal portfolio",
    "The efficient frontier",
    "Projections based on Monte Carlo simulation",
    "Individual assets compared with the optimised portfolio",
];

const TECH_STACK: &[&str] = &["Rust", "egui", "Tokio", "Python", "FastAPI", "Pandas"];

const METHODOLOGY: &[&str] = &[
    "The application implements Modern Portfolio Theory, developed by Harry Markowitz, which builds optimal portfolios by maximising expected return for a given level of risk.",
    "Statistical methods estimate expected returns, volatilities and correlations between assets, and an optimiser finds the best allocation.",
    "Monte Carlo simulations project the portfolio's future behaviour by generating many possible scenarios from the historical distribution of returns.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AboutEvent {
    StartAnalysis,
}

/// Static page explaining what the tool does
#[derive(Default)]
pub struct AboutPage;

impl Panel for AboutPage {
    type Event = AboutEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(HEADLINE).size(28.0).strong().color(UI_CONFIG.colors.heading));
            ui.label_subdued(TAGLINE);
        });

        section_heading(ui, "Main features");
        ui.columns(FEATURES.len(), |columns| {
            for (column, feature) in columns.iter_mut().zip(FEATURES) {
                card_frame().show(column, |ui| {
                    ui.set_min_height(90.0);
                    ui.label(colored_subsection_heading(format!("{} {}", feature.icon, feature.title)).strong());
                    ui.label(feature.description);
                });
            }
        });

        section_heading(ui, "How to use the application");
        card_frame().show(ui, |ui| {
            for (i, step) in STEPS.iter().enumerate() {
                ui.label(RichText::new(format!("{}. {}", i + 1, step.title)).strong());
                ui.label(step.body);
                ui.add_space(4.0);
            }
            for highlight in RESULT_HIGHLIGHTS {
                ui.label(format!("   • {}", highlight));
            }
            ui.add_space(10.0);
            if ui.button("▶ Start an analysis").clicked() {
                events.push(AboutEvent::StartAnalysis);
            }
        });

        section_heading(ui, "Technical information");
        card_frame().show(ui, |ui| {
            ui.label_subheader("Technology stack");
            ui.horizontal_wrapped(|ui| {
                for tech in TECH_STACK {
                    ui.label(RichText::new(*tech).monospace());
                    ui.add_space(8.0);
                }
            });
            spaced_separator(ui);
            ui.label_subheader("Methodology");
            for paragraph in METHODOLOGY {
                ui.label(*paragraph);
                ui.add_space(4.0);
            }
        });

        ui.add_space(20.0);
        events
    }
}
