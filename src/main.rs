#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use portfolio_analyzer::run_app;

// --- WASM SPECIFIC CODE ---
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// Even though we use 'start', the compiler still wants a main() function
// because this file is compiled as a binary.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
    use portfolio_analyzer::ApiSettings;

    // A. Init Logging
    console_error_panic_hook::set_once();
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    log::info!("🚀 Portfolio Analyzer starting in WASM mode...");

    // B. Settings (compile-time URL or the localhost default)
    let settings = ApiSettings::resolve(None, None)
        .map_err(|e| wasm_bindgen::JsValue::from_str(&format!("{:#}", e)))?;

    let web_options = eframe::WebOptions::default();

    // C. Find the canvas element by ID
    let window = web_sys::window().expect("no global `window` exists");
    let document = window.document().expect("should have a document on window");
    let canvas = document
        .get_element_by_id("the_canvas_id")
        .expect("Failed to find canvas with id 'the_canvas_id'")
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| "the_canvas_id was not a valid HtmlCanvasElement")?;

    // D. Start the App
    eframe::WebRunner::new()
        .start(
            canvas,
            web_options,
            Box::new(move |cc| run_app(cc, &settings).map_err(Into::into)),
        )
        .await
}

// --- NATIVE SPECIFIC CODE ---
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use clap::Parser;
    use eframe::NativeOptions;
    use portfolio_analyzer::Cli;
    use tokio::runtime::Runtime;

    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let settings = match args.api_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{:#}", e);
            std::process::exit(2);
        }
    };

    // C. Runtime for the API calls. Entered for the lifetime of the window.
    let rt = Runtime::new().expect("Failed to create Tokio runtime");
    let _guard = rt.enter();

    // D. Run Native App
    let options = NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([720.0, 540.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Portfolio Analyzer",
        options,
        Box::new(move |cc| run_app(cc, &settings).map_err(Into::into)),
    )
}
