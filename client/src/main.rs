#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use client::{ClientConfig, HttpApp};
    use log::warn;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ClientConfig::load().unwrap_or_else(|e| {
        warn!("Invalid configuration, using defaults: {e}");
        ClientConfig::default()
    });
    log::info!("Academic API at {}", config.api_root);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_title("Gestión Académica"),
        ..Default::default()
    };
    eframe::run_native(
        "Gestión Académica",
        options,
        Box::new(move |cc| Ok(Box::new(HttpApp::new(cc, &config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use client::{ClientConfig, HttpApp};
    use eframe::wasm_bindgen::JsCast as _;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let mut config = ClientConfig::default();
    // the page address picks the start page, e.g. `#/cursos`
    if let Some(hash) = web_sys::window().and_then(|w| w.location().hash().ok()) {
        if !hash.is_empty() {
            config.start_path = hash;
        }
    }

    let web_options = eframe::WebOptions::default();
    wasm_bindgen_futures::spawn_local(async move {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document to draw in");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("the_canvas_id")
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("the_canvas_id is missing or is not a canvas");
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(move |cc| Ok(Box::new(HttpApp::new(cc, &config)))),
            )
            .await;
        if let Err(e) = start_result {
            log::error!("Failed to start eframe: {e:?}");
        }
    });
}
