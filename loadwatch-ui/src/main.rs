//! Loadwatch Dashboard Glue
//!
//! Browser side of the server load dashboard, compiled to WebAssembly.
//!
//! # Features
//!
//! - Load chart for the selected server, drawn by Chart.js
//! - Decorative star-field animation on the footer canvas
//!
//! # Architecture
//!
//! The page is rendered by the server; this module attaches to elements it
//! finds there. Simulation and chart session logic live in the `loadwatch`
//! crate, this crate only binds them to the DOM, `fetch` and
//! `requestAnimationFrame`.

mod api;
mod components;
mod dom;

use loadwatch::Config;

/// Id of the optional inline TOML configuration block
const CONFIG_ELEMENT_ID: &str = "loadwatch-config";

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    dom::on_ready(|| {
        let config = page_config();
        components::chart::start(config.chart.clone());
        components::star_field::start(config.starfield);
    });
}

/// Config from `<script type="application/toml" id="loadwatch-config">`,
/// defaults when the block is absent or invalid
fn page_config() -> Config {
    let Some(el) = dom::element_by_id::<web_sys::Element>(CONFIG_ELEMENT_ID) else {
        return Config::default();
    };
    let text = el.text_content().unwrap_or_default();

    match Config::from_toml_str(&text).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::warn_1(&format!("Ignoring page config: {}", e).into());
            Config::default()
        }
    }
}
