mod components;
mod config;
mod elements;
mod model;
mod state;
mod store;
mod util;

use components::app::App;
use config::BoardConfig;

fn main() {
    let cfg = BoardConfig::load();
    util::init_logging(cfg.max_level());
    tracing::info!(store = ?cfg.store, api = %cfg.api_base, "starting board");
    yew::Renderer::<App>::new().render();
}
