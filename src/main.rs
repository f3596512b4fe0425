use std::sync::Arc;

use vidlink::{AppContext, Config};

fn main() {
    let config = Config::from_env();
    vidlink::logging::init(config.log_level);

    let context = AppContext::open(config);

    dioxus::LaunchBuilder::new()
        .with_context(Arc::new(context))
        .launch(vidlink::ui::App);
}
