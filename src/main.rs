use dioxus::prelude::*;

mod components;
mod db;
mod diagnostics;
mod i18n;
mod library;
mod logging;
mod playback;
mod playlist;
mod utils;

use components::{AppShell, StartupError, StoreHandle};

const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");
const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    logging::init();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let store = use_hook(|| {
        db::open_store()
            .map(StoreHandle::new)
            .map_err(|e| e.to_string())
    });

    rsx! {
        document::Title { "ReelShelf" }
        document::Meta { name: "theme-color", content: "#09090b" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }

        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: APP_CSS }

        {match store {
            Ok(store) => rsx! { AppShell { store } },
            Err(message) => {
                log::error!("failed to open the library: {message}");
                rsx! { StartupError { message } }
            }
        }}
    }
}
