use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    let new_session = Callback::from(|_| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    });

    html! {
        <header class="app-header">
            <div class="header-title">
                <h1><i class="fa-solid fa-file-code"></i> {" VisionScript"}</h1>
                <p class="subtitle">{"Upload an image, pick a template, get structured JSON"}</p>
            </div>
            <button class="ghost-btn" onclick={new_session}>{"New Session"}</button>
        </header>
    }
}
