use super::super::{Model, Msg};
use shared::pretty_print_json;
use yew::prelude::*;

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(result) = &model.result else {
        return html! {
            <div class="results-placeholder">
                <i class="fa-solid fa-code"></i>
                <p>{"Structured output will appear here."}</p>
            </div>
        };
    };

    // Invalid JSON from the model is shown raw rather than failing the view.
    let (formatted, parse_warning) = match pretty_print_json(&result.json) {
        Some(pretty) => (pretty, false),
        None => (result.json.clone(), true),
    };

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2>{ result.template.to_string() }</h2>
                <span class="result-timestamp">{ format!("Captured at {}", result.timestamp) }</span>
                <button
                    class="copy-btn"
                    title="Copy raw JSON to clipboard"
                    onclick={ctx.link().callback(|_| Msg::CopyResult)}
                >
                    <i class="fa-solid fa-copy"></i>{" Copy"}
                </button>
            </div>
            { if parse_warning {
                html! {
                    <p class="parse-warning">
                        <i class="fa-solid fa-triangle-exclamation"></i>
                        {" The model did not return valid JSON; showing raw output."}
                    </p>
                }
            } else {
                html! {}
            }}
            <pre class="json-output">{ formatted }</pre>
        </div>
    }
}
