use super::super::{Model, Msg, Phase};
use shared::ExtractionTemplate;
use strum::IntoEnumIterator;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

pub fn render_template_picker(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_select = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        match select.value().parse::<ExtractionTemplate>() {
            Ok(template) => Msg::SetTemplate(template),
            Err(_) => Msg::SetError(Some("Unknown template selected.".into())),
        }
    });

    let handle_prompt_input = link.callback(|e: InputEvent| {
        let textarea: HtmlTextAreaElement = e.target_unchecked_into();
        Msg::SetCustomPrompt(textarea.value())
    });

    let requesting = model.phase == Phase::Requesting;

    html! {
        <div class="template-picker">
            <h2><i class="fa-solid fa-wand-magic-sparkles"></i> {" Extraction Template"}</h2>
            <select id="template-select" onchange={handle_select} disabled={requesting}>
                { for ExtractionTemplate::iter().map(|template| html! {
                    <option
                        value={template.to_string()}
                        selected={model.template == template}
                    >
                        { template.to_string() }
                    </option>
                })}
            </select>

            { if model.template == ExtractionTemplate::Custom {
                html! {
                    <textarea
                        id="custom-prompt"
                        placeholder="Describe the JSON you want back, e.g. 'List every street sign with its color.'"
                        value={model.custom_prompt.clone()}
                        oninput={handle_prompt_input}
                        disabled={requesting}
                    />
                }
            } else {
                html! {}
            }}

            <button
                class="analyze-btn"
                disabled={requesting || model.image.is_none()}
                onclick={link.callback(|_| Msg::Analyze)}
            >
                { render_analyze_button_content(model) }
            </button>
        </div>
    }
}

fn render_analyze_button_content(model: &Model) -> Html {
    if model.phase == Phase::Requesting {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
    } else {
        html! { <><i class="fa-solid fa-bolt"></i>{" Extract JSON"}</> }
    }
}
