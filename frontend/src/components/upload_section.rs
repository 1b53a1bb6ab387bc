use super::super::{Model, Msg, Phase};
use super::utils::{debounce, first_image_file};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="upload-section">
            <h2><i class="fa-solid fa-image"></i> {" Upload Source Image"}</h2>
            { match &model.image {
                Some(_) => render_preview(model, ctx),
                None => render_drop_zone(model, ctx),
            }}
        </div>
    }
}

fn render_drop_zone(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let files = input.files();
        let file = files.as_ref().and_then(first_image_file);

        input.set_value("");

        match file {
            Some(file) => Msg::FileSelected(file),
            None => Msg::SetError(Some("No valid image file selected.".into())),
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        if let Some(input) = web_sys::window()
            .unwrap()
            .document()
            .unwrap()
            .get_element_by_id("file-input")
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop an image here, or click to browse"}</p>
                    <p class="file-types">{"Supported formats: JPG, PNG, WEBP, GIF"}</p>
                </div>
            </div>
        </>
    }
}

fn render_preview(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(image) = &model.image else {
        return html! {};
    };
    let link = ctx.link();

    html! {
        <div class="preview-container">
            <img
                class="image-preview"
                src={image.preview_url.to_string()}
                alt={image.file.name()}
            />
            <p class="file-name" title={image.mime_type.clone()}>{ image.file.name() }</p>
            <button
                class="clear-btn"
                disabled={model.phase == Phase::Requesting}
                onclick={link.callback(|_| Msg::ClearImage)}
            >
                <i class="fa-solid fa-trash"></i>{" Clear"}
            </button>
        </div>
    }
}
