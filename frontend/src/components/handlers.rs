use super::super::{AnalysisResult, ImageState, Model, Msg, Phase};
use crate::components::utils::first_image_file;
use gloo_console::error;
use gloo_file::{File as GlooFile, ObjectUrl, callbacks::read_as_data_url};
use gloo_net::http::Request;
use js_sys::Date;
use shared::{ErrorResponse, ExtractRequest, ExtractResponse, ExtractionTemplate};
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

pub fn handle_file_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let link = ctx.link().clone();
    let selected = file.clone();

    // The reader handle must outlive the read; it is dropped once the
    // encoded image lands in the model.
    model.reader = Some(read_as_data_url(&file, move |result| match result {
        Ok(data_url) => match data_url.split_once(',') {
            Some((_header, payload)) => link.send_message(Msg::ImageEncoded {
                file: selected,
                data: payload.to_string(),
            }),
            None => link.send_message(Msg::SetError(Some(
                "Could not read the selected file.".into(),
            ))),
        },
        Err(e) => link.send_message(Msg::SetError(Some(format!("Failed to read file: {:?}", e)))),
    }));

    model.error = None;
    true
}

/// A newly encoded image replaces the previous one and clears any prior
/// result or error before the next extraction runs.
pub fn handle_image_encoded(model: &mut Model, file: GlooFile, data: String) -> bool {
    let mime_type = file.raw_mime_type();
    let preview_url = ObjectUrl::from(file.clone());

    model.image = Some(ImageState {
        file,
        data,
        mime_type,
        preview_url,
    });
    model.result = None;
    model.error = None;
    model.phase = Phase::Idle;
    model.reader = None;
    true
}

pub fn handle_clear_image(model: &mut Model) -> bool {
    model.image = None;
    model.result = None;
    model.error = None;
    model.phase = Phase::Idle;
    model.reader = None;
    true
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.phase == Phase::Requesting {
        return false;
    }

    let Some(image) = &model.image else {
        model.error = Some("Please select an image first.".into());
        return true;
    };

    model.phase = Phase::Requesting;
    model.error = None;

    let body = ExtractRequest {
        image_data: image.data.clone(),
        mime_type: image.mime_type.clone(),
        template: model.template,
        custom_prompt: (model.template == ExtractionTemplate::Custom)
            .then(|| model.custom_prompt.clone()),
    };
    send_extract_request(ctx, body);
    true
}

pub fn handle_extract_succeeded(model: &mut Model, response: ExtractResponse) -> bool {
    model.phase = Phase::Succeeded;
    model.result = Some(AnalysisResult {
        json: response.json,
        template: response.template,
        timestamp: String::from(Date::new_0().to_locale_time_string("en-US")),
    });
    true
}

/// A failed call leaves the image and template selection untouched so the
/// user can retry without re-uploading.
pub fn handle_extract_failed(model: &mut Model, message: String) -> bool {
    model.phase = Phase::Failed;
    model.error = Some(message);
    true
}

pub fn handle_copy_result(model: &mut Model) -> bool {
    if let Some(result) = &model.result {
        if let Some(window) = web_sys::window() {
            // Raw text verbatim, not the pretty-printed rendering.
            let _ = window.navigator().clipboard().write_text(&result.json);
        }
    }
    false
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    let dropped = event
        .data_transfer()
        .and_then(|dt| dt.files())
        .and_then(|file_list| first_image_file(&file_list));

    match dropped {
        Some(file) => ctx.link().send_message(Msg::FileSelected(file)),
        None => model.error = Some("Only image files are supported.".into()),
    }
    true
}

fn send_extract_request(ctx: &Context<Model>, body: ExtractRequest) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let request = match Request::post("/api/extract").json(&body) {
                Ok(request) => request,
                Err(e) => {
                    link.send_message(Msg::ExtractFailed(format!("Failed to build request: {}", e)));
                    return;
                }
            };

            match request.send().await {
                Ok(response) if response.ok() => {
                    match response.json::<ExtractResponse>().await {
                        Ok(result) => link.send_message(Msg::ExtractSucceeded(result)),
                        Err(e) => link.send_message(Msg::ExtractFailed(format!(
                            "Failed to parse response: {}",
                            e
                        ))),
                    }
                }
                Ok(response) => {
                    let message = response
                        .json::<ErrorResponse>()
                        .await
                        .map(|body| body.error)
                        .unwrap_or_else(|_| format!("Server error: {}", response.status()));
                    link.send_message(Msg::ExtractFailed(message));
                }
                Err(e) => {
                    error!(format!("Extract request failed: {:?}", e));
                    link.send_message(Msg::ExtractFailed(format!("Network error: {}", e)));
                }
            }
        }
    });
}
