mod components;

use gloo_file::callbacks::FileReader;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{ExtractResponse, ExtractionTemplate};
use web_sys::DragEvent;
use yew::prelude::*;

use components::{handlers, header, results, template_picker, upload_section, utils};

/// Where the UI is in the extraction lifecycle. A new request is accepted
/// from any state except `Requesting`; the analyze button is disabled while
/// one is outstanding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Requesting,
    Succeeded,
    Failed,
}

/// The currently selected image, held in memory for the session only.
pub struct ImageState {
    pub file: GlooFile,
    /// Base64 payload, stripped of the data-URL prefix.
    pub data: String,
    pub mime_type: String,
    pub preview_url: ObjectUrl,
}

/// One completed extraction; replaced wholesale by the next call.
pub struct AnalysisResult {
    pub json: String,
    pub template: ExtractionTemplate,
    pub timestamp: String,
}

pub enum Msg {
    // Image lifecycle
    FileSelected(GlooFile),
    ImageEncoded { file: GlooFile, data: String },
    ClearImage,

    // Extraction
    SetTemplate(ExtractionTemplate),
    SetCustomPrompt(String),
    Analyze,
    ExtractSucceeded(ExtractResponse),
    ExtractFailed(String),

    // UI states
    CopyResult,
    SetError(Option<String>),
    SetDragging(bool),
    HandleDrop(DragEvent),
}

pub struct Model {
    pub image: Option<ImageState>,
    pub template: ExtractionTemplate,
    pub custom_prompt: String,
    pub phase: Phase,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    pub is_dragging: bool,
    // Kept alive until the data-URL read completes.
    pub reader: Option<FileReader>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            image: None,
            template: ExtractionTemplate::General,
            custom_prompt: String::new(),
            phase: Phase::Idle,
            result: None,
            error: None,
            is_dragging: false,
            reader: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Image lifecycle
            Msg::FileSelected(file) => handlers::handle_file_selected(self, ctx, file),
            Msg::ImageEncoded { file, data } => handlers::handle_image_encoded(self, file, data),
            Msg::ClearImage => handlers::handle_clear_image(self),

            // Extraction
            Msg::SetTemplate(template) => {
                self.template = template;
                true
            }
            Msg::SetCustomPrompt(text) => {
                self.custom_prompt = text;
                true
            }
            Msg::Analyze => handlers::handle_analyze(self, ctx),
            Msg::ExtractSucceeded(response) => handlers::handle_extract_succeeded(self, response),
            Msg::ExtractFailed(message) => handlers::handle_extract_failed(self, message),

            // UI states
            Msg::CopyResult => handlers::handle_copy_result(self),
            Msg::SetError(error) => {
                self.error = error;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header() }

                <main class="main-content">
                    <section class="input-column">
                        { upload_section::render_upload_section(self, ctx) }
                        { template_picker::render_template_picker(self, ctx) }
                        { utils::render_error_message(self) }
                    </section>
                    <section class="output-column">
                        { results::render_results(self, ctx) }
                    </section>
                </main>

                <footer class="app-footer">
                    <p>{"VisionScript | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
