use super::prelude::*;
use crate::constants::EMPTY_PROMPT_PLACEHOLDER;
use axum::extract::rejection::FormRejection;

#[derive(Deserialize, Debug, Default)]
pub(crate) struct PromptForm {
    #[serde(default)]
    prompt: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub(crate) struct IndexTemplate {
    pub(crate) prompt: String,
    pub(crate) image_url: Option<String>,
    pub(crate) empty_placeholder: &'static str,
}

impl IndexTemplate {
    fn new(prompt: String, image_url: Option<String>) -> Self {
        Self {
            prompt,
            image_url,
            empty_placeholder: EMPTY_PROMPT_PLACEHOLDER,
        }
    }
}

/// handles the / GET, always a blank form
pub(crate) async fn index_handler() -> IndexTemplate {
    IndexTemplate::new(String::new(), None)
}

/// handles the / POST
pub(crate) async fn generate_handler(
    State(state): State<AppState>,
    form: Result<Form<PromptForm>, FormRejection>,
) -> Result<IndexTemplate, PromptImgError> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(err) => {
            debug!("Unreadable form submission, treating the prompt as empty: {}", err);
            PromptForm::default()
        }
    };
    let prompt = form.prompt.unwrap_or_default().trim().to_string();

    let generated_dir = state.generated_dir.clone();
    let font = Arc::clone(&state.font);
    let to_render = prompt.clone();
    let image =
        tokio::task::spawn_blocking(move || render_prompt(&to_render, &generated_dir, &font))
            .await??;
    info!(
        "Generated {} from a {} character prompt",
        image.filename,
        prompt.chars().count()
    );

    Ok(IndexTemplate::new(prompt, Some(image.url())))
}
