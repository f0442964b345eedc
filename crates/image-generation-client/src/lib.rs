//! OpenAI image generation client.
//!
//! Text-to-image and image-edit calls against the OpenAI Images API.
//! Responses are requested as base64 JSON and decoded, so callers receive
//! raw image bytes ready for CDN upload.

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig,
    types::{
        CreateImageEditRequestArgs, CreateImageRequestArgs, DallE2ImageSize, Image, ImageInput,
        ImageModel, ImageResponseFormat, ImageSize,
    },
    Client,
};
use async_trait::async_trait;
use base64::Engine as _;
use std::sync::Arc;
use tracing;

/// Image generation interface: text-to-image and image edit, both yielding
/// raw image bytes. Lets handlers swap in mocks.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>>;
    async fn edit_image(&self, image: Vec<u8>, prompt: &str) -> Result<Vec<u8>>;
}

/// OpenAI image generation client.
#[derive(Clone)]
pub struct ImageGenerationClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    size: ImageSize,
    api_key_for_logging: Option<String>,
}

impl ImageGenerationClient {
    /// Creates a new image generation client.
    pub fn new(api_key: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = OpenAIConfig::new().with_api_key(api_key);
        let client = Client::with_config(config);
        Self {
            client: Arc::new(client),
            model: "dall-e-3".to_string(),
            size: ImageSize::S1024x1024,
            api_key_for_logging,
        }
    }

    /// Custom base URL for OpenAI-compatible API services.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let api_key_for_logging = Some(api_key.clone());
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        let client = Client::with_config(config);
        Self {
            client: Arc::new(client),
            model: "dall-e-3".to_string(),
            size: ImageSize::S1024x1024,
            api_key_for_logging,
        }
    }

    /// Sets the model (dall-e-2 or dall-e-3).
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Sets the output image size.
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    fn masked_key(&self) -> String {
        self.api_key_for_logging
            .as_deref()
            .map(|k| {
                if k.len() <= 11 {
                    "***".to_string()
                } else {
                    format!(
                        "{}***{}",
                        &k[..7.min(k.len())],
                        &k[k.len().saturating_sub(4)..]
                    )
                }
            })
            .unwrap_or_else(|| "***".to_string())
    }

    /// Generates an image for `prompt`, returning decoded PNG bytes.
    #[tracing::instrument(skip(self))]
    pub async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        tracing::info!(
            model = %self.model,
            size = ?self.size,
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            api_key = %self.masked_key(),
            "OpenAI image generation request"
        );

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(ImageModel::Other(self.model.clone()))
            .size(self.size)
            .response_format(ImageResponseFormat::B64Json)
            .n(1)
            .build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "OpenAI image generation request body");
        }

        let response = self.client.images().create(request).await?;

        if let Some(b64) = response.data.first().and_then(|d| match d.as_ref() {
            Image::B64Json { b64_json, .. } => Some(b64_json.clone()),
            _ => None,
        }) {
            let bytes = base64::engine::general_purpose::STANDARD.decode(b64.as_str())?;
            tracing::info!(size = bytes.len(), "OpenAI image generation completed");
            Ok(bytes)
        } else {
            anyhow::bail!("No image payload in response");
        }
    }

    /// Edits `image` according to `prompt`, returning decoded PNG bytes.
    #[tracing::instrument(skip(self, image))]
    pub async fn edit_image(&self, image: Vec<u8>, prompt: &str) -> Result<Vec<u8>> {
        tracing::info!(
            model = %self.model,
            size = ?self.size,
            source_size = image.len(),
            prompt_preview = %prompt.chars().take(100).collect::<String>(),
            api_key = %self.masked_key(),
            "OpenAI image edit request"
        );

        let edit_size = match self.size {
            ImageSize::S256x256 => DallE2ImageSize::S256x256,
            ImageSize::S512x512 => DallE2ImageSize::S512x512,
            _ => DallE2ImageSize::S1024x1024,
        };

        let request = CreateImageEditRequestArgs::default()
            .image(ImageInput::from_vec_u8("image.png".to_string(), image))
            .prompt(prompt)
            .size(edit_size)
            .response_format(ImageResponseFormat::B64Json)
            .n(1)
            .build()?;

        let response = self.client.images().create_edit(request).await?;

        if let Some(b64) = response.data.first().and_then(|d| match d.as_ref() {
            Image::B64Json { b64_json, .. } => Some(b64_json.clone()),
            _ => None,
        }) {
            let bytes = base64::engine::general_purpose::STANDARD.decode(b64.as_str())?;
            tracing::info!(size = bytes.len(), "OpenAI image edit completed");
            Ok(bytes)
        } else {
            anyhow::bail!("No image payload in response");
        }
    }
}

#[async_trait]
impl ImageGenerator for ImageGenerationClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>> {
        ImageGenerationClient::generate_image(self, prompt).await
    }

    async fn edit_image(&self, image: Vec<u8>, prompt: &str) -> Result<Vec<u8>> {
        ImageGenerationClient::edit_image(self, image, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // requires a real API key
    async fn test_generate_image() {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap();
        let client = ImageGenerationClient::new(api_key);
        let bytes = client
            .generate_image("a cute cat playing with a ball")
            .await
            .unwrap();
        assert!(!bytes.is_empty());
    }
}
