use dotenv::dotenv;
use once_cell::sync::Lazy;
use reqwest::multipart;
use std::env;
use uuid::Uuid;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Push raw image bytes to Cloudinary and return the hosted URL.
///
/// The create/update car flow calls this first and embeds the returned URL
/// in its payload, so the upload must resolve before any car request is
/// issued.
pub async fn upload_image(file_name: String, data: Vec<u8>) -> anyhow::Result<String> {
    dotenv().ok();
    let cloud_name = env::var("CLOUDINARY_CLOUD_NAME").expect("CLOUDINARY_CLOUD_NAME must be set");
    let upload_preset =
        env::var("CLOUDINARY_UPLOAD_PRESET").expect("CLOUDINARY_UPLOAD_PRESET must be set");

    let url = format!("https://api.cloudinary.com/v1_1/{}/upload", cloud_name);
    let public_id = Uuid::new_v4().to_string().to_uppercase();

    let part = multipart::Part::bytes(data).file_name(file_name);
    let form = multipart::Form::new()
        .part("file", part)
        .text("upload_preset", upload_preset)
        .text("folder", "autos")
        .text("public_id", public_id);

    let response = HTTP_CLIENT.post(&url).multipart(form).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Cloudinary upload failed: {} {}", status, body);
    }

    let body: serde_json::Value = response.json().await?;
    // Prefer the https link; older presets only return `url`.
    let link = body
        .get("secure_url")
        .and_then(|v| v.as_str())
        .or_else(|| body.get("url").and_then(|v| v.as_str()))
        .ok_or_else(|| anyhow::anyhow!("Cloudinary response missing url"))?;
    Ok(link.to_string())
}
