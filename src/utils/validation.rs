use url::Url;

use crate::inline::error::DescriptorError;

/// Telegram's limit on `callback_data`.
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// A URL button target must be absolute and carry a network location.
pub fn validate_button_url(raw: &str) -> Result<Url, DescriptorError> {
    let url = Url::parse(raw.trim()).map_err(|_| DescriptorError::InvalidUrl(raw.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(DescriptorError::InvalidUrl(raw.to_string())),
    }
}

/// Web apps only open over https.
pub fn validate_web_app_url(raw: &str) -> Result<Url, DescriptorError> {
    let url = Url::parse(raw.trim()).map_err(|_| DescriptorError::InvalidWebApp(raw.to_string()))?;

    if url.scheme() != "https" || url.host_str().is_none() {
        return Err(DescriptorError::InvalidWebApp(raw.to_string()));
    }

    Ok(url)
}

/// Callback data must be 1 to 64 bytes.
pub fn validate_callback_data(data: &str) -> Result<(), DescriptorError> {
    if data.is_empty() || data.len() > MAX_CALLBACK_DATA_LEN {
        return Err(DescriptorError::CallbackDataLength(data.len()));
    }

    Ok(())
}

/// Deep link that opens a user's profile.
pub fn mention_url(user_id: u64) -> Result<Url, DescriptorError> {
    let raw = format!("tg://user?id={user_id}");
    Url::parse(&raw).map_err(|_| DescriptorError::InvalidUrl(raw))
}
