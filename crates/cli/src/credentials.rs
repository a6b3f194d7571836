use thiserror::Error;
use vidsub_core::speech::infrastructure::google_speech_recognizer::Credentials;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const ACCESS_TOKEN_VAR: &str = "GOOGLE_ACCESS_TOKEN";

/// OAuth scope that covers Speech-to-Text.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("failed to start the token runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("application default credentials unavailable: {0}")]
    Unavailable(String),
}

/// Supplies an OAuth access token when no credential is set explicitly.
pub trait TokenProvider {
    fn access_token(&self) -> Result<String, CredentialsError>;
}

/// Google Application Default Credentials: `GOOGLE_APPLICATION_CREDENTIALS`,
/// the gcloud well-known file, or the metadata server.
pub struct ApplicationDefaultCredentials;

impl TokenProvider for ApplicationDefaultCredentials {
    fn access_token(&self) -> Result<String, CredentialsError> {
        // gcp_auth is async; the runtime lives only for this lookup so the
        // blocking HTTP client used later never runs inside it.
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CredentialsError::Runtime)?;

        runtime
            .block_on(async {
                let provider = gcp_auth::provider().await?;
                let token = provider.token(&[CLOUD_PLATFORM_SCOPE]).await?;
                Ok::<_, gcp_auth::Error>(token.as_str().to_string())
            })
            .map_err(|e| CredentialsError::Unavailable(e.to_string()))
    }
}

/// Speech service credentials from the process environment, falling back to
/// application default credentials.
pub fn from_env() -> Option<Credentials> {
    resolve(|name| std::env::var(name).ok(), &ApplicationDefaultCredentials)
}

/// Explicit variables win; the token provider is only asked when neither is set.
pub fn resolve(
    lookup: impl Fn(&str) -> Option<String>,
    provider: &dyn TokenProvider,
) -> Option<Credentials> {
    if let Some(credentials) = from_lookup(lookup) {
        return Some(credentials);
    }

    match provider.access_token() {
        Ok(token) => {
            log::info!("Using Google application default credentials");
            Some(Credentials::BearerToken(token))
        }
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

/// An API key takes precedence over an access token. Blank values count as unset.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Credentials> {
    let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    non_blank(API_KEY_VAR)
        .map(Credentials::ApiKey)
        .or_else(|| non_blank(ACCESS_TOKEN_VAR).map(Credentials::BearerToken))
}
