//! AWS credential resolution and SigV4 request signing.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use aws_sigv4::{
    http_request::{SignableBody, SignableRequest, SigningSettings},
    sign::v4::SigningParams,
};

use crate::core::explorer::ExplorerError;

/// Signing name of the Cost Explorer service.
pub const SERVICE_NAME: &str = "ce";

/// Where request credentials come from.
#[derive(Clone)]
pub enum CredentialSource {
    Static(Credentials),
    /// The AWS default chain (env vars, profile, SSO, container/instance role).
    Chain(SharedCredentialsProvider),
}

impl CredentialSource {
    pub fn from_keys(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        Self::Static(Credentials::new(
            access_key_id,
            secret_access_key,
            session_token,
            None,
            "cost-explorer-tool-config",
        ))
    }

    /// Load the default credential chain for `region`.
    pub async fn default_chain(region: &str) -> Result<Self, ExplorerError> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        let provider = config
            .credentials_provider()
            .ok_or(ExplorerError::NoCredentialsProvider)?;
        Ok(Self::Chain(provider))
    }

    pub async fn credentials(&self) -> Result<Credentials, ExplorerError> {
        match self {
            Self::Static(credentials) => Ok(credentials.clone()),
            Self::Chain(provider) => provider
                .provide_credentials()
                .await
                .map_err(|e| ExplorerError::Credentials(e.to_string())),
        }
    }
}

/// Sign a request with SigV4 and return the headers to attach to it.
pub fn sign_request(
    credentials: &Credentials,
    region: &str,
    method: &str,
    url: &str,
    headers: &[(&str, &str)],
    body: &[u8],
) -> Result<Vec<(String, String)>, ExplorerError> {
    let identity = credentials.clone().into();

    let signing_params = SigningParams::builder()
        .identity(&identity)
        .region(region)
        .name(SERVICE_NAME)
        .time(std::time::SystemTime::now())
        .settings(SigningSettings::default())
        .build()
        .map_err(|e| ExplorerError::Signing(e.to_string()))?;

    let signable_request = SignableRequest::new(
        method,
        url,
        headers.iter().copied(),
        SignableBody::Bytes(body),
    )
    .map_err(|e| ExplorerError::Signing(e.to_string()))?;

    let (instructions, _signature) =
        aws_sigv4::http_request::sign(signable_request, &signing_params.into())
            .map_err(|e| ExplorerError::Signing(e.to_string()))?
            .into_parts();

    Ok(instructions
        .headers()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect())
}
