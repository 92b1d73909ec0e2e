use thiserror::Error;

#[derive(Debug, Error)]
pub enum XweatherError {
    #[error("Missing Xweather credential: environment variable {0} is not set")]
    MissingCredentials(&'static str),

    #[error("Failed to build the HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON data")]
    JsonParse(#[from] serde_json::Error),

    #[error("Xweather API error ({code}): {description}")]
    Api { code: String, description: String },
}
