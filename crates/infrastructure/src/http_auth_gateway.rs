use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use taskdeck_application::{AuthGateway, TokenGrant};
use taskdeck_core::{AuthError, Role, UserId, UserIdentity};
use taskdeck_domain::CredentialBundle;
use tracing::debug;

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access: String,
    refresh: String,
    id: i64,
    username: String,
    role: Role,
}

/// HTTP implementation of the token endpoint port.
#[derive(Clone)]
pub struct HttpAuthGateway {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    /// Creates a gateway for the API rooted at `base_url`.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn obtain_token(&self, username: &str, password: &str) -> Result<TokenGrant, AuthError> {
        let url = format!("{}/token/", self.base_url);
        debug!(url = %url, username = username, "requesting access token");

        let response = self
            .http_client
            .post(url.as_str())
            .json(&TokenRequest { username, password })
            .send()
            .await
            .map_err(|error| AuthError::Unknown(format!("failed to call token endpoint: {error}")))?;

        if !response.status().is_success() {
            debug!(
                status = response.status().as_u16(),
                "token endpoint rejected credentials"
            );
            return Err(AuthError::InvalidCredentials);
        }

        let body = response.json::<TokenResponse>().await.map_err(|error| {
            AuthError::Unknown(format!("failed to decode token response: {error}"))
        })?;

        Ok(TokenGrant {
            tokens: CredentialBundle::new(body.access, body.refresh),
            user: UserIdentity::new(UserId::new(body.id), body.username, body.role),
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::post;
    use serde_json::{Value, json};
    use taskdeck_application::AuthGateway;
    use taskdeck_core::{AuthError, Role, UserId};
    use tokio::net::TcpListener;

    use super::HttpAuthGateway;

    async fn token_endpoint(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["username"] == "u" && body["password"] == "p" {
            return (
                StatusCode::OK,
                Json(json!({
                    "access": "a",
                    "refresh": "r",
                    "id": 1,
                    "username": "u",
                    "role": "ADMIN"
                })),
            );
        }
        if body["username"] == "broken" {
            return (StatusCode::OK, Json(json!({"access": "a"})));
        }
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
    }

    async fn spawn_api() -> String {
        let app = Router::new().route("/api/token/", post(token_endpoint));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|error| panic!("failed to bind test listener: {error}"));
        let address = listener
            .local_addr()
            .unwrap_or_else(|error| panic!("failed to read test address: {error}"));

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        format!("http://{address}/api/")
    }

    #[tokio::test]
    async fn valid_credentials_yield_grant() {
        let gateway = HttpAuthGateway::new(reqwest::Client::new(), spawn_api().await);

        let grant = gateway.obtain_token("u", "p").await;

        assert!(grant.is_ok());
        let grant = grant.unwrap_or_else(|_| unreachable!());
        assert_eq!(grant.tokens.access(), "a");
        assert_eq!(grant.tokens.refresh(), "r");
        assert_eq!(grant.user.id(), UserId::new(1));
        assert_eq!(grant.user.username(), "u");
        assert_eq!(grant.user.role(), Role::Admin);
    }

    #[tokio::test]
    async fn non_success_status_is_invalid_credentials() {
        let gateway = HttpAuthGateway::new(reqwest::Client::new(), spawn_api().await);

        assert_eq!(
            gateway.obtain_token("u", "nope").await,
            Err(AuthError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn malformed_success_body_is_unknown_error() {
        let gateway = HttpAuthGateway::new(reqwest::Client::new(), spawn_api().await);

        assert!(matches!(
            gateway.obtain_token("broken", "p").await,
            Err(AuthError::Unknown(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_unknown_error() {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|error| panic!("failed to bind test listener: {error}"));
        let address = listener
            .local_addr()
            .unwrap_or_else(|error| panic!("failed to read test address: {error}"));
        drop(listener);

        let gateway = HttpAuthGateway::new(reqwest::Client::new(), format!("http://{address}"));

        assert!(matches!(
            gateway.obtain_token("u", "p").await,
            Err(AuthError::Unknown(_))
        ));
    }
}
