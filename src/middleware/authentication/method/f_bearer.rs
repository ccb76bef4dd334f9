use crate::configuration::Settings;
use crate::forms;
use crate::middleware::authentication::get_header;
use crate::models;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// TTL cache of validated tokens so a burst of requests with the same
/// credential hits the auth service once.
pub struct AuthCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedUser>>,
}

struct CachedUser {
    user: models::User,
    expires_at: Instant,
}

impl AuthCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, token: &str) -> Option<models::User> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(token) {
                if entry.expires_at > now {
                    return Some(entry.user.clone());
                }
            }
        }

        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(token) {
            if entry.expires_at <= now {
                entries.remove(token);
            } else {
                return Some(entry.user.clone());
            }
        }

        None
    }

    pub async fn insert(&self, token: String, user: models::User) {
        let expires_at = Instant::now() + self.ttl;
        let mut entries = self.entries.write().await;
        entries.insert(token, CachedUser { user, expires_at });
    }
}

fn try_extract_token(authentication: String) -> Result<String, String> {
    let mut authentication_parts = authentication.splitn(2, ' ');
    match authentication_parts.next() {
        Some("Bearer") => {}
        _ => return Err("Bearer scheme is missing".to_string()),
    }
    let token = authentication_parts.next();
    if token.is_none() {
        tracing::error!("Bearer token is missing");
        return Err("Authentication required".to_string());
    }

    Ok(token.unwrap().into())
}

#[tracing::instrument(name = "Authenticate with bearer token", skip(req))]
pub async fn try_bearer(req: &mut ServiceRequest) -> Result<(), String> {
    let authentication = get_header::<String>(req, "authorization")?;
    if authentication.is_none() {
        return Err("Authentication required".to_string());
    }

    let token = try_extract_token(authentication.unwrap())?;
    let settings = req
        .app_data::<web::Data<Settings>>()
        .ok_or("app settings are not configured")?;
    let http_client = req
        .app_data::<web::Data<reqwest::Client>>()
        .ok_or("auth http client is not configured")?;
    let cache = req
        .app_data::<web::Data<AuthCache>>()
        .ok_or("auth cache is not configured")?;

    let user = match cache.get(&token).await {
        Some(user) => user,
        None => {
            let user = fetch_user(http_client.get_ref(), settings.auth_url.as_str(), &token)
                .await?;
            cache.insert(token, user.clone()).await;
            user
        }
    };

    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    Ok(())
}

async fn fetch_user(
    client: &reqwest::Client,
    auth_url: &str,
    token: &str,
) -> Result<models::User, String> {
    let resp = client
        .get(auth_url)
        .bearer_auth(token)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|err| {
            tracing::error!("auth request failed: {:?}", err);
            "No response from auth server".to_string()
        })?;

    if !resp.status().is_success() {
        return Err("401 Unauthorized".to_string());
    }

    resp.json::<forms::UserForm>()
        .await
        .map_err(|_err| "can't parse the auth response body".to_string())?
        .try_into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            try_extract_token("Bearer abc123".to_string()).unwrap(),
            "abc123"
        );
    }

    #[test]
    fn rejects_foreign_schemes() {
        assert!(try_extract_token("Basic abc123".to_string()).is_err());
        assert!(try_extract_token("Bearer".to_string()).is_err());
    }

    #[tokio::test]
    async fn cache_expires_entries() {
        let cache = AuthCache::new(Duration::from_secs(0));
        let user = models::User {
            id: "u1".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.c".to_string(),
            email_confirmed: true,
        };
        cache.insert("token".to_string(), user).await;
        assert!(cache.get("token").await.is_none());
    }

    #[tokio::test]
    async fn cache_returns_live_entries() {
        let cache = AuthCache::new(Duration::from_secs(60));
        let user = models::User {
            id: "u1".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.c".to_string(),
            email_confirmed: true,
        };
        cache.insert("token".to_string(), user).await;
        assert_eq!(cache.get("token").await.unwrap().id, "u1");
    }
}
