use std::collections::HashMap;

use super::Session;
use crate::core::user::{Role, User};

pub(crate) const SERVICE_NAME: &str = "teamup-session";

pub const KEY_TOKEN: &str = "token";
pub const KEY_REFRESH_TOKEN: &str = "refreshToken";
pub const KEY_ROLE: &str = "role";
pub const KEY_USER: &str = "user";

const KEYS: [&str; 4] = [KEY_TOKEN, KEY_REFRESH_TOKEN, KEY_ROLE, KEY_USER];

async fn open() -> Result<oo7::Keyring, String> {
    oo7::Keyring::new()
        .await
        .map_err(|e| format!("Failed to connect to keyring: {}", e))
}

fn attributes<'a>(server: &'a str, key: &'a str) -> HashMap<&'a str, &'a str> {
    let mut attrs = HashMap::new();
    attrs.insert("service", SERVICE_NAME);
    attrs.insert("server", server);
    attrs.insert("key", key);
    attrs
}

/// The stored string values of a session, one per key.
pub fn session_entries(session: &Session) -> Vec<(&'static str, String)> {
    let mut entries = Vec::new();
    if let Some(ref token) = session.token {
        entries.push((KEY_TOKEN, token.clone()));
    }
    if let Some(ref refresh) = session.refresh_token {
        entries.push((KEY_REFRESH_TOKEN, refresh.clone()));
    }
    if let Some(role) = session.role() {
        entries.push((KEY_ROLE, role.as_str().to_string()));
    }
    if let Some(ref user) = session.user {
        match serde_json::to_string(user) {
            Ok(json) => entries.push((KEY_USER, json)),
            Err(e) => log::warn!("Not storing user profile: {}", e),
        }
    }
    entries
}

/// Rebuild a session from stored values. A user blob that no longer parses is dropped.
pub fn session_from_entries(entries: &HashMap<&str, String>) -> Session {
    let user = entries.get(KEY_USER).and_then(|json| {
        serde_json::from_str::<User>(json)
            .map_err(|e| log::warn!("Ignoring stored user profile: {}", e))
            .ok()
    });
    Session {
        token: entries.get(KEY_TOKEN).cloned().filter(|t| !t.is_empty()),
        refresh_token: entries.get(KEY_REFRESH_TOKEN).cloned(),
        role: entries.get(KEY_ROLE).and_then(|r| Role::from_name(r)),
        user,
    }
}

/// Store the session for `server`, replacing whatever was there.
pub async fn save(server: &str, session: &Session) -> Result<(), String> {
    let keyring = open().await?;
    clear_with(&keyring, server).await?;

    for (key, value) in session_entries(session) {
        keyring
            .create_item(
                &format!("TeamUp {} ({})", key, server),
                &attributes(server, key),
                value.as_bytes(),
                true,
            )
            .await
            .map_err(|e| format!("Failed to store {}: {}", key, e))?;
    }
    Ok(())
}

pub async fn load(server: &str) -> Result<Session, String> {
    let keyring = open().await?;
    let mut entries = HashMap::new();

    for key in KEYS {
        let items = keyring
            .search_items(&attributes(server, key))
            .await
            .map_err(|e| format!("Failed to search keyring: {}", e))?;
        if let Some(item) = items.first() {
            let secret = item
                .secret()
                .await
                .map_err(|e| format!("Failed to read secret: {}", e))?;
            let value = String::from_utf8(secret.to_vec())
                .map_err(|e| format!("Invalid UTF-8 in secret: {}", e))?;
            entries.insert(key, value);
        }
    }

    Ok(session_from_entries(&entries))
}

async fn clear_with(keyring: &oo7::Keyring, server: &str) -> Result<(), String> {
    for key in KEYS {
        let items = keyring
            .search_items(&attributes(server, key))
            .await
            .map_err(|e| format!("Failed to search keyring: {}", e))?;
        for item in items {
            item.delete()
                .await
                .map_err(|e| format!("Failed to delete {}: {}", key, e))?;
        }
    }
    Ok(())
}

pub async fn clear(server: &str) -> Result<(), String> {
    let keyring = open().await?;
    clear_with(&keyring, server).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_use_the_four_keys() {
        let session = Session {
            token: Some("a".into()),
            refresh_token: Some("r".into()),
            role: Some(Role::Client),
            user: Some(User {
                id: 5,
                name: "Kim".into(),
                email: "k@uni.edu".into(),
                role: Role::Client,
                skills: vec!["UX".into()],
                bio: None,
                avatar_url: None,
                created_at: None,
            }),
        };
        let entries = session_entries(&session);
        let keys: Vec<&str> = entries.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, KEYS.to_vec());
        assert_eq!(entries[2].1, "customer");

        let map: HashMap<&str, String> = entries.into_iter().collect();
        assert_eq!(session_from_entries(&map), session);
    }

    #[test]
    fn corrupt_user_blob_is_dropped() {
        let mut map = HashMap::new();
        map.insert(KEY_TOKEN, "t".to_string());
        map.insert(KEY_USER, "{not json".to_string());
        let s = session_from_entries(&map);
        assert!(s.is_authenticated());
        assert_eq!(s.user, None);
        assert_eq!(s.role, None);
    }
}
