//! Quiz state persistence in the visitor's session.

use tower_sessions::Session;

use super::QuizState;
use crate::models::session_keys;

/// Load the quiz state, starting fresh when none is stored.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load(session: &Session) -> Result<QuizState, tower_sessions::session::Error> {
    let stored = session
        .get::<serde_json::Value>(session_keys::QUIZ_STATE)
        .await?;
    Ok(stored.map(QuizState::from_persisted).unwrap_or_default())
}

/// Persist the quiz state.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save(session: &Session, state: &QuizState) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::QUIZ_STATE, state).await
}

/// Forget the quiz state.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn clear(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<serde_json::Value>(session_keys::QUIZ_STATE)
        .await
        .map(|_| ())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::quiz::{FormFields, Step};

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_load_defaults_when_empty() {
        let session = session();
        assert_eq!(load(&session).await.unwrap(), QuizState::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let session = session();
        let mut state = QuizState::default();
        state.submit(1, &FormFields::default()).unwrap();
        save(&session, &state).await.unwrap();

        let loaded = load(&session).await.unwrap();
        assert_eq!(loaded.current(), Step::SkinType);

        clear(&session).await.unwrap();
        assert_eq!(load(&session).await.unwrap(), QuizState::default());
    }

    #[tokio::test]
    async fn test_load_clamps_tampered_step() {
        let session = session();
        session
            .insert(
                session_keys::QUIZ_STATE,
                serde_json::json!({ "current_step": 42, "answers": {} }),
            )
            .await
            .unwrap();
        assert_eq!(load(&session).await.unwrap().current(), Step::Splash);
    }
}
