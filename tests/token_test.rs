use spotistats::{management::TokenManager, types::Token};

fn token(obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "user-top-read user-read-recently-played".to_string(),
        expires_in,
        obtained_at,
    }
}

#[test]
fn test_fresh_token_is_not_expired() {
    let manager = TokenManager::new(token(1_000, 3600));
    assert!(!manager.is_expired(1_000));
    assert!(!manager.is_expired(1_000 + 3600 - 241));
}

#[test]
fn test_token_refreshes_before_expiry() {
    let manager = TokenManager::new(token(1_000, 3600));
    // Four minutes ahead of the real expiry
    assert!(manager.is_expired(1_000 + 3600 - 240));
    assert!(manager.is_expired(1_000 + 3600));
    assert!(manager.is_expired(10_000));
}
