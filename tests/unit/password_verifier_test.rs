//! Unit tests for the PasswordVerifier.

use securevault::services::password_verifier::{PasswordVerifier, PasswordVerifierTrait};
use securevault::types::vault_record::{HASH_LENGTH, SALT_LENGTH};

#[test]
fn test_verifier_fields_have_fixed_lengths() {
    let v = PasswordVerifier::new().create_verifier("abcd").unwrap();
    assert_eq!(v.hash.len(), HASH_LENGTH);
    assert_eq!(v.salt.len(), SALT_LENGTH);
}

#[test]
fn test_check_is_case_sensitive() {
    let pv = PasswordVerifier::new();
    let v = pv.create_verifier("Secret").unwrap();
    assert!(pv.check("Secret", &v));
    assert!(!pv.check("secret", &v));
}

#[test]
fn test_check_handles_unicode_passwords() {
    let pv = PasswordVerifier::new();
    let v = pv.create_verifier("пароль🔑").unwrap();
    assert!(pv.check("пароль🔑", &v));
    assert!(!pv.check("пароль", &v));
}

#[test]
fn test_verifier_survives_json_roundtrip() {
    let pv = PasswordVerifier::new();
    let v = pv.create_verifier("abcd").unwrap();
    let json = serde_json::to_string(&v).unwrap();
    let back = serde_json::from_str(&json).unwrap();
    assert!(pv.check("abcd", &back));
}

#[test]
fn test_other_instance_can_check() {
    let v = PasswordVerifier::new().create_verifier("abcd").unwrap();
    assert!(PasswordVerifier::default().check("abcd", &v));
}
