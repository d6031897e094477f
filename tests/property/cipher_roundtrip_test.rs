//! Property-based tests for the authenticated cipher.
//!
//! Round-trip, non-determinism and wrong-password rejection for arbitrary
//! plaintexts and passwords.

use proptest::prelude::*;
use securevault::services::crypto_service::{CryptoService, CryptoServiceTrait};
use securevault::types::errors::CryptoError;

fn svc() -> CryptoService {
    CryptoService::with_iterations(100).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn encryption_roundtrip_preserves_plaintext(
        plaintext in proptest::collection::vec(any::<u8>(), 0..=1024),
        password in ".{0,32}",
    ) {
        let service = svc();
        let blob = service.encrypt(&plaintext, &password).expect("encrypt");
        let decrypted = service.decrypt(&blob, &password).expect("decrypt with same password");
        prop_assert_eq!(decrypted.as_slice(), plaintext.as_slice());
    }

    #[test]
    fn repeated_encryption_uses_fresh_salt_and_iv(
        plaintext in proptest::collection::vec(any::<u8>(), 1..=256),
        password in ".{1,32}",
    ) {
        let service = svc();
        let a = service.encrypt(&plaintext, &password).unwrap();
        let b = service.encrypt(&plaintext, &password).unwrap();
        prop_assert_ne!(a.iv, b.iv);
        prop_assert_ne!(a.salt, b.salt);
        prop_assert_ne!(a.cipher_text, b.cipher_text);
    }

    #[test]
    fn wrong_password_is_rejected(
        plaintext in proptest::collection::vec(any::<u8>(), 0..=256),
        password in ".{0,16}",
        other in ".{0,16}",
    ) {
        prop_assume!(password != other);
        let service = svc();
        let blob = service.encrypt(&plaintext, &password).unwrap();
        prop_assert_eq!(service.decrypt(&blob, &other).unwrap_err(), CryptoError::DecryptionFailed);
    }
}
