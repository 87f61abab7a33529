//! Shared key pairs for unit tests. 2048-bit generation is slow in debug
//! builds, so each pair is generated once per test binary.

use crate::keys::KeyPair;
use std::sync::OnceLock;

static ALICE: OnceLock<KeyPair> = OnceLock::new();
static BOB: OnceLock<KeyPair> = OnceLock::new();

pub fn alice() -> &'static KeyPair {
    ALICE.get_or_init(|| KeyPair::generate().expect("key generation"))
}

pub fn bob() -> &'static KeyPair {
    BOB.get_or_init(|| KeyPair::generate().expect("key generation"))
}
