//! Lenient derivation along free-form path text.
//!
//! Paths here come from configuration and user input, so nothing in this
//! module can fail. Text that does not describe an index is dropped and the
//! remaining segments are derived in order.

use tracing::debug;

use super::KeyMaterial;

/// One step of a parsed derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Child index, without the hardened bit
    pub index: u32,
    /// Whether the step carried a hardening marker
    pub hardened: bool,
}

/// Split path text into derivation segments.
///
/// Surrounding whitespace and a leading `m` are ignored, empty segments are
/// dropped, `'`, `h` or `H` suffixes mark a hardened step. Segments that are
/// not unsigned decimal integers are skipped. Values too large for 32 bits
/// saturate at `u32::MAX`.
#[must_use]
pub fn segments(path: &str) -> Vec<Segment> {
    let mut tokens = path.split('/').map(str::trim).peekable();
    if tokens.next_if(|t| t.eq_ignore_ascii_case("m")).is_some() {
        debug!("stripped root marker");
    }

    tokens
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let segment = parse_segment(token);
            if segment.is_none() {
                debug!(segment = token, "skipping unreadable path segment");
            }
            segment
        })
        .collect()
}

/// Walk `path` from the master node and return the final key and chain code.
///
/// An empty or unreadable path yields the master node unchanged.
#[must_use]
pub fn derive_for_path(
    master_key: &[u8; 32],
    master_chain_code: &[u8; 32],
    path: &str,
) -> KeyMaterial {
    let master = KeyMaterial::new(*master_key, *master_chain_code);
    segments(path)
        .into_iter()
        .fold(master, |node, segment| node.child(segment.index, segment.hardened))
}

/// Walk `path` from the master node and return only the private key
#[must_use]
pub fn derive_private_key_for_path(
    master_key: &[u8; 32],
    master_chain_code: &[u8; 32],
    path: &str,
) -> [u8; 32] {
    *derive_for_path(master_key, master_chain_code, path).key()
}

fn parse_segment(token: &str) -> Option<Segment> {
    let (digits, hardened) = match token.strip_suffix(&['\'', 'h', 'H'][..]) {
        Some(stripped) => (stripped.trim_end(), true),
        None => (token, false),
    };
    if digits.is_empty() {
        return None;
    }

    let index = digits.bytes().try_fold(0u32, |acc, b| {
        b.is_ascii_digit()
            .then(|| acc.saturating_mul(10).saturating_add(u32::from(b - b'0')))
    })?;

    Some(Segment { index, hardened })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hd::{compute_master, FULL_FUNDRAISER_PATH};
    use crate::seed::Seed;
    use proptest::prelude::*;

    fn key_for(mnemonic: &str, path: &str) -> String {
        let seed = Seed::from_mnemonic(mnemonic, "").unwrap();
        let master = compute_master(seed.as_bytes());
        hex::encode(derive_private_key_for_path(
            master.key(),
            master.chain_code(),
            path,
        ))
    }

    const FUNDRAISER_MNEMONIC: &str = "barrel original fuel morning among eternal \
                                       filter ball stove pluck matrix mechanic";

    #[test]
    fn test_fundraiser_vectors() {
        // fundraiser path, bitcoin, ether
        assert_eq!(
            key_for(FUNDRAISER_MNEMONIC, FULL_FUNDRAISER_PATH),
            "01dcb36acfd5de52ac1f00daf231e64637388202f1fce7bdc64f6bb3199d270d"
        );
        assert_eq!(
            key_for(FUNDRAISER_MNEMONIC, "44'/0'/0'/0/0"),
            "e77c3de76965ad89997451de97b95bb65ede23a6bf185a55d80363d92ee37c3d"
        );
        assert_eq!(
            key_for(FUNDRAISER_MNEMONIC, "44'/60'/0'/0/0"),
            "7fc4d8a8146dea344ba04c593517d3f377fa6cded36cd55aee0a0bb968e651bc"
        );
    }

    #[test]
    fn test_recovery_tool_vectors() {
        assert_eq!(
            key_for(
                "advice process birth april short trust crater change bacon monkey medal garment \
                 gorilla ranch hour rival razor call lunar mention taste vacant woman sister",
                "44'/1'/1'/0/4"
            ),
            "a61f10c5fecf40c084c94fa54273b6f5d7989386be4a37669e6d6f7b0169c163"
        );
        assert_eq!(
            key_for(
                "idea naive region square margin day captain habit \
                 gun second farm pact pulse someone armed",
                "44'/0'/0'/0/420"
            ),
            "32c4599843de3ef161a629a461d12c60b009b676c35050be5f7ded3a3b23501f"
        );
    }

    #[test]
    fn test_bare_bip32_path_vector() {
        let mnemonic =
            "monitor flock loyal sick object grunt duty ride develop assault harsh history";
        let expected = "c4c11d8c03625515905d7e89d25dfc66126fbc629ecca6db489a1a72fc4bda78";
        assert_eq!(key_for(mnemonic, "0/7"), expected);
        assert_eq!(key_for(mnemonic, "m/0/7"), expected);
        assert_eq!(key_for(mnemonic, " m       /0/7"), expected);
    }

    #[test]
    fn test_segments_tokenizer() {
        let s = |index, hardened| Segment { index, hardened };
        assert_eq!(
            segments("m/44'/118'/0'/0/0"),
            vec![s(44, true), s(118, true), s(0, true), s(0, false), s(0, false)]
        );
        assert_eq!(segments("m///7//////"), vec![s(7, false)]);
        assert_eq!(segments("/44"), vec![s(44, false)]);
        assert_eq!(segments("1h/2H/ 3' "), vec![s(1, true), s(2, true), s(3, true)]);
        assert_eq!(segments("x/-1/5a/'/9"), vec![s(9, false)]);
        assert_eq!(
            segments("99999999999999999999/4294967296'"),
            vec![s(u32::MAX, false), s(u32::MAX, true)]
        );
        assert!(segments("").is_empty());
        assert!(segments("m").is_empty());
        assert!(segments("   /   ").is_empty());
    }

    #[test]
    fn test_empty_path_returns_master() {
        let master = compute_master(b"walker seed");
        for path in ["", "/", "m", "m/", "   /   ", "//", "abc/def"] {
            let node = derive_for_path(master.key(), master.chain_code(), path);
            assert_eq!(node, master, "{path:?}");
        }
    }

    #[test]
    fn test_separators_are_collapsed() {
        let master = compute_master(b"walker seed");
        let expected = derive_private_key_for_path(master.key(), master.chain_code(), "5");
        for path in ["m/5/", "m/5", "m//5", "/5", "5//"] {
            assert_eq!(
                derive_private_key_for_path(master.key(), master.chain_code(), path),
                expected,
                "{path:?}"
            );
        }
    }

    #[test]
    fn test_do_not_crash_on_malformed_paths() {
        let zero = [0u8; 32];
        for path in [
            "m/5/",
            "m/5",
            "/44",
            "m//5",
            "m/0/7",
            "/",
            " m       /0/7",
            "              /       ",
            "m///7//////",
            "",
            "m/4294967295/4294967295'",
            "m/-1/ä/'/h",
        ] {
            assert_eq!(derive_private_key_for_path(&zero, &zero, path).len(), 32);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_any_text_derives(path in ".{0,64}") {
            let master = compute_master(b"proptest seed");
            let _ = derive_for_path(master.key(), master.chain_code(), &path);
        }

        #[test]
        fn prop_path_shaped_text_derives(path in "[ mhH0-9'/-]{0,32}") {
            let zero = [0u8; 32];
            let _ = derive_private_key_for_path(&zero, &zero, &path);
        }
    }
}
