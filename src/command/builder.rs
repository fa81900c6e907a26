//! Command builders
//!
//! Turn typed parameters into the exact token sequence the server expects.
//! Every argument is validated here so that nothing malformed reaches the
//! wire.
//!
//! ## Token Grammars
//! ```text
//! BZMPOP <timeout> <numkeys> <key> [<key> ...] <MIN|MAX> [COUNT <count>]
//! BZPOPMIN <key> [<key> ...] <timeout>
//! BZPOPMAX <key> [<key> ...] <timeout>
//! CLIENT SETINFO <LIB-NAME|LIB-VER> <value>
//! ```
//!
//! The two pop grammars place the timeout differently and are built
//! separately.

use bytes::Bytes;

use super::types::{Direction, LibAttribute, Timeout};
use super::{CommandKind, Tokens};
use crate::error::{PopError, Result};

/// Build `BZMPOP`
///
/// Fails with `InvalidArgument` when `keys` is empty, `count` is zero, or
/// the timeout is negative or not finite.
pub fn build_bzmpop<K: AsRef<[u8]>>(
    timeout: Timeout,
    keys: &[K],
    direction: Direction,
    count: Option<u64>,
) -> Result<Tokens> {
    let timeout = timeout.validate()?;
    require_keys(CommandKind::BzMPop, keys)?;
    if count == Some(0) {
        return Err(PopError::InvalidArgument(
            "BZMPOP count must be a positive integer".to_string(),
        ));
    }

    let mut tokens = Vec::with_capacity(keys.len() + 6);
    tokens.push(Bytes::from_static(CommandKind::BzMPop.name().as_bytes()));
    tokens.push(Bytes::from(timeout.to_string()));
    tokens.push(Bytes::from(keys.len().to_string()));
    tokens.extend(keys.iter().map(|k| Bytes::copy_from_slice(k.as_ref())));
    tokens.push(Bytes::from_static(direction.keyword().as_bytes()));

    if let Some(count) = count {
        tokens.push(Bytes::from_static(b"COUNT"));
        tokens.push(Bytes::from(count.to_string()));
    }

    Ok(tokens)
}

/// Build `BZPOPMIN` or `BZPOPMAX`, depending on `direction`
pub fn build_bzpop<K: AsRef<[u8]>>(
    keys: &[K],
    timeout: Timeout,
    direction: Direction,
) -> Result<Tokens> {
    let kind = CommandKind::single_pop(direction);
    let timeout = timeout.validate()?;
    require_keys(kind, keys)?;

    let mut tokens = Vec::with_capacity(keys.len() + 2);
    tokens.push(Bytes::from_static(kind.name().as_bytes()));
    tokens.extend(keys.iter().map(|k| Bytes::copy_from_slice(k.as_ref())));
    tokens.push(Bytes::from(timeout.to_string()));

    Ok(tokens)
}

/// Build `CLIENT SETINFO`
///
/// The value is passed through untouched; the server rejects values with
/// spaces or newlines and that error reaches the caller as-is.
pub fn build_client_setinfo(attribute: LibAttribute, value: &str) -> Tokens {
    vec![
        Bytes::from_static(b"CLIENT"),
        Bytes::from_static(b"SETINFO"),
        Bytes::from_static(attribute.keyword().as_bytes()),
        Bytes::copy_from_slice(value.as_bytes()),
    ]
}

fn require_keys<K>(kind: CommandKind, keys: &[K]) -> Result<()> {
    if keys.is_empty() {
        return Err(PopError::InvalidArgument(format!(
            "{} requires at least one key",
            kind.name()
        )));
    }
    Ok(())
}
