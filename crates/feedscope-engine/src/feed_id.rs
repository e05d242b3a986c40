//! Feed name to data feed identifier resolution.

use feedscope_rpc::OracleRpc;
use feedscope_types::{FeedIdentifier, FeedName, QueryError};
use tracing::debug;

/// Resolves an encoded feed name to its on-chain identifier with one read.
///
/// # Errors
///
/// Returns [`QueryError::FeedNotFound`] if the contract maps the name to the
/// all-zero identifier, or an RPC error if the read fails.
pub async fn resolve_feed_identifier<R: OracleRpc + ?Sized>(
    rpc: &R,
    name: &FeedName,
) -> Result<FeedIdentifier, QueryError> {
    let raw = rpc.resolve_feed_id(name.encoded()).await?;
    let id = FeedIdentifier::new(raw).ok_or_else(|| QueryError::FeedNotFound(name.to_string()))?;
    debug!(feed = %name, %id, "resolved feed identifier");
    Ok(id)
}
