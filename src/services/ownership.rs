use uuid::Uuid;

use crate::database::models::Store;
use crate::database::repository::ProductStore;
use crate::error::ProductError;
use crate::middleware::Identity;

/// Confirm the caller owns `store_id`.
///
/// An absent identity is `Unauthenticated`. A store that does not exist and a
/// store owned by someone else both come back as `Forbidden`, so the response
/// never reveals which stores exist.
pub async fn verify_store_owner(
    store: &dyn ProductStore,
    store_id: Uuid,
    identity: Option<&Identity>,
) -> Result<Store, ProductError> {
    let identity = identity.ok_or(ProductError::Unauthenticated)?;

    match store.find_store(store_id, identity.user_id).await? {
        Some(found) => Ok(found),
        None => {
            tracing::debug!(%store_id, user_id = %identity.user_id, "store not owned by caller");
            Err(ProductError::Forbidden)
        }
    }
}
