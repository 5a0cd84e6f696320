use tracing::{debug, info};

use super::domain::{Entity, EntityKind};
use super::error::ReputationError;
use super::store::ReputationStore;

/// Return the entity whose name matches `name` case-insensitively, creating
/// and persisting a fresh one when none exists.
///
/// `kind` and `industry` only apply to a newly created entity; an existing
/// match is returned untouched.
pub fn find_or_create_entity<S>(
    store: &S,
    name: &str,
    kind: EntityKind,
    industry: Option<String>,
) -> Result<Entity, ReputationError>
where
    S: ReputationStore + ?Sized,
{
    let mut entities = store.load_entities();

    if let Some(existing) = entities.iter().find(|entity| entity.name_matches(name)) {
        debug!(entity_id = %existing.id, name, "resolved existing entity");
        return Ok(existing.clone());
    }

    let entity = Entity::new(name, kind, industry);
    entities.push(entity.clone());
    store.save_entities(&entities)?;

    info!(entity_id = %entity.id, name, kind = %entity.kind, "created entity");
    Ok(entity)
}
