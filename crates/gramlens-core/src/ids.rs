use uuid::Uuid;

/// Source of opaque artifact identifiers.
///
/// The collector takes this as a capability so tests can pin deterministic
/// ids; production uses [`UuidIdGenerator`].
pub trait IdGenerator: Send + Sync {
    fn artifact_id(&self) -> String;
}

/// UUID-v4-backed identifier source.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn artifact_id(&self) -> String {
        format!("artifact_{}", Uuid::new_v4().simple())
    }
}
