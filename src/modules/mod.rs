pub mod empleados;
pub mod libros;

use std::sync::Arc;

use catalogo_db::Storage;
use catalogo_kernel::ModuleRegistry;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, storage: Arc<dyn Storage>) {
    registry.register(empleados::create_module());
    registry.register(libros::create_module(storage));
}

/// JSON form of a derived schema, for embedding in OpenAPI fragments
pub(crate) fn schema_of<T: utoipa::ToSchema>() -> serde_json::Value {
    serde_json::to_value(T::schema()).unwrap_or(serde_json::Value::Null)
}
