//! Catálogo application library
//!
//! Application modules (libros, empleados) mounted by the `catalogo-app` binary.

pub mod modules;

#[cfg(test)]
pub(crate) mod testing;

pub use modules::register_all;
