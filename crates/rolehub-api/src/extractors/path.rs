//! Typed path parameter helpers.

use std::str::FromStr;

use rolehub_core::error::AppError;
use rolehub_entity::Module;

/// Parses a UUID-backed id from a path segment.
pub fn parse_id<T: FromStr>(raw: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::validation(format!("Id inválido: {raw}")))
}

/// Parses a module name from a path segment. Names are matched exactly.
pub fn parse_module(raw: &str) -> Result<Module, AppError> {
    Module::parse(raw).ok_or_else(|| AppError::validation("Módulo inválido."))
}
