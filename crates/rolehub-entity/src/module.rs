//! Protected application modules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use rolehub_core::AppError;

/// An application area guarded by per-role permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Module {
    Usuarios,
    UsuarioRol,
    Roles,
    Permisos,
    Productos,
    Vehiculos,
    Categorias,
    Subcategorias,
    Marcas,
    Proveedores,
    Compras,
    Ventas,
    DetalleCompra,
    DetalleVenta,
    ConfigGlobal,
}

impl Module {
    /// Every module, in declaration order.
    pub const ALL: [Module; 15] = [
        Self::Usuarios,
        Self::UsuarioRol,
        Self::Roles,
        Self::Permisos,
        Self::Productos,
        Self::Vehiculos,
        Self::Categorias,
        Self::Subcategorias,
        Self::Marcas,
        Self::Proveedores,
        Self::Compras,
        Self::Ventas,
        Self::DetalleCompra,
        Self::DetalleVenta,
        Self::ConfigGlobal,
    ];

    /// Return the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usuarios => "USUARIOS",
            Self::UsuarioRol => "USUARIO_ROL",
            Self::Roles => "ROLES",
            Self::Permisos => "PERMISOS",
            Self::Productos => "PRODUCTOS",
            Self::Vehiculos => "VEHICULOS",
            Self::Categorias => "CATEGORIAS",
            Self::Subcategorias => "SUBCATEGORIAS",
            Self::Marcas => "MARCAS",
            Self::Proveedores => "PROVEEDORES",
            Self::Compras => "COMPRAS",
            Self::Ventas => "VENTAS",
            Self::DetalleCompra => "DETALLE_COMPRA",
            Self::DetalleVenta => "DETALLE_VENTA",
            Self::ConfigGlobal => "CONFIG_GLOBAL",
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AppError::validation(format!("Modulo inválido: {s}")))
    }
}
