//! Request and response bodies.

pub mod request;
pub mod response;

pub use request::{
    AssignRoleRequest, CreateRoleRequest, CreateUserRequest, EstadoRequest, PermisoUpsertRequest,
    UpdateRoleRequest, UpdateUserRequest,
};
pub use response::{DataResponse, OkResponse, RoleIdResponse};
