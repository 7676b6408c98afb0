// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route Prefix: /api/produits/*, /api/utilisateurs/*
// Middleware: jwt_auth_middleware, which inserts `Claims` and `AuthUser`

pub mod produits;
pub mod utilisateurs;
