// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Only token acquisition lives here. Everything else under /api goes
// through the JWT middleware.

pub mod token;
