// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (JWT auth)
pub mod protected; // /api/produits/*, /api/utilisateurs/*
pub mod public;    // /api/generatetoken
pub mod utils;
