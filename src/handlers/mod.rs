// Two security tiers, mirrored by the router:
// public (/, /health, /auth/*) and protected (/api/*, JWT required).
pub mod protected;
pub mod public;
