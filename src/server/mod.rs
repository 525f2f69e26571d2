//! Ephemeral HTTP server handing the in-memory video to the browser.
//!
//! Every request, whatever its method or path, gets the full buffer back with
//! the source's MIME type and a permissive CORS header. No range requests.

mod content_server;


pub use content_server::ContentServer;
