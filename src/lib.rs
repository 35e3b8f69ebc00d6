//! Toolbox Server Library
//!
//! Self-hosted utility service: PDF page extraction to downloadable images,
//! TikTok no-watermark media lookup, and YouTube conversion-link
//! construction. The server binary is in main.rs.
//!
//! # Modules
//!
//! - `document`: rendering collaborator seam (MuPDF behind `PageRenderer`)
//! - `extract`: the page extraction pipeline, data model, and run store
//! - `export`: selection export (single image or ZIP archive)
//! - `media`: TikTok and YouTube lookup collaborators
//! - `routes`: HTTP surface

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod media;
pub mod routes;
pub mod state;
