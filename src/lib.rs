//! csprops - MSBuild property tooling for .NET project files
//!
//! csprops reads the `<Import Project="..." />` declarations of `.csproj` and
//! `.props` files, offers the properties declared in the imported files as
//! `$(Name)` completions, and extracts hardcoded values (typically package
//! versions) into a shared properties file.
//!
//! ## Module Structure
//!
//! - `actions`: Extract-to-property and its preview/apply operations
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and validation
//! - `core`: Import resolution, property extraction, value detection, props file rewriting
//! - `editor`: Editor-facing completions and code actions
//! - `utils`: Shared utility functions

pub mod actions;
pub mod cli;
pub mod config;
pub mod core;
pub mod editor;
pub mod utils;
