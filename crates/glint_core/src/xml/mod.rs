//! XML scene file support for Glint.
//!
//! Scene files are small XML documents listing global parameters, cameras,
//! lights, materials, a vertex table and objects. This module reads them
//! into a [`Scene`](crate::Scene).
//!
//! ## Supported XML
//!
//! - Elements, attributes (single or double quoted), text content
//! - Comments, `<?xml ...?>` declarations, `<!DOCTYPE ...>`, CDATA
//! - The five predefined entities (`&lt;` `&gt;` `&amp;` `&quot;` `&apos;`)
//!
//! ## Not Supported
//!
//! - Namespaces, numeric character references
//! - `plyFile` mesh references
//!
//! # Example
//!
//! ```ignore
//! use glint_core::load_scene;
//!
//! let scene = load_scene("scenes/simple.xml")?;
//! println!("{} cameras, {} triangles", scene.cameras.len(), scene.triangle_count());
//! ```

mod loader;
mod parser;

pub use loader::*;
pub use parser::*;
