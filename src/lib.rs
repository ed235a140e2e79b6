//! # voroprism
//!
//! `voroprism` turns a spatial partition of a bounded deposit outline into
//! renderable geometry, in Rust as well as compiled to WebAssembly (WASM).
//! Each partition cell — one region per well — becomes either a flat colored
//! polygon for a 2D map view or a colored prism whose height encodes a
//! per-cell scalar for a 3D view.
//!
//! ## Features
//!
//! - **Ear-clipping triangulation**: decomposes arbitrary simple rings
//!   (convex or concave, either winding) into index triples reusable for both
//!   prism caps.
//! - **Prism extrusion**: bottom cap, top cap, and a seam-closed side wall,
//!   all with outward-facing winding.
//! - **Gradient coloring**: min-max normalization of per-cell scalars mapped
//!   onto a two-color gradient (blue to red by default).
//! - **Order-stable height recovery**: per-point heights restored in the
//!   original input order via source-index tags, immune to partition-order
//!   scrambling.
//! - **WASM-first**: built with `wasm-bindgen`; cell geometry crosses the JS
//!   boundary as flat coordinate and index arrays.
//!
//! ## Example
//!
//! See the `demos/` directory for usage with SVG plotting and GLTF export.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Pipeline`] struct, which maps partitioned
//! cells and their attributes to meshes, colors, and marker heights.

mod cell;
mod color;
mod error;
mod extrusion;
mod heights;
mod mesh;
mod pipeline;
mod ring;
mod triangulation;
mod wasm;

pub use cell::AttributeProvider;
pub use cell::Cell;
pub use cell::RegionPartitioner;
pub use color::ColorRgb;
pub use color::Gradient;
pub use color::normalize;
pub use error::GeometryError;
pub use extrusion::Prism;
pub use extrusion::extrude;
pub use heights::resolve as resolve_heights;
pub use mesh::Mesh;
pub use pipeline::FlatCell;
pub use pipeline::Pipeline;
pub use pipeline::PipelineConfig;
pub use pipeline::PrismBuild;
pub use pipeline::PrismCell;
pub use ring::Ring;
pub use triangulation::triangulate;
pub use wasm::DepositView;
